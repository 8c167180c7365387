//! Display and output formatting utilities

use crate::adversarial::GraphTriple;
use crate::graph::Graph;
use itertools::Itertools;

/// Format graphs and encodings for console output
pub struct GraphFormatter;

impl GraphFormatter {
    /// One-line summary of a graph
    pub fn format_summary(name: &str, graph: &Graph) -> String {
        let colors = if graph.num_colors() > 1 {
            format!(", {} colors", graph.num_colors())
        } else {
            String::new()
        };
        format!(
            "{}: {} vertices, {} edges{}",
            name,
            graph.num_vertices(),
            graph.num_edges(),
            colors
        )
    }

    /// Adjacency matrix in compact form, one row per line
    pub fn format_adjacency(graph: &Graph) -> String {
        let n = graph.num_vertices();
        let mut output = String::new();
        for i in 0..n {
            for j in 0..n {
                output.push(if graph.adjacent(i, j) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Degree sequence in non-increasing order, e.g. `[3, 3, 2, 2]`
    pub fn format_degree_sequence(graph: &Graph) -> String {
        let mut degrees = graph.sorted_degree_sequence();
        degrees.reverse();
        format!("[{}]", degrees.iter().join(", "))
    }

    /// Summary of an adversarial triple
    pub fn format_triple_summary(triple: &GraphTriple) -> String {
        let mut output = String::new();
        output.push_str(&Self::format_summary("A ", &triple.a));
        output.push('\n');
        output.push_str(&Self::format_summary("A'", &triple.a_prime));
        output.push('\n');
        output.push_str(&Self::format_summary("B ", &triple.b));
        output.push('\n');
        output.push_str(&format!(
            "Shared degree sequence: {}\n",
            Self::format_degree_sequence(&triple.a)
        ));
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn triangle() -> Graph {
        let mut builder = GraphBuilder::new(3);
        builder.add_edge(0, 1);
        builder.add_edge(1, 2);
        builder.add_edge(2, 0);
        builder.finish()
    }

    #[test]
    fn test_graph_summary() {
        let summary = GraphFormatter::format_summary("G", &triangle());
        assert_eq!(summary, "G: 3 vertices, 3 edges");
    }

    #[test]
    fn test_adjacency_formatting() {
        let rendered = GraphFormatter::format_adjacency(&triangle());
        assert_eq!(rendered, "·██\n█·█\n██·\n");
    }

    #[test]
    fn test_degree_sequence_formatting() {
        assert_eq!(GraphFormatter::format_degree_sequence(&triangle()), "[2, 2, 2]");
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
