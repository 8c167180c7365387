//! File I/O for graphs in the DIMACS-edge and colored text formats
//!
//! DIMACS-edge: comment lines start with `c`, the header reads
//! `p edge <numVertices> <numEdges>`, edges read `e <v1> <v2>` (1-based).
//! The colored variant uses a `p cols <numVertices> <numEdges> <numColors>`
//! header and adds `v <vertex> <color>` lines.

use super::{Graph, GraphBuilder};
use anyhow::{Context, Result};
use std::path::Path;

/// Supported on-disk graph formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphFormat {
    DimacsEdge,
    Colored,
}

impl std::str::FromStr for GraphFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dimacs" | "dimacs_edge" | "edge" => Ok(GraphFormat::DimacsEdge),
            "colored" | "cols" => Ok(GraphFormat::Colored),
            other => anyhow::bail!("unknown graph format '{}' (expected 'dimacs' or 'colored')", other),
        }
    }
}

/// Load a graph from a text file in the given format.
pub fn load_graph_from_file<P: AsRef<Path>>(path: P, format: GraphFormat) -> Result<Graph> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read graph file: {}", path.as_ref().display()))?;

    let parsed = match format {
        GraphFormat::DimacsEdge => parse_dimacs_graph(&content),
        GraphFormat::Colored => parse_colored_graph(&content),
    };
    parsed.with_context(|| format!("Failed to parse graph file: {}", path.as_ref().display()))
}

/// Save a graph to a text file, creating parent directories as needed.
pub fn save_graph_to_file<P: AsRef<Path>>(graph: &Graph, path: P, format: GraphFormat) -> Result<()> {
    let content = match format {
        GraphFormat::DimacsEdge => graph.to_string(),
        GraphFormat::Colored => graph_to_colored_string(graph),
    };

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write graph file: {}", path.as_ref().display()))?;
    Ok(())
}

/// Parse a DIMACS-edge graph. All vertices receive the default color.
pub fn parse_dimacs_graph(content: &str) -> Result<Graph> {
    let mut lines = content_lines(content);

    let header = lines.next().context("Graph file is empty or contains nothing but comments")?;
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 4 || fields[0] != "p" || fields[1] != "edge" {
        anyhow::bail!(
            "First non-comment line should read \"p edge <numVertices> <numEdges>\", but doesn't: {}",
            header
        );
    }
    let num_verts: usize = fields[2].parse().context("Invalid vertex count in header")?;
    let num_edges: usize = fields[3].parse().context("Invalid edge count in header")?;
    if num_verts < 1 {
        anyhow::bail!("Illegal number of vertices: {}", num_verts);
    }

    let mut builder = GraphBuilder::new(num_verts);
    for line in lines {
        if let Some(rest) = line.strip_prefix("e ") {
            let (v1, v2) = parse_edge_line(rest, num_verts).with_context(|| format!("In line: {}", line))?;
            builder.add_edge(v1, v2);
        } else {
            anyhow::bail!("Illegal input file line: {}", line);
        }
    }
    let graph = builder.finish();
    if graph.num_edges() != num_edges {
        anyhow::bail!(
            "Header announces {} edges but the file specifies {}",
            num_edges,
            graph.num_edges()
        );
    }
    Ok(graph)
}

/// Parse a colored graph (`p cols` header with `e` and `v` lines).
pub fn parse_colored_graph(content: &str) -> Result<Graph> {
    let mut lines = content_lines(content);

    let header = lines.next().context("Graph file is empty or contains nothing but comments")?;
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 5 || fields[0] != "p" || fields[1] != "cols" {
        anyhow::bail!(
            "First non-comment line should read \"p cols <numVertices> <numEdges> <numColors>\", but doesn't: {}",
            header
        );
    }
    let num_verts: usize = fields[2].parse().context("Invalid vertex count in header")?;
    let num_edges: usize = fields[3].parse().context("Invalid edge count in header")?;
    let num_colors: u32 = fields[4].parse().context("Invalid color count in header")?;
    if num_verts < 1 {
        anyhow::bail!("Illegal number of vertices: {}", num_verts);
    }
    if num_colors < 1 {
        anyhow::bail!("Illegal number of colors: {}", num_colors);
    }

    let mut builder = GraphBuilder::new(num_verts);
    for line in lines {
        if let Some(rest) = line.strip_prefix("e ") {
            let (v1, v2) = parse_edge_line(rest, num_verts).with_context(|| format!("In line: {}", line))?;
            builder.add_edge(v1, v2);
        } else if let Some(rest) = line.strip_prefix("v ") {
            let fields: Vec<&str> = rest.split_whitespace().collect();
            if fields.len() != 2 {
                anyhow::bail!("Color lines should read \"v <vertex> <color>\", but this one doesn't: {}", line);
            }
            let v: usize = fields[0].parse().with_context(|| format!("Invalid vertex in line: {}", line))?;
            let color: u32 = fields[1].parse().with_context(|| format!("Invalid color in line: {}", line))?;
            if v < 1 || v > num_verts {
                anyhow::bail!(
                    "Illegal vertex number in line \"{}\"; only 1..={} are allowed",
                    line,
                    num_verts
                );
            }
            if color < 1 || color > num_colors {
                anyhow::bail!(
                    "Illegal color in line \"{}\"; only 1..={} are allowed",
                    line,
                    num_colors
                );
            }
            builder.set_color(v - 1, color);
        } else {
            anyhow::bail!("Illegal input file line: {}", line);
        }
    }
    let graph = builder.finish();
    if graph.num_edges() != num_edges {
        anyhow::bail!(
            "Header announces {} edges but the file specifies {}",
            num_edges,
            graph.num_edges()
        );
    }
    Ok(graph)
}

/// Render a graph in the colored text format.
pub fn graph_to_colored_string(graph: &Graph) -> String {
    let n = graph.num_vertices();
    let mut out = String::new();
    out.push_str(&format!(
        "p cols {} {} {}\n",
        n,
        graph.num_edges(),
        graph.num_colors()
    ));
    for i in 0..n {
        for j in i..n {
            if graph.adjacent(i, j) {
                out.push_str(&format!("e {} {}\n", i + 1, j + 1));
            }
        }
    }
    for v in 0..n {
        out.push_str(&format!("v {} {}\n", v + 1, graph.color(v)));
    }
    out
}

/// Trimmed, non-empty, non-comment lines of a graph file.
fn content_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('c'))
}

fn parse_edge_line(rest: &str, num_verts: usize) -> Result<(usize, usize)> {
    let fields: Vec<&str> = rest.split_whitespace().collect();
    if fields.len() != 2 {
        anyhow::bail!("Edge lines should read \"e <vertex1> <vertex2>\"");
    }
    let v1: usize = fields[0].parse().context("Invalid vertex number")?;
    let v2: usize = fields[1].parse().context("Invalid vertex number")?;
    if v1 < 1 || v1 > num_verts || v2 < 1 || v2 > num_verts {
        anyhow::bail!("Illegal vertex number; only 1..={} are allowed", num_verts);
    }
    Ok((v1 - 1, v2 - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_dimacs_graph() {
        let content = "c a square\np edge 4 4\ne 1 2\ne 2 3\ne 3 4\ne 4 1\n";
        let g = parse_dimacs_graph(content).unwrap();
        assert_eq!(g.num_vertices(), 4);
        assert_eq!(g.num_edges(), 4);
        assert!(g.adjacent(0, 1));
        assert!(g.adjacent(3, 0));
        assert!(!g.adjacent(0, 2));
    }

    #[test]
    fn test_parse_dimacs_rejects_bad_input() {
        assert!(parse_dimacs_graph("").is_err());
        assert!(parse_dimacs_graph("p edge 2\ne 1 2\n").is_err());
        assert!(parse_dimacs_graph("p edge 2 1\ne 1 3\n").is_err());
        assert!(parse_dimacs_graph("p edge 2 1\nx 1 2\n").is_err());
        // Header edge count disagrees with body.
        assert!(parse_dimacs_graph("p edge 3 2\ne 1 2\n").is_err());
    }

    #[test]
    fn test_colored_round_trip() {
        let content = "p cols 3 2 2\ne 1 2\ne 2 3\nv 1 1\nv 2 2\nv 3 1\n";
        let g = parse_colored_graph(content).unwrap();
        assert_eq!(g.num_colors(), 2);
        assert_eq!(g.color(1), 2);

        let rendered = graph_to_colored_string(&g);
        let reparsed = parse_colored_graph(&rendered).unwrap();
        assert_eq!(reparsed, g);
    }

    #[test]
    fn test_colored_rejects_out_of_range_color() {
        let content = "p cols 2 1 1\ne 1 2\nv 1 2\n";
        assert!(parse_colored_graph(content).is_err());
    }

    #[test]
    fn test_file_operations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graphs").join("square.col");

        let g = parse_dimacs_graph("p edge 4 4\ne 1 2\ne 2 3\ne 3 4\ne 4 1\n").unwrap();
        save_graph_to_file(&g, &path, GraphFormat::DimacsEdge).unwrap();

        let loaded = load_graph_from_file(&path, GraphFormat::DimacsEdge).unwrap();
        assert_eq!(loaded, g);
    }
}
