//! Degree gadgets for the adversarial construction
//!
//! A vertex of degree `d` is replaced by a gadget with `2d + 2^(d-1)`
//! vertices laid out as `[a_0 .. a_(d-1), b_0 .. b_(d-1), m_0 .. m_(2^(d-1)-1)]`.
//! Each `m` vertex corresponds to one even-popcount bitmask over the `d`
//! port slots: a set bit connects it to the `a` port of that slot, a clear
//! bit to the `b` port. Ports never connect to each other, nor do the parity
//! vertices; all gadget connectivity runs parity-to-port, so every parity
//! vertex has degree exactly `d`.

use crate::graph::{Graph, GraphBuilder};

/// Number of vertices in the gadget for a vertex of degree `d`.
///
/// A degree-0 vertex gets a single isolated vertex so that it still owns a
/// slot in the assembled graph.
pub fn gadget_size(degree: usize) -> usize {
    if degree == 0 {
        1
    } else {
        2 * degree + (1usize << (degree - 1))
    }
}

/// Index of the a-port for slot `i` within the gadget.
#[inline]
pub fn a_port(_degree: usize, i: usize) -> usize {
    i
}

/// Index of the b-port for slot `i` within the gadget.
#[inline]
pub fn b_port(degree: usize, i: usize) -> usize {
    degree + i
}

/// Builds the gadget graph for a vertex of degree `degree`.
pub fn build_gadget(degree: usize) -> Graph {
    let mut builder = GraphBuilder::new(gadget_size(degree));
    if degree >= 1 {
        for (k, mask) in even_parity_masks(degree).enumerate() {
            let parity_vertex = 2 * degree + k;
            for i in 0..degree {
                if mask & (1u64 << i) != 0 {
                    builder.add_edge(parity_vertex, a_port(degree, i));
                } else {
                    builder.add_edge(parity_vertex, b_port(degree, i));
                }
            }
        }
    }
    builder.finish()
}

/// All `d`-bit masks with an even number of set bits, in increasing numeric
/// order. Yields exactly `2^(d-1)` masks for `d >= 1`.
fn even_parity_masks(degree: usize) -> impl Iterator<Item = u64> {
    (0u64..(1u64 << degree)).filter(|mask| mask.count_ones() % 2 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gadget_size() {
        assert_eq!(gadget_size(0), 1);
        assert_eq!(gadget_size(1), 3);
        assert_eq!(gadget_size(2), 6);
        assert_eq!(gadget_size(3), 10);
        assert_eq!(gadget_size(4), 16);
    }

    #[test]
    fn test_even_parity_mask_enumeration() {
        let masks: Vec<u64> = even_parity_masks(3).collect();
        assert_eq!(masks, vec![0b000, 0b011, 0b101, 0b110]);
    }

    #[test]
    fn test_trivial_gadget() {
        let g = build_gadget(0);
        assert_eq!(g.num_vertices(), 1);
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn test_degree_two_gadget_wiring() {
        let g = build_gadget(2);
        assert_eq!(g.num_vertices(), 6);
        // Parity vertex 4 carries the all-zero mask: both b ports.
        assert!(g.adjacent(4, 2));
        assert!(g.adjacent(4, 3));
        assert!(!g.adjacent(4, 0));
        assert!(!g.adjacent(4, 1));
        // Parity vertex 5 carries the all-one mask: both a ports.
        assert!(g.adjacent(5, 0));
        assert!(g.adjacent(5, 1));
        assert!(!g.adjacent(5, 2));
        assert!(!g.adjacent(5, 3));
    }

    #[test]
    fn test_parity_vertices_have_degree_d() {
        for d in 1..=5 {
            let g = build_gadget(d);
            assert_eq!(g.num_vertices(), gadget_size(d));
            for parity_vertex in 2 * d..g.num_vertices() {
                assert_eq!(g.degree(parity_vertex), d);
            }
            // No port-to-port or parity-to-parity edges.
            for u in 0..2 * d {
                for v in 0..2 * d {
                    assert!(!g.adjacent(u, v));
                }
            }
            for u in 2 * d..g.num_vertices() {
                for v in 2 * d..g.num_vertices() {
                    assert!(!g.adjacent(u, v));
                }
            }
        }
    }
}
