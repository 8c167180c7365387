//! Adversarial graph triples in the style of Cai, Fürer, Immerman
//!
//! From an input graph G this builds three graphs: A, an isomorphic copy A′
//! of A, and B. A and B replace every vertex of G by the same degree gadget
//! and wire gadget ports along the edges of G identically — except for one
//! randomly chosen "flip edge", whose port pair is crossed in B. A and B
//! then share degree sequences and all local gadget structure, but the
//! global parity encoded by the gadgets makes them non-isomorphic, which is
//! what makes the triple a hard benchmark for isomorphism solvers.
//!
//! Construction follows Cai, Fürer, Immerman: "An Optimal Lower Bound on the
//! Number of Variables for Graph Identification".

use super::gadget::{a_port, b_port, build_gadget, gadget_size};
use crate::error::EncodeError;
use crate::graph::Graph;
use rand::Rng;

/// The output of [`build_triple`]: `a` and `a_prime` are isomorphic, `b` is
/// isomorphic to neither.
#[derive(Debug, Clone)]
pub struct GraphTriple {
    pub a: Graph,
    pub a_prime: Graph,
    pub b: Graph,
}

/// Assembles the adversarial triple for `original`.
///
/// Fails with `MalformedInput` if the graph has no edges; without an edge
/// there is nothing to flip and B would equal A.
pub fn build_triple<R: Rng>(original: &Graph, rng: &mut R) -> Result<GraphTriple, EncodeError> {
    if original.num_edges() == 0 {
        return Err(EncodeError::malformed(
            "adversarial construction needs a graph with at least one edge",
        ));
    }
    let n = original.num_vertices();
    let flip_edge = rng.random_range(0..original.num_edges());

    // Lay the per-vertex gadgets out contiguously and remember each vertex's
    // offset into the concatenated vertex space.
    let mut offsets = vec![0usize; n];
    let mut total = 0usize;
    for v in 0..n {
        offsets[v] = total;
        total += gadget_size(original.degree(v));
    }

    let mut adj_a = vec![false; total * total];
    let mut adj_b = vec![false; total * total];
    let mut colors = vec![1u32; total];

    // Port wiring along the edges of G. Each endpoint consumes its next free
    // port slot in edge-visiting order.
    let mut next_slot = vec![0usize; n];
    let mut edge_counter = 0usize;
    for i in 0..n {
        for j in 0..i {
            if !original.adjacent(i, j) {
                continue;
            }
            let k = next_slot[i];
            let l = next_slot[j];
            next_slot[i] += 1;
            next_slot[j] += 1;

            let a_k = offsets[i] + a_port(original.degree(i), k);
            let a_l = offsets[j] + a_port(original.degree(j), l);
            let b_k = offsets[i] + b_port(original.degree(i), k);
            let b_l = offsets[j] + b_port(original.degree(j), l);

            connect(&mut adj_a, total, a_k, a_l);
            connect(&mut adj_a, total, b_k, b_l);
            if edge_counter != flip_edge {
                connect(&mut adj_b, total, a_k, a_l);
                connect(&mut adj_b, total, b_k, b_l);
            } else {
                // The one crossed pair: a_k to b_l and b_k to a_l.
                connect(&mut adj_b, total, a_k, b_l);
                connect(&mut adj_b, total, b_k, a_l);
            }
            edge_counter += 1;
        }
    }

    // Gadget-internal edges and inherited vertex colors, identical in A and B.
    for v in 0..n {
        let gadget = build_gadget(original.degree(v));
        let offset = offsets[v];
        for p in 0..gadget.num_vertices() {
            colors[offset + p] = original.color(v);
            for q in 0..p {
                if gadget.adjacent(p, q) {
                    connect(&mut adj_a, total, offset + p, offset + q);
                    connect(&mut adj_b, total, offset + p, offset + q);
                }
            }
        }
    }

    let a = Graph::from_parts(adj_a, colors.clone(), total);
    let b = Graph::from_parts(adj_b, colors, total);
    let a_prime = a.isomorphic_copy(rng);
    Ok(GraphTriple { a, a_prime, b })
}

#[inline]
fn connect(adj: &mut [bool], n: usize, u: usize, v: usize) {
    adj[u * n + v] = true;
    adj[v * n + u] = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn cycle_graph(n: usize) -> Graph {
        let mut builder = GraphBuilder::new(n);
        for v in 0..n {
            builder.add_edge(v, (v + 1) % n);
        }
        builder.finish()
    }

    #[test]
    fn test_rejects_edgeless_graph() {
        let g = GraphBuilder::new(3).finish();
        let mut rng = XorShiftRng::seed_from_u64(0);
        assert!(build_triple(&g, &mut rng).is_err());
    }

    #[test]
    fn test_triple_sizes_and_degrees() {
        // 4-cycle: every vertex has degree 2, gadget size 6, total 24.
        let g = cycle_graph(4);
        let mut rng = XorShiftRng::seed_from_u64(1);
        let triple = build_triple(&g, &mut rng).unwrap();

        assert_eq!(triple.a.num_vertices(), 24);
        assert_eq!(triple.b.num_vertices(), 24);
        assert_eq!(triple.a_prime.num_vertices(), 24);

        // Flipping one edge only reroutes connections, so all three share
        // edge counts and sorted degree sequences.
        assert_eq!(triple.a.num_edges(), triple.b.num_edges());
        assert_eq!(triple.a.num_edges(), triple.a_prime.num_edges());
        assert_eq!(
            triple.a.sorted_degree_sequence(),
            triple.b.sorted_degree_sequence()
        );
        assert_eq!(
            triple.a.sorted_degree_sequence(),
            triple.a_prime.sorted_degree_sequence()
        );
    }

    #[test]
    fn test_a_and_b_differ_in_exactly_four_adjacencies() {
        // Identical wiring everywhere except the crossed pair of the flip
        // edge: (a_k,a_l),(b_k,b_l) present in A only, (a_k,b_l),(b_k,a_l)
        // present in B only, each counted twice by symmetry.
        let g = cycle_graph(5);
        let mut rng = XorShiftRng::seed_from_u64(2);
        let triple = build_triple(&g, &mut rng).unwrap();

        let n = triple.a.num_vertices();
        let mut only_a = 0;
        let mut only_b = 0;
        for u in 0..n {
            for v in 0..u {
                match (triple.a.adjacent(u, v), triple.b.adjacent(u, v)) {
                    (true, false) => only_a += 1,
                    (false, true) => only_b += 1,
                    _ => {}
                }
            }
        }
        assert_eq!(only_a, 2);
        assert_eq!(only_b, 2);
    }

    #[test]
    fn test_colors_are_inherited_per_gadget() {
        let mut rng = XorShiftRng::seed_from_u64(3);
        let g = cycle_graph(4).with_random_coloring(2, &mut rng);
        let triple = build_triple(&g, &mut rng).unwrap();

        // Every vertex of the first gadget (offset 0, size 6) carries the
        // color of original vertex 0, and so on through the layout.
        let mut offset = 0;
        for v in 0..g.num_vertices() {
            let size = gadget_size(g.degree(v));
            for p in offset..offset + size {
                assert_eq!(triple.a.color(p), g.color(v));
                assert_eq!(triple.b.color(p), g.color(v));
            }
            offset += size;
        }
        assert_eq!(triple.a.num_colors(), g.num_colors());
    }

    #[test]
    fn test_handles_isolated_vertices() {
        // A path plus an isolated vertex: the degree-0 gadget is a single
        // vertex that contributes no edges.
        let mut builder = GraphBuilder::new(4);
        builder.add_edge(0, 1);
        builder.add_edge(1, 2);
        let g = builder.finish();

        let mut rng = XorShiftRng::seed_from_u64(4);
        let triple = build_triple(&g, &mut rng).unwrap();
        let expected: usize = (0..4).map(|v| gadget_size(g.degree(v))).sum();
        assert_eq!(triple.a.num_vertices(), expected);
        // The isolated vertex's gadget sits last in the layout and stays
        // isolated.
        assert_eq!(triple.a.degree(expected - 1), 0);
    }
}
