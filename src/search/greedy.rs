use bit_set::BitSet;

use crate::graph::{Graph, VertexId};

/** greedy seed clique, used to prime the incumbent lower bound before a
branch & bound run.

Starts from the vertex of maximum degree, keeps the set C of common
neighbors of the clique built so far, and repeatedly adds the vertex of C
with the most neighbors inside C, until C is empty. Ties are broken by the
smallest vertex id, so the result is deterministic. The result is a clique
by construction, of size ≥ 1 whenever the graph has a vertex. */
pub fn greedy_clique(graph: &Graph) -> Vec<VertexId> {
    let n = graph.nb_vertices();
    if n == 0 {
        return Vec::new();
    }
    let start = (0..n)
        .max_by(|&a, &b| {
            let da = graph.neighbor_mask(a).len();
            let db = graph.neighbor_mask(b).len();
            da.cmp(&db).then(b.cmp(&a)) // prefer the smallest id on ties
        })
        .unwrap();
    let mut clique = vec![start];
    let mut common: BitSet = graph.neighbor_mask(start).clone();
    while !common.is_empty() {
        let mut best = None;
        let mut best_inside = 0;
        for v in common.iter() {
            let inside = common.intersection(graph.neighbor_mask(v)).count();
            if best.is_none() || inside > best_inside {
                best = Some(v);
                best_inside = inside;
            }
        }
        let v = best.unwrap(); // common is non-empty
        clique.push(v);
        common.remove(v);
        common.intersect_with(graph.neighbor_mask(v));
    }
    clique
}
