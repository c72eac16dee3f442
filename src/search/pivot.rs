use bit_set::BitSet;

use crate::graph::{Graph, VertexId};

/** selects the pivot u ∈ P ∪ X maximizing |P ∩ N(u)|, so that branching
can be restricted to P \ N(u). Ties are broken by the smallest vertex id.
Returns None when both sets are empty. */
pub fn choose_pivot(graph: &Graph, p: &BitSet, x: &BitSet) -> Option<VertexId> {
    let mut best: Option<(VertexId, usize)> = None;
    for u in p.iter().chain(x.iter()) {
        let cover = p.intersection(graph.neighbor_mask(u)).count();
        match best {
            Some((b, c)) if cover < c || (cover == c && u >= b) => {}
            _ => best = Some((u, cover)),
        }
    }
    best.map(|(u, _)| u)
}
