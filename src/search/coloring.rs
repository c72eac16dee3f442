use bit_set::BitSet;

use crate::graph::VertexId;

/** reusable buffers and output of one greedy coloring call. The solvers
keep one scratch per recursion depth so a node never allocates. */
#[derive(Debug, Default)]
pub struct ColorScratch {
    /// vertices of the colored set, class by class (colors non-decreasing)
    pub order: Vec<VertexId>,
    /// colors[i]: color (≥ 1) of order[i]
    pub colors: Vec<usize>,
    /// vertices not colored yet
    residual: BitSet,
    /// vertices still allowed in the class being built
    class_candidates: BitSet,
}

impl ColorScratch {
    /// number of colors used by the last call (0 for an empty set)
    pub fn nb_colors(&self) -> usize {
        self.colors.last().copied().unwrap_or(0)
    }
}

/** first-fit greedy coloring of the candidate set `p` under the adjacency
`masks`. The vertices are emitted color class by class, so `colors` is
non-decreasing and its last entry is the number of classes — an upper
bound on the largest clique inside `p`, since a clique takes at most one
vertex per class. Branching over `order` in reverse then lets the prune
`|R| + colors[i] ≤ |best|` terminate the whole node at once.

Each class takes its vertices smallest id first, which keeps reruns
bit-identical. */
pub fn color_sort(masks: &[BitSet], p: &BitSet, scratch: &mut ColorScratch) {
    scratch.order.clear();
    scratch.colors.clear();
    scratch.residual.clear();
    scratch.residual.union_with(p);
    let mut color = 0;
    while !scratch.residual.is_empty() {
        color += 1;
        scratch.class_candidates.clear();
        scratch.class_candidates.union_with(&scratch.residual);
        while let Some(v) = scratch.class_candidates.iter().next() {
            scratch.residual.remove(v);
            scratch.class_candidates.remove(v);
            // neighbors of v cannot join this class
            scratch.class_candidates.difference_with(&masks[v]);
            scratch.order.push(v);
            scratch.colors.push(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn color(graph: &Graph, p: &BitSet) -> ColorScratch {
        let mut scratch = ColorScratch::default();
        color_sort(graph.adjacency_masks(), p, &mut scratch);
        scratch
    }

    #[test]
    fn test_empty_set_uses_no_color() {
        let g = Graph::from_edges(3, vec![(0, 1)]).unwrap();
        let scratch = color(&g, &BitSet::new());
        assert_eq!(scratch.nb_colors(), 0);
        assert!(scratch.order.is_empty());
    }

    #[test]
    fn test_coloring_is_proper_and_covers_p() {
        let edges = vec![(0, 1), (0, 2), (1, 2), (2, 3), (3, 4), (4, 0)];
        let g = Graph::from_edges(5, edges).unwrap();
        let p = crate::bitset::full_set(5);
        let scratch = color(&g, &p);
        assert_eq!(scratch.order.len(), 5);
        for i in 0..scratch.order.len() {
            for j in (i + 1)..scratch.order.len() {
                if g.are_adjacent(scratch.order[i], scratch.order[j]) {
                    assert_ne!(scratch.colors[i], scratch.colors[j]);
                }
            }
        }
    }

    #[test]
    fn test_colors_are_non_decreasing() {
        let edges = vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (3, 4)];
        let g = Graph::from_edges(5, edges).unwrap();
        let scratch = color(&g, &crate::bitset::full_set(5));
        for w in scratch.colors.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn test_bound_dominates_the_clique_number() {
        // K4 plus a disjoint K3: ω = 4
        let mut edges = vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        edges.extend_from_slice(&[(4, 5), (4, 6), (5, 6)]);
        let g = Graph::from_edges(7, edges).unwrap();
        let scratch = color(&g, &crate::bitset::full_set(7));
        assert!(scratch.nb_colors() >= 4);
    }

    #[test]
    fn test_independent_set_gets_one_color() {
        let g = Graph::from_edges(4, vec![]).unwrap();
        let scratch = color(&g, &crate::bitset::full_set(4));
        assert_eq!(scratch.nb_colors(), 1);
        assert_eq!(scratch.order, vec![0, 1, 2, 3]);
    }
}
