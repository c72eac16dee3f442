use bit_set::BitSet;

use crate::error::Result;
use crate::graph::Graph;
use crate::search::skeleton::{Explorer, NodePolicies, PivotRule};
use crate::search::{BranchOrder, Incumbent};
use crate::stopping::StopToken;

/** degeneracy-ordered maximum clique search.

Outer loop over the degeneracy ordering v_0, …, v_{n-1}: for each v_i the
pivoted core is started from R = {v_i}, P = the neighbors of v_i later in
the ordering, X = the earlier ones. Every maximal clique is then reached
exactly once, from its degeneracy-earliest vertex, and the recursion depth
below each root is bounded by the degeneracy plus one (|P| ≤ d). */
pub(crate) fn maximum_clique(
    graph: &Graph,
    token: &StopToken,
    incumbent: &mut Incumbent,
    nodes: &mut u64,
) -> Result<()> {
    let n = graph.nb_vertices();
    let ordering = graph.degeneracy_ordering();
    let mut position = vec![0usize; n];
    for (i, &v) in ordering.iter().enumerate() {
        position[v] = i;
    }
    let mut explorer = Explorer::new(graph, token, incumbent, nodes);
    let policies = NodePolicies { pivot: PivotRule::MaxCover, order: BranchOrder::Natural };
    let mut p = BitSet::with_capacity(n);
    let mut x = BitSet::with_capacity(n);
    for (i, &v) in ordering.iter().enumerate() {
        p.clear();
        x.clear();
        for &u in graph.neighbors(v)? {
            if position[u] > i {
                p.insert(u);
            } else {
                x.insert(u);
            }
        }
        let mut r = vec![v];
        explorer.explore(&mut r, &mut p, &mut x, policies)?;
    }
    Ok(())
}
