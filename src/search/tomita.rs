use bit_set::BitSet;

use crate::bitset::full_set;
use crate::error::Result;
use crate::graph::Graph;
use crate::search::skeleton::{Explorer, NodePolicies, PivotRule};
use crate::search::{BranchOrder, Incumbent};
use crate::stopping::StopToken;

/** pivoted maximum clique search (Tomita).

Binds the shared R/P/X core with the max-cover pivot and the incumbent
size bound, starting from P = V. The step-5 branching order defaults to
the natural one and can be overridden (degree-descending). */
pub(crate) fn maximum_clique(
    graph: &Graph,
    token: &StopToken,
    incumbent: &mut Incumbent,
    nodes: &mut u64,
    order: BranchOrder,
) -> Result<()> {
    let mut explorer = Explorer::new(graph, token, incumbent, nodes);
    let mut r = Vec::new();
    let mut p = full_set(graph.nb_vertices());
    let mut x = BitSet::new();
    let policies = NodePolicies { pivot: PivotRule::MaxCover, order };
    explorer.explore(&mut r, &mut p, &mut x, policies)
}
