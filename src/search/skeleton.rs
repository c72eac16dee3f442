use bit_set::BitSet;

use crate::bitset::BufferPool;
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::search::pivot::choose_pivot;
use crate::search::{BranchOrder, Incumbent};
use crate::stopping::StopToken;

/** pivot rule of a node */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotRule {
    /// branch on every candidate of P
    None,
    /// branch only on P \ N(u), for u ∈ P ∪ X maximizing |P ∩ N(u)|
    MaxCover,
}

/** the knobs a variant binds on the shared recursion core */
#[derive(Debug, Clone, Copy)]
pub struct NodePolicies {
    /// pivot rule
    pub pivot: PivotRule,
    /// processing order of the branching vertices
    pub order: BranchOrder,
}

/** shared R/P/X recursion core of the pivot-based variants.

Every node maintains the Bron-Kerbosch invariants: R is a clique, every
vertex of P is adjacent to all of R, every vertex of X is adjacent to all
of R and its maximal cliques above R were already enumerated. A node
records R when P and X are both empty (R is then maximal), prunes on
|R| + |P| ≤ |best|, and polls the stop token on entry.

Child candidate sets are built into buffers borrowed from a pool and given
back on ascent, so an invocation allocates O(depth) bitsets in total. */
#[derive(Debug)]
pub struct Explorer<'a> {
    /// graph under search (read-only)
    graph: &'a Graph,
    /// cancellation token, polled once per node
    token: &'a StopToken,
    /// incumbent of the invocation
    incumbent: &'a mut Incumbent,
    /// node counter of the invocation
    nodes: &'a mut u64,
    /// scratch bitsets reused across frames
    pool: BufferPool,
}

impl<'a> Explorer<'a> {
    /// core bound to one invocation's state
    pub fn new(
        graph: &'a Graph,
        token: &'a StopToken,
        incumbent: &'a mut Incumbent,
        nodes: &'a mut u64,
    ) -> Self {
        Self { graph, token, incumbent, nodes, pool: BufferPool::new() }
    }

    /** explores the subtree rooted at (r, p, x) and records every
    improving maximal clique into the incumbent. On return, `p` and `x`
    reflect the moves performed at this node (branched vertices moved from
    P to X); `r` is restored. Fails with [`Error::Interrupted`] when the
    token triggers, leaving the incumbent at its best value so far. */
    pub fn explore(
        &mut self,
        r: &mut Vec<VertexId>,
        p: &mut BitSet,
        x: &mut BitSet,
        policies: NodePolicies,
    ) -> Result<()> {
        if self.token.is_triggered() {
            return Err(Error::Interrupted);
        }
        *self.nodes += 1;
        if r.len() + p.len() <= self.incumbent.len() {
            return Ok(());
        }
        if p.is_empty() && x.is_empty() {
            self.incumbent.record(r);
            return Ok(());
        }
        for v in self.branching_vertices(p, x, policies) {
            if r.len() + 1 + p.len() <= self.incumbent.len() {
                break;
            }
            let mut child_p = self.pool.acquire();
            child_p.union_with(p);
            child_p.intersect_with(self.graph.neighbor_mask(v));
            let mut child_x = self.pool.acquire();
            child_x.union_with(x);
            child_x.intersect_with(self.graph.neighbor_mask(v));
            r.push(v);
            let status = self.explore(r, &mut child_p, &mut child_x, policies);
            r.pop();
            self.pool.release(child_p);
            self.pool.release(child_x);
            status?;
            p.remove(v);
            x.insert(v);
        }
        Ok(())
    }

    /// P \ N(pivot) (all of P without a pivot), in policy order
    fn branching_vertices(&self, p: &BitSet, x: &BitSet, policies: NodePolicies) -> Vec<VertexId> {
        let branching: Vec<VertexId> = match policies.pivot {
            PivotRule::MaxCover => match choose_pivot(self.graph, p, x) {
                Some(u) => {
                    let covered = self.graph.neighbor_mask(u);
                    p.iter().filter(|&v| !covered.contains(v)).collect()
                }
                None => p.iter().collect(),
            },
            PivotRule::None => p.iter().collect(),
        };
        match policies.order {
            BranchOrder::Natural => branching,
            BranchOrder::DegreeDesc => {
                let mut keyed: Vec<(usize, VertexId)> = branching
                    .into_iter()
                    .map(|v| (p.intersection(self.graph.neighbor_mask(v)).count(), v))
                    .collect();
                keyed.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
                keyed.into_iter().map(|(_, v)| v).collect()
            }
        }
    }
}
