use bit_set::BitSet;

use crate::bitset::{full_set, try_mask_table, BufferPool};
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::search::coloring::{color_sort, ColorScratch};
use crate::search::Incumbent;
use crate::stopping::StopToken;

/** bitset branch & bound (BBMC, San Segundo style).

Vertices are renamed by decreasing degree (ties by decreasing sum of
neighbor degrees, then by id) and the search runs entirely on bitsets over
the renamed positions: word-parallel candidate intersections, the first-fit
coloring bound of [`color_sort`], branching in reverse color order. There
is no pivot inside a node; the color order plus the per-vertex prune
subsumes it. Recorded cliques are mapped back to the original vertex ids. */
pub(crate) fn maximum_clique(
    graph: &Graph,
    token: &StopToken,
    incumbent: &mut Incumbent,
    nodes: &mut u64,
) -> Result<()> {
    let n = graph.nb_vertices();
    if n == 0 {
        return Ok(());
    }
    // sum of neighbor degrees, the classical tie-breaker of the degree order
    let neighbor_degrees: Vec<usize> = (0..n)
        .map(|v| {
            graph
                .neighbor_mask(v)
                .iter()
                .map(|u| graph.neighbor_mask(u).len())
                .sum()
        })
        .collect();
    let mut rename: Vec<VertexId> = (0..n).collect(); // rename[position] = vertex
    rename.sort_unstable_by(|&a, &b| {
        let da = graph.neighbor_mask(a).len();
        let db = graph.neighbor_mask(b).len();
        db.cmp(&da)
            .then(neighbor_degrees[b].cmp(&neighbor_degrees[a]))
            .then(a.cmp(&b))
    });
    let mut position = vec![0usize; n];
    for (i, &v) in rename.iter().enumerate() {
        position[v] = i;
    }
    // adjacency rebuilt over positions; this is the O(n²/w) bit table the
    // whole search runs on, so its allocation is the fallible one
    let mut masks = try_mask_table(n)?;
    for (i, &v) in rename.iter().enumerate() {
        for &u in graph.neighbors(v)? {
            masks[i].insert(position[u]);
        }
    }
    let mut search = Search {
        masks: &masks,
        rename: &rename,
        token,
        incumbent,
        nodes,
        scratch: Vec::new(),
        pool: BufferPool::new(),
    };
    let mut c = Vec::new();
    let mut p = full_set(n);
    search.expand(&mut c, &mut p, 0)
}

/// per-invocation state, all over renamed positions
struct Search<'a> {
    /// masks[i]: renamed neighbors of position i
    masks: &'a [BitSet],
    /// rename[i]: vertex sitting at position i
    rename: &'a [VertexId],
    token: &'a StopToken,
    incumbent: &'a mut Incumbent,
    nodes: &'a mut u64,
    /// one coloring scratch per recursion depth
    scratch: Vec<ColorScratch>,
    /// candidate bitsets reused across frames
    pool: BufferPool,
}

impl Search<'_> {
    /// records the current clique, mapped back to vertex ids
    fn record(&mut self, c: &[usize]) {
        if c.len() > self.incumbent.len() {
            let clique: Vec<VertexId> = c.iter().map(|&i| self.rename[i]).collect();
            self.incumbent.record(&clique);
        }
    }

    fn expand(&mut self, c: &mut Vec<usize>, p: &mut BitSet, depth: usize) -> Result<()> {
        if self.token.is_triggered() {
            return Err(Error::Interrupted);
        }
        *self.nodes += 1;
        if p.is_empty() {
            self.record(c);
            return Ok(());
        }
        if c.len() + p.len() <= self.incumbent.len() {
            return Ok(());
        }
        if depth == self.scratch.len() {
            self.scratch.push(ColorScratch::default());
        }
        color_sort(self.masks, p, &mut self.scratch[depth]);
        let nb_candidates = self.scratch[depth].order.len();
        for i in (0..nb_candidates).rev() {
            // every remaining candidate has a color at most this one
            if c.len() + self.scratch[depth].colors[i] <= self.incumbent.len() {
                return Ok(());
            }
            let v = self.scratch[depth].order[i];
            let mut child = self.pool.acquire();
            child.union_with(p);
            child.intersect_with(&self.masks[v]);
            c.push(v);
            let status = if child.is_empty() {
                self.record(c);
                Ok(())
            } else {
                self.expand(c, &mut child, depth + 1)
            };
            c.pop();
            self.pool.release(child);
            status?;
            p.remove(v);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(graph: &Graph) -> (Vec<VertexId>, u64) {
        let token = StopToken::none();
        let mut incumbent = Incumbent::default();
        let mut nodes = 0;
        maximum_clique(graph, &token, &mut incumbent, &mut nodes).unwrap();
        let mut clique = incumbent.clique().to_vec();
        clique.sort_unstable();
        (clique, nodes)
    }

    #[test]
    fn test_renaming_maps_the_clique_back() {
        // the K3 sits on high ids so the renaming actually permutes
        let g = Graph::from_edges(6, vec![(0, 1), (3, 4), (3, 5), (4, 5)]).unwrap();
        let (clique, _) = run(&g);
        assert_eq!(clique, vec![3, 4, 5]);
    }

    #[test]
    fn test_wheel_graph() {
        // cycle 1..6 plus hub 0: maximum clique is a triangle with the hub
        let edges = vec![
            (1, 2), (2, 3), (3, 4), (4, 5), (5, 1),
            (0, 1), (0, 2), (0, 3), (0, 4), (0, 5),
        ];
        let g = Graph::from_edges(6, edges).unwrap();
        let (clique, _) = run(&g);
        assert_eq!(clique.len(), 3);
        assert!(g.is_clique(&clique));
        assert!(clique.contains(&0));
    }

    #[test]
    fn test_two_clique_instance() {
        let mut edges = vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        edges.extend_from_slice(&[(4, 5), (4, 6), (5, 6)]);
        let g = Graph::from_edges(7, edges).unwrap();
        assert_eq!(run(&g).0, vec![0, 1, 2, 3]);
    }
}
