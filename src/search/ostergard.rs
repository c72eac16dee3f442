use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::search::Incumbent;
use crate::stopping::StopToken;

/** Östergård-style branch & bound with a dynamic coloring bound.

The root candidate list is the whole vertex set sorted by decreasing
degree. Each node colors its candidates greedily in list order (first
available color), then branches in reverse color order, so the prune
`|R| + color ≤ |best|` cuts all remaining branches of the node at once.
Candidate sets live in plain vectors, one per frame; children keep the
emission order of their parent. */
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
    let mut root: Vec<VertexId> = (0..n).collect();
    root.sort_unstable_by(|&a, &b| {
        let da = graph.neighbor_mask(a).len();
        let db = graph.neighbor_mask(b).len();
        db.cmp(&da).then(a.cmp(&b))
    });
    let mut search = Search { graph, token, incumbent, nodes };
    let mut r = Vec::new();
    search.expand(&mut r, root)
}

/// per-invocation state of the branch & bound
struct Search<'a> {
    graph: &'a Graph,
    token: &'a StopToken,
    incumbent: &'a mut Incumbent,
    nodes: &'a mut u64,
}

impl Search<'_> {
    /** colors the candidates greedily in list order and returns them class
    by class: `(order, colors)` with colors non-decreasing, starting at 1.
    A clique inside `p` takes at most one vertex per class, so the last
    color bounds ω(G[p]). */
    fn color_classes(&self, p: &[VertexId]) -> (Vec<VertexId>, Vec<usize>) {
        let mut classes: Vec<Vec<VertexId>> = Vec::new();
        for &v in p {
            let mask = self.graph.neighbor_mask(v);
            match classes.iter_mut().find(|class| class.iter().all(|&u| !mask.contains(u))) {
                Some(class) => class.push(v),
                None => classes.push(vec![v]),
            }
        }
        let mut order = Vec::with_capacity(p.len());
        let mut colors = Vec::with_capacity(p.len());
        for (c, class) in classes.iter().enumerate() {
            for &v in class {
                order.push(v);
                colors.push(c + 1);
            }
        }
        (order, colors)
    }

    fn expand(&mut self, r: &mut Vec<VertexId>, p: Vec<VertexId>) -> Result<()> {
        if self.token.is_triggered() {
            return Err(Error::Interrupted);
        }
        *self.nodes += 1;
        self.incumbent.record(r);
        if p.is_empty() || r.len() + p.len() <= self.incumbent.len() {
            return Ok(());
        }
        let (order, colors) = self.color_classes(&p);
        for i in (0..order.len()).rev() {
            // the bound holds for this vertex and every remaining one
            if r.len() + colors[i] <= self.incumbent.len() {
                return Ok(());
            }
            let v = order[i];
            let mask = self.graph.neighbor_mask(v);
            let child: Vec<VertexId> = order[..i].iter().copied().filter(|&u| mask.contains(u)).collect();
            r.push(v);
            let status = self.expand(r, child);
            r.pop();
            status?;
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
    fn test_k5_minus_an_edge() {
        let mut edges = Vec::new();
        for u in 0..5 {
            for v in (u + 1)..5 {
                if (u, v) != (0, 1) {
                    edges.push((u, v));
                }
            }
        }
        let g = Graph::from_edges(5, edges).unwrap();
        let (clique, _) = run(&g);
        assert_eq!(clique.len(), 4);
        assert!(g.is_clique(&clique));
    }

    #[test]
    fn test_bipartite_graph() {
        let mut edges = Vec::new();
        for i in 0..4 {
            for j in 4..8 {
                edges.push((i, j));
            }
        }
        let g = Graph::from_edges(8, edges).unwrap();
        assert_eq!(run(&g).0.len(), 2);
    }

    #[test]
    fn test_two_clique_instance() {
        let mut edges = vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        edges.extend_from_slice(&[(4, 5), (4, 6), (5, 6)]);
        let g = Graph::from_edges(7, edges).unwrap();
        let (clique, nodes) = run(&g);
        assert_eq!(clique, vec![0, 1, 2, 3]);
        assert!(nodes > 0);
    }

    #[test]
    fn test_color_classes_bound_the_clique_number() {
        let mut edges = vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        edges.extend_from_slice(&[(4, 5), (4, 6), (5, 6)]);
        let g = Graph::from_edges(7, edges).unwrap();
        let token = StopToken::none();
        let mut incumbent = Incumbent::default();
        let mut nodes = 0;
        let search = Search {
            graph: &g,
            token: &token,
            incumbent: &mut incumbent,
            nodes: &mut nodes,
        };
        let (order, colors) = search.color_classes(&(0..7).collect::<Vec<_>>());
        assert_eq!(order.len(), 7);
        assert!(colors.windows(2).all(|w| w[0] <= w[1]));
        assert!(*colors.last().unwrap() >= 4); // ω = 4
    }
}
