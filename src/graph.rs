use bit_set::BitSet;

use crate::error::{Error, Result};

/** Vertex Id */
pub type VertexId = usize;

/** models an undirected simple graph.

Two equivalent representations are materialized on construction:
 - adj_list[i]: sorted list of the vertices adjacent to i (fast iteration)
 - adj_matrix[i]: bitset of the neighbors of i (O(1) edge test, word-parallel
   set operations in the solvers)

The graph is immutable once built. Self-loops and duplicate edges of the
input sequence are dropped during construction. */
#[derive(Debug, Clone)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// edges of the graph (u < v)
    edges: Vec<(VertexId, VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i, increasing
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i]: bitset of the neighbors of i
    adj_matrix: Vec<BitSet>,
}

impl Graph {
    /** constructor from an edge sequence over vertices [0,n).
    Ignores self-loops and duplicate edges (in either direction).
    Fails with [`Error::OutOfRange`] if an endpoint is ≥ n. */
    pub fn from_edges<I>(n: usize, edge_iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut adj_matrix = vec![BitSet::with_capacity(n); n];
        let mut m = 0;
        for (u, v) in edge_iter {
            if u >= n {
                return Err(Error::OutOfRange(u));
            }
            if v >= n {
                return Err(Error::OutOfRange(v));
            }
            if u == v || adj_matrix[u].contains(v) {
                continue; // self-loop or already known
            }
            adj_matrix[u].insert(v);
            adj_matrix[v].insert(u);
            m += 1;
        }
        let adj_list: Vec<Vec<VertexId>> = adj_matrix
            .iter()
            .map(|mask| mask.iter().collect())
            .collect();
        let edges = Self::build_edges(&adj_list);
        Ok(Self { n, m, edges, adj_list, adj_matrix })
    }

    /// builds the (u < v) edge list
    fn build_edges(adj_list: &[Vec<VertexId>]) -> Vec<(VertexId, VertexId)> {
        let mut res = Vec::new();
        for (i, l) in adj_list.iter().enumerate() {
            for j in l {
                if i < *j {
                    res.push((i, *j));
                }
            }
        }
        res
    }

    /// returns the number of vertices in the graph
    pub fn nb_vertices(&self) -> usize { self.n }

    /// returns the number of edges in the graph
    pub fn nb_edges(&self) -> usize { self.m }

    /** returns true iff u and v are adjacent.
    Reflexive queries and out-of-range endpoints answer false. */
    pub fn are_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        u < self.n && v < self.n && self.adj_matrix[u].contains(v)
    }

    /// returns the neighbors of vertex u, increasing
    pub fn neighbors(&self, u: VertexId) -> Result<&[VertexId]> {
        self.adj_list.get(u).map(|l| l.as_slice()).ok_or(Error::OutOfRange(u))
    }

    /// number of neighbors of vertex u
    pub fn degree(&self, u: VertexId) -> Result<usize> {
        self.adj_list.get(u).map(|l| l.len()).ok_or(Error::OutOfRange(u))
    }

    /** bitset of the neighbors of u. The caller must pass a vertex of the
    graph; the solvers only ever query vertices they obtained from it. */
    pub fn neighbor_mask(&self, u: VertexId) -> &BitSet {
        &self.adj_matrix[u]
    }

    /// one neighbor bitset per vertex, indexed by vertex id
    pub fn adjacency_masks(&self) -> &[BitSet] {
        &self.adj_matrix
    }

    /// returns all edges of the graph (u < v)
    pub fn edges(&self) -> &[(VertexId, VertexId)] {
        &self.edges
    }

    /// 2m / n(n-1) for n ≥ 2, otherwise 0
    pub fn density(&self) -> f64 {
        if self.n < 2 {
            return 0.;
        }
        (2. * self.m as f64) / (self.n as f64 * (self.n as f64 - 1.))
    }

    /** degeneracy ordering: repeatedly remove a vertex of minimum residual
    degree. Bucket queue, O(n+m). Within a degree bucket, vertices leave in
    reverse arrival order, which is deterministic for a given input numbering. */
    pub fn degeneracy_ordering(&self) -> Vec<VertexId> {
        self.peel().0
    }

    /** degeneracy d of the graph: the maximum, over removals of the
    degeneracy ordering, of the residual degree of the removed vertex. */
    pub fn degeneracy(&self) -> usize {
        self.peel().1
    }

    /// min-degree peeling; returns (ordering, degeneracy)
    fn peel(&self) -> (Vec<VertexId>, usize) {
        let n = self.n;
        if n == 0 {
            return (Vec::new(), 0);
        }
        let mut degrees: Vec<usize> = self.adj_list.iter().map(Vec::len).collect();
        let max_degree = degrees.iter().copied().max().unwrap_or(0);
        // bins[d]: vertices whose residual degree was d when pushed; entries
        // go stale when a later removal lowers the degree again
        let mut bins: Vec<Vec<VertexId>> = vec![Vec::new(); max_degree + 1];
        for v in (0..n).rev() {
            bins[degrees[v]].push(v);
        }
        let mut removed = BitSet::with_capacity(n);
        let mut ordering = Vec::with_capacity(n);
        let mut degeneracy = 0;
        let mut d = 0;
        while ordering.len() < n {
            while d <= max_degree && bins[d].is_empty() {
                d += 1;
            }
            if d > max_degree {
                break;
            }
            let v = match bins[d].pop() {
                Some(v) => v,
                None => break,
            };
            if removed.contains(v) || degrees[v] != d {
                continue; // stale entry
            }
            removed.insert(v);
            ordering.push(v);
            degeneracy = degeneracy.max(d);
            for &u in &self.adj_list[v] {
                if !removed.contains(u) {
                    degrees[u] -= 1;
                    bins[degrees[u]].push(u);
                    if degrees[u] < d {
                        d = degrees[u];
                    }
                }
            }
        }
        (ordering, degeneracy)
    }

    /** returns true iff the given vertices are pairwise adjacent.
    A repeated vertex makes the check fail (a clique is a set). O(k²). */
    pub fn is_clique(&self, clique: &[VertexId]) -> bool {
        for (i, &u) in clique.iter().enumerate() {
            for &v in &clique[i + 1..] {
                if !self.are_adjacent(u, v) {
                    return false;
                }
            }
        }
        true
    }

    /// displays various information about the graph
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        let degrees: Vec<usize> = self.adj_list.iter().map(Vec::len).collect();
        println!("\t{} \t min degree", degrees.iter().min().copied().unwrap_or(0));
        println!("\t{} \t max degree", degrees.iter().max().copied().unwrap_or(0));
        println!("\t{:.6} \t density", self.density());
        println!("\t{} \t degeneracy", self.degeneracy());
    }
}
