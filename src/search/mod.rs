//! Maximum clique search: exact branch & bound variants and seed heuristics.

/// greedy seed clique (primes the incumbent lower bound)
pub mod greedy;

/// randomized restart + plateau search seed producer
pub mod multistart;

/// simulated annealing seed producer
pub mod annealing;

/// naive Bron-Kerbosch reference enumerator
pub mod bron_kerbosch;

/// max-cover pivot selection
pub mod pivot;

/// greedy coloring upper bound
pub mod coloring;

/// shared R/P/X recursion core for the pivot-based variants
pub mod skeleton;

/// pivoted enumerator over the whole vertex set
pub mod tomita;

/// degeneracy-ordered outer loop driving the pivoted core
pub mod degeneracy;

/// coloring-bounded branch & bound on vertex lists
pub mod ostergard;

/// bitset branch & bound with coloring and vertex reordering
pub mod bbmc;

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::stopping::StopToken;

/** the exact algorithms of the suite. All of them return a clique of
maximum cardinality; which witness of that cardinality they return is
their own (deterministic) business. */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// plain Bron-Kerbosch with size pruning, vertex lists
    BronKerbosch,
    /// Bron-Kerbosch with a max-cover pivot, bitsets
    Tomita,
    /// degeneracy-ordered outer loop around the pivoted core
    Degeneracy,
    /// Östergård-style branch & bound with a coloring bound
    Ostergard,
    /// San Segundo-style bitset branch & bound (coloring + reordering)
    Bbmc,
}

impl Algorithm {
    /// every exact algorithm, in benchmark order
    pub const ALL: [Algorithm; 5] = [
        Algorithm::BronKerbosch,
        Algorithm::Tomita,
        Algorithm::Degeneracy,
        Algorithm::Ostergard,
        Algorithm::Bbmc,
    ];

    /// short name used on the command line and in result tables
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BronKerbosch => "bron_kerbosch",
            Algorithm::Tomita => "tomita",
            Algorithm::Degeneracy => "degeneracy",
            Algorithm::Ostergard => "ostergard",
            Algorithm::Bbmc => "bbmc",
        }
    }

    /// inverse of [`Algorithm::name`]
    pub fn from_name(name: &str) -> Option<Self> {
        Algorithm::ALL.iter().copied().find(|a| a.name() == name)
    }
}

/** order in which the branching vertices of a node are processed, for the
variants whose branching order is free (the coloring-bounded variants must
branch in reverse color order for their pruning to be sound). */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOrder {
    /// increasing vertex id
    Natural,
    /// decreasing number of candidate neighbors, ties by increasing id
    DegreeDesc,
}

impl Default for BranchOrder {
    fn default() -> Self {
        BranchOrder::Natural
    }
}

/** per-invocation options */
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// cancellation / deadline token, polled between search nodes
    pub token: StopToken,
    /// clique priming the incumbent (must be valid); greedy seed if absent
    pub seed: Option<Vec<VertexId>>,
    /// branching order override for the variants that accept one
    pub order: Option<BranchOrder>,
}

/** per-invocation counters */
#[derive(Debug, Clone, Copy)]
pub struct SearchStats {
    /// number of search nodes expanded
    pub nodes: u64,
    /// true iff the search ran to completion (the clique size is optimal)
    pub proven: bool,
}

/** result of a search: the best clique found and the run counters. When
`stats.proven` is false the search was interrupted and the clique is the
incumbent at interruption time (still a valid clique). */
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// best clique found, sorted by vertex id
    pub clique: Vec<VertexId>,
    /// run counters
    pub stats: SearchStats,
}

/** incumbent clique of one invocation. Its size never decreases: a
recorded clique replaces the current one only when strictly larger. */
#[derive(Debug, Clone, Default)]
pub struct Incumbent {
    /// best clique known so far
    best: Vec<VertexId>,
}

impl Incumbent {
    /// incumbent primed with a seed clique
    pub fn with_seed(seed: Vec<VertexId>) -> Self {
        Self { best: seed }
    }

    /// size of the best clique known so far
    pub fn len(&self) -> usize {
        self.best.len()
    }

    /// true iff no clique has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// records a clique if strictly larger than the current best
    pub fn record(&mut self, clique: &[VertexId]) -> bool {
        if clique.len() > self.best.len() {
            self.best = clique.to_vec();
            true
        } else {
            false
        }
    }

    /// best clique known so far
    pub fn clique(&self) -> &[VertexId] {
        &self.best
    }

    /// consumes the incumbent, sorted by vertex id
    fn into_clique(mut self) -> Vec<VertexId> {
        self.best.sort_unstable();
        self.best
    }
}

/** runs one exact algorithm on a graph and returns the best clique found
together with the node counter and the `proven` flag.

The incumbent is primed with `options.seed` when present (it must be a
valid clique, otherwise [`Error::InvalidInput`]), with the greedy seed
clique otherwise. An interruption of the token is not an error: the
incumbent at that point is returned with `proven = false`. */
pub fn find_maximum_clique(
    graph: &Graph,
    algorithm: Algorithm,
    options: &SearchOptions,
) -> Result<SearchOutcome> {
    let seed = match &options.seed {
        Some(seed) => {
            if !graph.is_clique(seed) {
                return Err(Error::InvalidInput("seed is not a clique".to_string()));
            }
            seed.clone()
        }
        None => greedy::greedy_clique(graph),
    };
    let mut incumbent = Incumbent::with_seed(seed);
    let mut nodes = 0u64;
    let order = options.order.unwrap_or_default();
    let run = match algorithm {
        Algorithm::BronKerbosch => {
            bron_kerbosch::maximum_clique(graph, &options.token, &mut incumbent, &mut nodes)
        }
        Algorithm::Tomita => {
            tomita::maximum_clique(graph, &options.token, &mut incumbent, &mut nodes, order)
        }
        Algorithm::Degeneracy => {
            degeneracy::maximum_clique(graph, &options.token, &mut incumbent, &mut nodes)
        }
        Algorithm::Ostergard => {
            ostergard::maximum_clique(graph, &options.token, &mut incumbent, &mut nodes)
        }
        Algorithm::Bbmc => {
            bbmc::maximum_clique(graph, &options.token, &mut incumbent, &mut nodes)
        }
    };
    let proven = match run {
        Ok(()) => true,
        Err(Error::Interrupted) => false,
        Err(e) => return Err(e),
    };
    Ok(SearchOutcome {
        clique: incumbent.into_clique(),
        stats: SearchStats { nodes, proven },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopping::StopToken;
    use std::collections::HashSet;

    fn solve(graph: &Graph, algorithm: Algorithm) -> SearchOutcome {
        find_maximum_clique(graph, algorithm, &SearchOptions::default()).unwrap()
    }

    fn check_all_variants(graph: &Graph, expected_size: usize) {
        for &algorithm in &Algorithm::ALL {
            let outcome = solve(graph, algorithm);
            assert!(
                graph.is_clique(&outcome.clique),
                "{} returned an invalid clique {:?}",
                algorithm.name(),
                outcome.clique
            );
            assert_eq!(
                outcome.clique.len(),
                expected_size,
                "{} returned size {} instead of {}",
                algorithm.name(),
                outcome.clique.len(),
                expected_size
            );
            assert!(outcome.stats.proven);
        }
    }

    fn triangle() -> Graph {
        Graph::from_edges(3, vec![(0, 1), (0, 2), (1, 2)]).unwrap()
    }

    fn two_cliques() -> Graph {
        // K4 on {0..3} plus a disjoint K3 on {4,5,6}
        let edges = vec![
            (0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3),
            (4, 5), (4, 6), (5, 6),
        ];
        Graph::from_edges(7, edges).unwrap()
    }

    /// K8 on {0..7} plus 22 noise vertices wired with probability 0.3
    fn planted() -> Graph {
        let n = 30;
        let mut rng = fastrand::Rng::with_seed(0xC11C);
        let mut edges = Vec::new();
        for u in 0..8 {
            for v in (u + 1)..8 {
                edges.push((u, v));
            }
        }
        for u in 0..n {
            for v in (u + 1).max(8)..n {
                if rng.f64() < 0.3 {
                    edges.push((u, v));
                }
            }
        }
        Graph::from_edges(n, edges).unwrap()
    }

    #[test]
    fn test_triangle() {
        let g = triangle();
        for &algorithm in &Algorithm::ALL {
            assert_eq!(solve(&g, algorithm).clique, vec![0, 1, 2]);
        }
    }

    #[test]
    fn test_path_p5() {
        let g = Graph::from_edges(5, vec![(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        check_all_variants(&g, 2);
    }

    #[test]
    fn test_disjoint_k4_k3() {
        let g = two_cliques();
        for &algorithm in &Algorithm::ALL {
            let outcome = solve(&g, algorithm);
            assert_eq!(
                outcome.clique,
                vec![0, 1, 2, 3],
                "{} must find the K4",
                algorithm.name()
            );
        }
    }

    #[test]
    fn test_complete_bipartite_k33() {
        let mut edges = Vec::new();
        for i in 0..3 {
            for j in 3..6 {
                edges.push((i, j));
            }
        }
        let g = Graph::from_edges(6, edges).unwrap();
        check_all_variants(&g, 2);
    }

    #[test]
    fn test_planted_clique_with_noise() {
        let g = planted();
        assert!(g.is_clique(&[0, 1, 2, 3, 4, 5, 6, 7]));
        let reference = solve(&g, Algorithm::BronKerbosch);
        assert!(reference.clique.len() >= 8);
        for &algorithm in &Algorithm::ALL {
            let outcome = solve(&g, algorithm);
            assert!(g.is_clique(&outcome.clique));
            assert_eq!(outcome.clique.len(), reference.clique.len());
        }
    }

    #[test]
    fn test_single_vertex() {
        let g = Graph::from_edges(1, vec![]).unwrap();
        for &algorithm in &Algorithm::ALL {
            assert_eq!(solve(&g, algorithm).clique, vec![0]);
        }
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::from_edges(0, vec![]).unwrap();
        for &algorithm in &Algorithm::ALL {
            let outcome = solve(&g, algorithm);
            assert!(outcome.clique.is_empty());
            assert!(outcome.stats.proven);
        }
    }

    #[test]
    fn test_permutation_invariance() {
        let g = two_cliques();
        // relabel v -> 6 - v
        let permuted: Vec<(usize, usize)> =
            g.edges().iter().map(|&(u, v)| (6 - u, 6 - v)).collect();
        let h = Graph::from_edges(7, permuted).unwrap();
        for &algorithm in &Algorithm::ALL {
            let outcome = solve(&h, algorithm);
            assert_eq!(outcome.clique.len(), 4);
            assert!(h.is_clique(&outcome.clique));
            // the image of the K4 under the relabeling
            let expected: HashSet<usize> = [6, 5, 4, 3].iter().copied().collect();
            assert_eq!(outcome.clique.iter().copied().collect::<HashSet<_>>(), expected);
        }
    }

    #[test]
    fn test_seed_does_not_change_optimum() {
        let g = two_cliques();
        for &algorithm in &Algorithm::ALL {
            let options = SearchOptions {
                seed: Some(vec![4, 5, 6]),
                ..SearchOptions::default()
            };
            let outcome = find_maximum_clique(&g, algorithm, &options).unwrap();
            assert_eq!(outcome.clique.len(), 4, "{}", algorithm.name());
        }
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        let g = triangle();
        let options = SearchOptions {
            seed: Some(vec![0, 1, 5]),
            ..SearchOptions::default()
        };
        assert!(matches!(
            find_maximum_clique(&g, Algorithm::Tomita, &options),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cancelled_token_returns_valid_unproven_clique() {
        let g = planted();
        let (token, handle) = StopToken::cancellable();
        handle.cancel();
        for &algorithm in &Algorithm::ALL {
            let options = SearchOptions {
                token: token.clone(),
                ..SearchOptions::default()
            };
            let outcome = find_maximum_clique(&g, algorithm, &options).unwrap();
            assert!(!outcome.stats.proven, "{}", algorithm.name());
            assert!(g.is_clique(&outcome.clique));
            // the greedy seed survives the interruption
            assert!(!outcome.clique.is_empty());
        }
    }

    #[test]
    fn test_reruns_are_bit_identical() {
        let g = planted();
        for &algorithm in &Algorithm::ALL {
            let a = solve(&g, algorithm);
            let b = solve(&g, algorithm);
            assert_eq!(a.clique, b.clique, "{}", algorithm.name());
            assert_eq!(a.stats.nodes, b.stats.nodes, "{}", algorithm.name());
        }
    }

    #[test]
    fn test_order_override_keeps_the_optimum() {
        let g = planted();
        let options = SearchOptions {
            order: Some(BranchOrder::DegreeDesc),
            ..SearchOptions::default()
        };
        let base = solve(&g, Algorithm::Tomita);
        let reordered = find_maximum_clique(&g, Algorithm::Tomita, &options).unwrap();
        assert_eq!(base.clique.len(), reordered.clique.len());
    }

    #[test]
    fn test_incumbent_is_monotone() {
        let mut incumbent = Incumbent::with_seed(vec![0, 1]);
        assert!(!incumbent.record(&[5]));
        assert_eq!(incumbent.len(), 2);
        assert!(!incumbent.record(&[7, 8]));
        assert_eq!(incumbent.clique(), &[0, 1]);
        assert!(incumbent.record(&[3, 4, 5]));
        assert_eq!(incumbent.len(), 3);
    }

    #[test]
    fn test_end_to_end_on_instance_files() {
        let data = crate::dimacs::load_from_file("insts/two-cliques.col").unwrap();
        for &algorithm in &Algorithm::ALL {
            let outcome = solve(&data.graph, algorithm);
            assert_eq!(outcome.clique.len(), 4, "{}", algorithm.name());
            // the K4 lives on input ids 1..4
            assert_eq!(data.render_original(&outcome.clique), vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_algorithm_names_roundtrip() {
        for &algorithm in &Algorithm::ALL {
            assert_eq!(Algorithm::from_name(algorithm.name()), Some(algorithm));
        }
        assert_eq!(Algorithm::from_name("gpu"), None);
    }
}
