use bit_set::BitSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Graph, VertexId};
use crate::search::greedy::greedy_clique;
use crate::stopping::StopToken;

/** tuning knobs of the annealing seed producer */
#[derive(Debug, Clone, Copy)]
pub struct AnnealingParams {
    /// starting temperature
    pub initial_temperature: f64,
    /// geometric cooling factor, in (0,1)
    pub cooling_rate: f64,
    /// number of proposed moves
    pub nb_iterations: usize,
    /// rng seed (runs are deterministic for a fixed seed)
    pub seed: u64,
}

impl Default for AnnealingParams {
    fn default() -> Self {
        Self {
            initial_temperature: 100.,
            cooling_rate: 0.995,
            nb_iterations: 10_000,
            seed: 0,
        }
    }
}

/** simulated annealing seed producer.

Starts from the greedy clique and walks the space of valid cliques with
three moves: drop a random vertex, add a vertex of the common
neighborhood, or swap (drop one, then add one that became available).
Improving moves are always accepted, degrading ones with probability
exp(Δ/T) under a geometrically cooled temperature. Every visited solution
is a clique by construction; the best one seen is returned, so the result
is never worse than the greedy seed. */
pub fn annealing_clique(graph: &Graph, params: &AnnealingParams, token: &StopToken) -> Vec<VertexId> {
    let n = graph.nb_vertices();
    let mut best = greedy_clique(graph);
    if n == 0 {
        return best;
    }
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut current = best.clone();
    let mut temperature = params.initial_temperature;
    for _ in 0..params.nb_iterations {
        if token.is_triggered() {
            break;
        }
        let candidate = propose(graph, &current, &mut rng);
        let delta = candidate.len() as f64 - current.len() as f64;
        if delta >= 0. || rng.gen::<f64>() < (delta / temperature).exp() {
            current = candidate;
            if current.len() > best.len() {
                best = current.clone();
            }
        }
        temperature *= params.cooling_rate;
    }
    best
}

/// common neighborhood of a clique
fn common_neighbors(graph: &Graph, clique: &[VertexId]) -> BitSet {
    let mut common = crate::bitset::full_set(graph.nb_vertices());
    for &v in clique {
        common.remove(v);
        common.intersect_with(graph.neighbor_mask(v));
    }
    common
}

/// proposes a neighbor solution (always a valid clique)
fn propose(graph: &Graph, current: &[VertexId], rng: &mut StdRng) -> Vec<VertexId> {
    let mut neighbor = current.to_vec();
    match rng.gen_range(0..3u8) {
        0 => {
            // drop a random vertex
            if !neighbor.is_empty() {
                let i = rng.gen_range(0..neighbor.len());
                neighbor.swap_remove(i);
            }
        }
        1 => {
            // add a random extension vertex if one exists
            let extension = common_neighbors(graph, &neighbor);
            if let Some(v) = pick(&extension, rng) {
                neighbor.push(v);
            }
        }
        _ => {
            // swap: drop one vertex, then add one that became available
            if !neighbor.is_empty() {
                let i = rng.gen_range(0..neighbor.len());
                let dropped = neighbor.swap_remove(i);
                let mut extension = common_neighbors(graph, &neighbor);
                extension.remove(dropped);
                if let Some(v) = pick(&extension, rng) {
                    neighbor.push(v);
                } else {
                    neighbor.push(dropped);
                }
            }
        }
    }
    neighbor
}

/// uniform pick among the elements of a bitset
fn pick(set: &BitSet, rng: &mut StdRng) -> Option<VertexId> {
    let size = set.len();
    if size == 0 {
        return None;
    }
    set.iter().nth(rng.gen_range(0..size))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seed: u64) -> AnnealingParams {
        AnnealingParams {
            nb_iterations: 2_000,
            seed,
            ..AnnealingParams::default()
        }
    }

    fn planted() -> Graph {
        // K5 on {0..4} plus a cycle through the rest
        let mut edges = Vec::new();
        for u in 0..5 {
            for v in (u + 1)..5 {
                edges.push((u, v));
            }
        }
        edges.extend_from_slice(&[(4, 5), (5, 6), (6, 7), (7, 8), (8, 4)]);
        Graph::from_edges(9, edges).unwrap()
    }

    #[test]
    fn test_result_is_a_valid_clique() {
        let g = planted();
        let clique = annealing_clique(&g, &params(3), &StopToken::none());
        assert!(g.is_clique(&clique));
        assert_eq!(clique.len(), 5);
    }

    #[test]
    fn test_never_worse_than_greedy() {
        let g = planted();
        let greedy = greedy_clique(&g);
        let clique = annealing_clique(&g, &params(11), &StopToken::none());
        assert!(clique.len() >= greedy.len());
    }

    #[test]
    fn test_deterministic_for_a_fixed_seed() {
        let g = planted();
        let a = annealing_clique(&g, &params(42), &StopToken::none());
        let b = annealing_clique(&g, &params(42), &StopToken::none());
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::from_edges(0, vec![]).unwrap();
        assert!(annealing_clique(&g, &AnnealingParams::default(), &StopToken::none()).is_empty());
    }
}
