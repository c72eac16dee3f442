use bit_set::BitSet;

use crate::graph::{Graph, VertexId};
use crate::search::greedy::greedy_clique;
use crate::stopping::StopToken;

/** randomized multistart seed producer.

Each restart builds a clique by scanning a shuffled vertex order and
keeping every vertex compatible with the clique so far, then tries to
improve it on a plateau: extend with the common neighborhood when
possible, otherwise drop one random vertex and re-extend. The best clique
over all restarts (never worse than the plain greedy seed) is returned.
Deterministic for a fixed seed. */
pub fn multistart_clique(
    graph: &Graph,
    nb_restarts: usize,
    nb_swaps: usize,
    seed: u64,
    token: &StopToken,
) -> Vec<VertexId> {
    let n = graph.nb_vertices();
    let mut best = greedy_clique(graph);
    if n == 0 {
        return best;
    }
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut order: Vec<VertexId> = (0..n).collect();
    for _ in 0..nb_restarts {
        if token.is_triggered() {
            break;
        }
        rng.shuffle(&mut order);
        let mut clique = random_scan_clique(graph, &order);
        plateau_search(graph, &mut clique, nb_swaps, &mut rng);
        if clique.len() > best.len() {
            best = clique;
        }
    }
    best
}

/// scans the given order, keeping every vertex adjacent to the clique so far
fn random_scan_clique(graph: &Graph, order: &[VertexId]) -> Vec<VertexId> {
    let mut clique = Vec::new();
    let mut compatible = crate::bitset::full_set(graph.nb_vertices());
    for &v in order {
        if compatible.contains(v) {
            clique.push(v);
            compatible.remove(v);
            compatible.intersect_with(graph.neighbor_mask(v));
        }
    }
    clique
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

/// extend directly when possible, otherwise drop one vertex and re-extend
fn plateau_search(graph: &Graph, clique: &mut Vec<VertexId>, nb_swaps: usize, rng: &mut fastrand::Rng) {
    for _ in 0..nb_swaps {
        let mut extension = common_neighbors(graph, clique);
        while let Some(v) = crate::bitset::first_set_bit(&extension) {
            clique.push(v);
            extension.remove(v);
            extension.intersect_with(graph.neighbor_mask(v));
        }
        if clique.is_empty() {
            return;
        }
        // plateau move: drop a random vertex, the next round re-extends
        let dropped = clique.swap_remove(rng.usize(0..clique.len()));
        let mut candidate = clique.clone();
        let mut extension = common_neighbors(graph, &candidate);
        extension.remove(dropped);
        while let Some(v) = crate::bitset::first_set_bit(&extension) {
            candidate.push(v);
            extension.remove(v);
            extension.intersect_with(graph.neighbor_mask(v));
        }
        if candidate.len() > clique.len() + 1 {
            *clique = candidate;
        } else {
            clique.push(dropped); // the swap did not pay off, undo it
        }
    }
}
