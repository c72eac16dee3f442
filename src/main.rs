//! Benchmark driver: runs the seed heuristics and the exact algorithms on
//! one instance, prints one line per algorithm and optionally writes the
//! CSV table and the JSON statistics.

// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]

use std::time::Instant;

use clap::{load_yaml, App};

use clique_bench::error::{Error, Result};
use clique_bench::graph::{Graph, VertexId};
use clique_bench::report::{self, BenchRecord};
use clique_bench::search::annealing::{annealing_clique, AnnealingParams};
use clique_bench::search::greedy::greedy_clique;
use clique_bench::search::multistart::multistart_clique;
use clique_bench::search::{find_maximum_clique, SearchOptions};
use clique_bench::stopping::StopToken;
use clique_bench::util::{self, Params};

/// rng seed of the stochastic heuristics (fixed: benchmark runs must be reproducible)
const HEURISTIC_SEED: u64 = 0;

/// restarts of the multistart heuristic
const NB_RESTARTS: usize = 50;

/// plateau moves per restart
const NB_SWAPS: usize = 100;

pub fn main() {
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let params = match util::read_params(&main_args) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = run(&params) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// one benchmark row built from a finished run
fn record(
    params: &Params,
    graph: &Graph,
    algorithm: &str,
    clique: &[VertexId],
    time_us: u128,
    proven: bool,
) -> BenchRecord {
    BenchRecord {
        dataset: util::dataset_name(&params.inst_name),
        algorithm: algorithm.to_string(),
        time_us,
        clique_size: clique.len(),
        num_vertices: graph.nb_vertices(),
        num_edges: graph.nb_edges(),
        density: graph.density(),
        valid: graph.is_clique(clique),
        proven,
    }
}

fn run(params: &Params) -> Result<()> {
    let graph = &params.dataset.graph;
    println!("instance: {}", params.inst_name);
    graph.display_statistics();
    println!("=======================");
    let mut records = Vec::new();
    // seed heuristics first: they provide the lower bounds the exact runs start from
    let token = match params.time_budget {
        Some(budget) => StopToken::with_timeout(budget),
        None => StopToken::none(),
    };
    {
        let mut run_heuristic = |name: &str, clique: Vec<VertexId>, t_start: Instant| {
            let time_us = t_start.elapsed().as_micros();
            println!(
                "{} \t size {} \t {:.3}s \t valid {}",
                name,
                clique.len(),
                time_us as f64 / 1e6,
                graph.is_clique(&clique)
            );
            records.push(record(params, graph, name, &clique, time_us, false));
        };
        let t_start = Instant::now();
        run_heuristic("greedy", greedy_clique(graph), t_start);
        let t_start = Instant::now();
        run_heuristic(
            "multistart",
            multistart_clique(graph, NB_RESTARTS, NB_SWAPS, HEURISTIC_SEED, &token),
            t_start,
        );
        let t_start = Instant::now();
        let annealing_params = AnnealingParams { seed: HEURISTIC_SEED, ..AnnealingParams::default() };
        run_heuristic(
            "annealing",
            annealing_clique(graph, &annealing_params, &token),
            t_start,
        );
    }
    // exact algorithms
    for &algorithm in &params.algorithms {
        let options = SearchOptions {
            token: match params.time_budget {
                Some(budget) => StopToken::with_timeout(budget),
                None => StopToken::none(),
            },
            ..SearchOptions::default()
        };
        let t_start = Instant::now();
        let outcome = find_maximum_clique(graph, algorithm, &options)?;
        let time_us = t_start.elapsed().as_micros();
        println!(
            "{} \t size {} \t {:.3}s \t valid {} \t proven {} \t {} nodes",
            algorithm.name(),
            outcome.clique.len(),
            time_us as f64 / 1e6,
            graph.is_clique(&outcome.clique),
            outcome.stats.proven,
            outcome.stats.nodes
        );
        records.push(record(
            params,
            graph,
            algorithm.name(),
            &outcome.clique,
            time_us,
            outcome.stats.proven,
        ));
    }
    if let Some(output) = &params.output {
        report::write_csv(output, &records)
            .map_err(|e| Error::InvalidInput(format!("cannot write {}: {}", output, e)))?;
        println!("results written to {}", output);
    }
    if let Some(perf) = &params.perf {
        let stats = report::stats_json(&params.inst_name, &records);
        report::export_stats(perf, &stats)
            .map_err(|e| Error::InvalidInput(format!("cannot write {}: {}", perf, e)))?;
        println!("statistics written to {}", perf);
    }
    Ok(())
}
