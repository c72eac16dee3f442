use std::time::Duration;

use clap::ArgMatches;

use crate::dimacs::{self, Dataset};
use crate::error::{Error, Result};
use crate::search::Algorithm;

/** everything the benchmark driver needs, read from the command line */
#[derive(Debug)]
pub struct Params {
    /// path of the instance file
    pub inst_name: String,
    /// loaded instance
    pub dataset: Dataset,
    /// per-algorithm time budget (no implicit timeout when absent)
    pub time_budget: Option<Duration>,
    /// exact algorithms to run
    pub algorithms: Vec<Algorithm>,
    /// CSV output file
    pub output: Option<String>,
    /// JSON performance statistics file
    pub perf: Option<String>,
}

/** reads command line input: the instance, the optional time budget, the
algorithm selection, and the output files. */
pub fn read_params(main_args: &ArgMatches) -> Result<Params> {
    let inst_name = main_args.value_of("instance").unwrap().to_string();
    let dataset = dimacs::load_from_file(&inst_name)?;
    let time_budget = parse_time_budget(main_args.value_of("time"))?;
    let algorithms = parse_algorithms(main_args.value_of("algorithms"))?;
    let output = main_args.value_of("output").map(str::to_string);
    let perf = main_args.value_of("perf").map(str::to_string);
    Ok(Params { inst_name, dataset, time_budget, algorithms, output, perf })
}

/// comma-separated algorithm names; all of them when absent
pub fn parse_algorithms(arg: Option<&str>) -> Result<Vec<Algorithm>> {
    match arg {
        None => Ok(Algorithm::ALL.to_vec()),
        Some(list) => list
            .split(',')
            .map(|name| {
                Algorithm::from_name(name.trim()).ok_or_else(|| {
                    Error::InvalidInput(format!("unknown algorithm `{}`", name.trim()))
                })
            })
            .collect(),
    }
}

/// time budget in seconds, possibly fractional
pub fn parse_time_budget(arg: Option<&str>) -> Result<Option<Duration>> {
    match arg {
        None => Ok(None),
        Some(text) => {
            let seconds: f64 = text
                .parse()
                .map_err(|_| Error::InvalidInput(format!("cannot parse the time `{}`", text)))?;
            if seconds < 0. {
                return Err(Error::InvalidInput(format!("negative time budget `{}`", text)));
            }
            Ok(Some(Duration::from_secs_f64(seconds)))
        }
    }
}

/// instance name shown in result tables: the file stem of its path
pub fn dataset_name(inst_name: &str) -> String {
    std::path::Path::new(inst_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| inst_name.to_string())
}
