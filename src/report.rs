use std::fs;
use std::io;

use serde_json::{json, Value};

/// header of the benchmark table
pub const CSV_HEADER: &str =
    "dataset,algorithm,time_us,time_ms,clique_size,num_vertices,num_edges,density,valid,proven";

/** one row of the benchmark table: one (dataset, algorithm) pair */
#[derive(Debug, Clone)]
pub struct BenchRecord {
    /// dataset name (instance file stem)
    pub dataset: String,
    /// algorithm name
    pub algorithm: String,
    /// elapsed search time in microseconds
    pub time_us: u128,
    /// size of the returned clique
    pub clique_size: usize,
    /// nb vertices of the instance
    pub num_vertices: usize,
    /// nb edges of the instance
    pub num_edges: usize,
    /// density of the instance
    pub density: f64,
    /// true iff the returned set passed the clique checker
    pub valid: bool,
    /// true iff the run completed (the size is proven optimal)
    pub proven: bool,
}

impl BenchRecord {
    /// renders the row (booleans lowercase, density with six fraction digits)
    pub fn csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{:.6},{},{}",
            self.dataset,
            self.algorithm,
            self.time_us,
            self.time_us as f64 / 1000.,
            self.clique_size,
            self.num_vertices,
            self.num_edges,
            self.density,
            self.valid,
            self.proven
        )
    }
}

/// renders the whole benchmark table
pub fn csv_table(records: &[BenchRecord]) -> String {
    let mut res = String::from(CSV_HEADER);
    res.push('\n');
    for record in records {
        res += record.csv_line().as_str();
        res.push('\n');
    }
    res
}

/// writes the benchmark table into a file
pub fn write_csv(filename: &str, records: &[BenchRecord]) -> io::Result<()> {
    fs::write(filename, csv_table(records))
}

/// performance statistics of a run, in the shape the plotting scripts read
pub fn stats_json(inst_name: &str, records: &[BenchRecord]) -> Value {
    json!({
        "inst_name": inst_name,
        "primal_list": records.iter().map(|r| r.clique_size).collect::<Vec<_>>(),
        "time_searched": records.iter().map(|r| r.time_us as f64 / 1e6).sum::<f64>(),
    })
}

/// writes the performance statistics into a file
pub fn export_stats(filename: &str, stats: &Value) -> io::Result<()> {
    fs::write(filename, stats.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BenchRecord {
        BenchRecord {
            dataset: "triangle".to_string(),
            algorithm: "tomita".to_string(),
            time_us: 1500,
            clique_size: 3,
            num_vertices: 3,
            num_edges: 3,
            density: 1.,
            valid: true,
            proven: false,
        }
    }

    #[test]
    fn test_csv_line_layout() {
        assert_eq!(
            record().csv_line(),
            "triangle,tomita,1500,1.5,3,3,3,1.000000,true,false"
        );
    }

    #[test]
    fn test_csv_table_has_one_row_per_record() {
        let table = csv_table(&[record(), record()]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn test_stats_json_shape() {
        let stats = stats_json("triangle", &[record()]);
        assert_eq!(stats["inst_name"], "triangle");
        assert_eq!(stats["primal_list"][0], 3);
    }
}
