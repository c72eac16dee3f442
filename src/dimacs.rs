use std::collections::HashMap;
use std::fs;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, space1};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::{pair, preceded, separated_pair};
use nom::IResult;

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};

/** a loaded instance: the dense graph plus the table mapping dense vertex
ids back to the input id space. */
#[derive(Debug)]
pub struct Dataset {
    /// graph over the dense vertex range [0, n)
    pub graph: Graph,
    /// original_ids[v]: input id of dense vertex v
    pub original_ids: Vec<u64>,
}

impl Dataset {
    /// renders a clique of dense vertices in the input id space
    pub fn render_original(&self, clique: &[VertexId]) -> Vec<u64> {
        clique.iter().map(|&v| self.original_ids[v]).collect()
    }
}

/// reads one non-negative integer
fn integer(s: &str) -> IResult<&str, u64> {
    map_res(digit1, |digits: &str| digits.parse::<u64>())(s)
}

/// reads two integers separated by blanks
fn id_pair(s: &str) -> IResult<&str, (u64, u64)> {
    separated_pair(integer, space1, integer)(s)
}

/// reads a DIMACS edge line `e u v`
fn dimacs_edge(s: &str) -> IResult<&str, (u64, u64)> {
    preceded(pair(tag("e"), space1), id_pair)(s)
}

/// reads a DIMACS header `p edge n m` (`p col` is also found in the wild)
fn dimacs_header(s: &str) -> IResult<&str, (u64, u64)> {
    preceded(pair(alt((tag("p edge"), tag("p col"))), space1), id_pair)(s)
}

/** parses an instance from a string. Each line is classified on its own:
comments (`c …`, `# …`, empty lines) are skipped, a DIMACS header is parsed
and ignored (the graph size is inferred from the edges), `e u v` lines and
bare `u v` lines are edges. Both directions denote the same undirected
edge, self-loops are dropped, duplicates are idempotent. Vertex ids are
arbitrary non-negative integers and get remapped to a dense 0-based range
in order of first appearance. */
pub fn load_from_string(content: &str) -> Result<Dataset> {
    // dense id of an input id, interning it on first sight
    fn intern(id: u64, remap: &mut HashMap<u64, VertexId>, originals: &mut Vec<u64>) -> VertexId {
        *remap.entry(id).or_insert_with(|| {
            originals.push(id);
            originals.len() - 1
        })
    }
    let mut remap: HashMap<u64, VertexId> = HashMap::new();
    let mut original_ids: Vec<u64> = Vec::new();
    let mut edges: Vec<(VertexId, VertexId)> = Vec::new();
    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('c') {
            continue;
        }
        if line.starts_with('p') {
            all_consuming(dimacs_header)(line).map_err(|_| {
                Error::InvalidInput(format!("line {}: malformed header `{}`", i + 1, line))
            })?;
            continue;
        }
        let parsed = if line.starts_with('e') {
            all_consuming(dimacs_edge)(line)
        } else {
            all_consuming(id_pair)(line)
        };
        match parsed {
            Ok((_, (a, b))) => {
                let u = intern(a, &mut remap, &mut original_ids);
                let v = intern(b, &mut remap, &mut original_ids);
                edges.push((u, v));
            }
            Err(_) => {
                return Err(Error::InvalidInput(format!(
                    "line {}: expected an edge, got `{}` (negative or malformed id?)",
                    i + 1,
                    line
                )))
            }
        }
    }
    let graph = Graph::from_edges(original_ids.len(), edges)?;
    Ok(Dataset { graph, original_ids })
}

/// reads an instance from a file (DIMACS or SNAP-like edge list)
pub fn load_from_file(filename: &str) -> Result<Dataset> {
    let content = fs::read_to_string(filename)
        .map_err(|e| Error::InvalidInput(format!("cannot read {}: {}", filename, e)))?;
    load_from_string(&content)
}
