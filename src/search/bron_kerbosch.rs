use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::search::Incumbent;
use crate::stopping::StopToken;

/** plain Bron-Kerbosch maximum clique search.

This is the reference enumerator the other variants are checked against:
no pivot, no coloring, vertex lists instead of bitsets, fresh candidate
sets built at every node. Only the incumbent size bound prunes the tree. */
pub(crate) fn maximum_clique(
    graph: &Graph,
    token: &StopToken,
    incumbent: &mut Incumbent,
    nodes: &mut u64,
) -> Result<()> {
    let p: Vec<VertexId> = (0..graph.nb_vertices()).collect();
    let mut r = Vec::new();
    expand(graph, token, incumbent, nodes, &mut r, p, Vec::new())
}

/// one node: R the clique, P the candidates, X the processed vertices
fn expand(
    graph: &Graph,
    token: &StopToken,
    incumbent: &mut Incumbent,
    nodes: &mut u64,
    r: &mut Vec<VertexId>,
    p: Vec<VertexId>,
    mut x: Vec<VertexId>,
) -> Result<()> {
    if token.is_triggered() {
        return Err(Error::Interrupted);
    }
    *nodes += 1;
    if r.len() + p.len() <= incumbent.len() {
        return Ok(());
    }
    if p.is_empty() && x.is_empty() {
        incumbent.record(r);
        return Ok(());
    }
    for (i, &v) in p.iter().enumerate() {
        // p[i..] is the candidate set still alive at this point
        if r.len() + 1 + (p.len() - i) <= incumbent.len() {
            break;
        }
        let child_p: Vec<VertexId> = p[i + 1..]
            .iter()
            .copied()
            .filter(|&u| graph.are_adjacent(u, v))
            .collect();
        let child_x: Vec<VertexId> = x
            .iter()
            .copied()
            .filter(|&u| graph.are_adjacent(u, v))
            .collect();
        r.push(v);
        let status = expand(graph, token, incumbent, nodes, r, child_p, child_x);
        r.pop();
        status?;
        x.push(v);
    }
    Ok(())
}
