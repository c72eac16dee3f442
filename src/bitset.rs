//! Helpers around [`bit_set::BitSet`] for the solvers.
//!
//! The native operations (`intersect_with`, `difference_with`,
//! `union_with`, `len`, `iter`, `contains`, `insert`, `remove`) already
//! cover most of what the recursions need; this module adds the
//! domain-aware constructions and a scratch-buffer pool so recursion
//! frames reuse word buffers instead of allocating one per node.

use bit_set::BitSet;

use crate::error::{Error, Result};
use crate::graph::VertexId;

/// bitset holding every vertex of the domain [0, n)
pub fn full_set(n: usize) -> BitSet {
    let mut res = BitSet::with_capacity(n);
    for i in 0..n {
        res.insert(i);
    }
    res
}

/// complement of s within the domain [0, n)
pub fn complement_within(s: &BitSet, n: usize) -> BitSet {
    let mut res = full_set(n);
    res.difference_with(s);
    res
}

/// smallest element of s, if any
pub fn first_set_bit(s: &BitSet) -> Option<VertexId> {
    s.iter().next()
}

/** allocates a table of n empty bitsets of width n, failing with
[`Error::ResourceExhausted`] when the table cannot be reserved. Used by the
solvers that build a private (reordered) adjacency copy. */
pub fn try_mask_table(n: usize) -> Result<Vec<BitSet>> {
    let mut table = Vec::new();
    table.try_reserve_exact(n).map_err(|_| {
        Error::ResourceExhausted(format!("cannot allocate {} bitsets of width {}", n, n))
    })?;
    for _ in 0..n {
        table.push(BitSet::with_capacity(n));
    }
    Ok(table)
}

/** pool of cleared scratch bitsets. Frames take a buffer on descent and
give it back on ascent, so one invocation allocates O(depth) buffers in
total instead of O(nodes). */
#[derive(Debug, Default)]
pub struct BufferPool {
    /// cleared buffers ready for reuse
    free: Vec<BitSet>,
}

impl BufferPool {
    /// empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// takes a cleared buffer (allocating one if the pool is dry)
    pub fn acquire(&mut self) -> BitSet {
        self.free.pop().unwrap_or_default()
    }

    /// clears the buffer and returns it to the pool
    pub fn release(&mut self, mut buffer: BitSet) {
        buffer.clear();
        self.free.push(buffer);
    }
}
