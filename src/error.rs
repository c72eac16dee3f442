use std::fmt;

use crate::graph::VertexId;

/** Error kinds surfaced by the loader and the solvers.

Parsing errors are reported immediately (nothing of a partial load is
returned). Inside a search, only [`Error::Interrupted`] and
[`Error::ResourceExhausted`] can occur; both unwind cleanly and the entry
point returns the incumbent clique with its `proven` flag cleared. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// malformed instance data: unparsable line, negative vertex id, invalid seed clique
    InvalidInput(String),
    /// vertex query outside [0, n)
    OutOfRange(VertexId),
    /// bitmaps of width n cannot be allocated
    ResourceExhausted(String),
    /// a cancellation token tripped between two search nodes
    Interrupted,
}

/// crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "InvalidInput: {}", msg),
            Error::OutOfRange(v) => write!(f, "OutOfRange: vertex {} does not exist", v),
            Error::ResourceExhausted(msg) => write!(f, "ResourceExhausted: {}", msg),
            Error::Interrupted => write!(f, "Interrupted: the search was cancelled"),
        }
    }
}

impl std::error::Error for Error {}
