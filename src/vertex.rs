//! Vertex identity.
//!
//! The source this system is modeled on is generic over comparable vertex
//! types; the practical instantiation is integers (see Design Notes,
//! "Vertex genericity"). We specialize on a `u32` newtype and keep the
//! handful of call sites that need identity/ordering/hashing parametric
//! through this type rather than a trait, since every consumer in this
//! crate is integer vertices end to end.

use std::fmt;

/// A graph vertex identity, externally provided (1-indexed in PACE/DIMACS
/// input, but the graph itself does not require any particular range).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VertexId(pub u32);

impl VertexId {
    pub fn new(id: u32) -> Self {
        VertexId(id)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VertexId {
    fn from(value: u32) -> Self {
        VertexId(value)
    }
}

impl From<usize> for VertexId {
    fn from(value: usize) -> Self {
        VertexId(value as u32)
    }
}
