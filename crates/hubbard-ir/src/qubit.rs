//! Qubit and classical bit identifiers.
//!
//! Circuits in this crate address wires by dense indices `0..n`. There are
//! no named registers: a [`QubitId`] is the position of the wire, and a
//! location is simply an ordered slice of them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a qubit wire within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The wire position as a `usize`, for indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Identifier for a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// Build a location from raw wire indices.
///
/// ```rust
/// use hubbard_ir::qubit::{location, QubitId};
///
/// assert_eq!(location([2, 0]), vec![QubitId(2), QubitId(0)]);
/// ```
pub fn location(indices: impl IntoIterator<Item = u32>) -> Vec<QubitId> {
    indices.into_iter().map(QubitId).collect()
}
