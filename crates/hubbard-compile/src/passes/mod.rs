//! Built-in compilation passes.
//!
//! - [`WalshDiagonalSynthesis`]: rebuild a diagonal unitary from CX ladders
//!   and Z rotations
//! - [`ScanningGateRemoval`]: drop gates whose removal keeps the unitary

pub mod scanning;
pub mod walsh;

pub use scanning::{RemovedGates, ScanningGateRemoval};
pub use walsh::WalshDiagonalSynthesis;

/// Coefficients and entries below this magnitude are treated as zero.
pub(crate) const EPSILON: f64 = 1e-10;
