//! CLI command implementations.

pub mod diagonal;
pub mod evolve;
pub mod paramsize;
pub mod version;
