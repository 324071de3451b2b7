//! Provides input/output for the tabular formats consumed and produced around
//! the surface distance pipeline.
//!
//! Structures are read from CSV atom tables ([`atoms`]) and crosslinks from
//! pipe-delimited lists ([`crosslinks`]). Results are written as a CSV table
//! ([`results`]) and traversed paths as PDB-style pseudo-atom models ([`paths`]).

pub mod atoms;
pub mod crosslinks;
pub mod error;
pub mod paths;
pub mod results;
pub mod traits;

pub use error::IoError;
