//! Computational tasks run once per structure.
//!
//! [`classification`] labels every voxel of the lattice; [`crosslink_search`] fans
//! crosslink queries out over a finished surface context.

pub mod classification;
pub mod crosslink_search;
