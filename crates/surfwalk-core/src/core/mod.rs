//! # Core Module
//!
//! Stateless building blocks of the surface distance pipeline.
//!
//! - **Structure Representation** ([`models`]) - Atoms, residues, chains, and crosslink specifiers
//! - **Geometry Helpers** ([`utils`]) - Bounding boxes, path lengths, and van der Waals radii
//! - **File I/O** ([`io`]) - Atom tables, crosslink lists, result tables, and path models
//!
//! Nothing in this module holds derived state: grids, graphs, and search
//! buffers live in [`crate::engine`].

pub mod io;
pub mod models;
pub mod utils;
