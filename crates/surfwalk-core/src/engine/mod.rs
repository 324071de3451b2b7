//! # Engine Module
//!
//! Stateful algorithms that turn a structure into a navigable surface and measure
//! crosslinks over it.
//!
//! ## Pipeline
//!
//! Data flows strictly downward, once per structure:
//!
//! 1. [`grid`] - Lattice geometry enclosing the structure plus a probe margin
//! 2. [`tasks::classification`] - Occupied / buried / accessible label per voxel, using the
//!    k-d tree in [`spatial`]
//! 3. [`graph`] - Compressed adjacency over accessible voxels, with tunnelling checks
//! 4. [`anchor`] and [`search`] - Anchor resolution and Dijkstra / A* shortest paths
//!
//! [`context::SurfaceContext`] owns the grid and graph of one structure and answers
//! queries read-only; [`tasks::crosslink_search`] fans queries out over it.
//!
//! ## Supporting Modules
//!
//! - **Configuration** ([`config`]) - Grid, search, and resource-limit parameters
//! - **Errors** ([`error`]) - Structure-level and per-query failures
//! - **Results** ([`outcome`]) - Per-query outcomes and per-structure reports
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events

pub mod anchor;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod grid;
pub mod outcome;
pub mod progress;
pub mod search;
pub mod spatial;
pub mod tasks;
pub mod utils;
