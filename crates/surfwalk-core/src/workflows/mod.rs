//! # Workflows Module
//!
//! High-level entry points that run the whole surface distance pipeline for one
//! structure.
//!
//! - **SASD Workflow** ([`sasd`]) - Voxelization, classification, surface graph
//!   construction, and evaluation of every crosslink query, returning a report with
//!   one outcome per query.
//!
//! Batch processing of several structures is left to the caller: each call is
//! independent, and a failure for one structure says nothing about the next.

pub mod sasd;
