//! # surfwalk Core Library
//!
//! Solvent-accessible surface distances (SASD) between crosslinked residues of protein
//! structures. A crosslinker cannot pass through the protein, so the length that matters
//! is the shortest path around the molecular surface, not the straight line.
//!
//! ## Architecture
//!
//! The library is split into three layers:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, atom specifiers,
//!   crosslink queries), van der Waals radii, and readers and writers for atom tables,
//!   crosslink lists, result tables, and path models.
//!
//! - **[`engine`]: The Logic Core.** Voxelization of the structure, classification of
//!   every voxel as occupied, buried, or solvent accessible, the surface graph over the
//!   accessible voxels, anchor resolution, and shortest-path search.
//!
//! - **[`workflows`]: The Public API.** One call per structure that runs the whole
//!   pipeline and returns a report with one outcome per crosslink.
//!
//! ## Example
//!
//! ```no_run
//! use surfwalk::core::io::atoms::AtomTableFile;
//! use surfwalk::core::io::traits::StructureFile;
//! use surfwalk::engine::config::SasdConfig;
//! use surfwalk::engine::progress::ProgressReporter;
//! use surfwalk::engine::utils::query::{enumerate_crosslinks, PairSelection};
//! use surfwalk::workflows::sasd;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let structure = AtomTableFile::read_from_path("model_1.csv")?;
//! let queries = enumerate_crosslinks(&structure, &PairSelection::default());
//! let report = sasd::run(&structure, &queries, &SasdConfig::default(), &ProgressReporter::new())?;
//! for record in report.records() {
//!     println!("{} {} {:?}", record.atom1, record.atom2, record.sasd);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
