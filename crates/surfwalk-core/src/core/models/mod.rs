//! # Core Models Module
//!
//! Data structures describing one parsed atomic structure and the crosslink
//! queries asked against it.
//!
//! ## Key Components
//!
//! - [`atom`] - Immutable atom record with position and van der Waals radius
//! - [`residue`] - Residue with name-based atom lookup
//! - [`chain`] - Chain with residues in source order
//! - [`structure`] - The owning container with identity and spatial queries
//! - [`crosslink`] - Atom specifiers and crosslink query pairs
//! - [`ids`] - Stable slot-map keys for atoms, residues, and chains
//!
//! ## Usage
//!
//! ```ignore
//! use surfwalk::core::models::{atom::Atom, structure::Structure};
//!
//! let mut structure = Structure::new("model_1");
//! let chain_id = structure.add_chain('A');
//! let residue_id = structure.add_residue(chain_id, 1, "LYS").unwrap();
//! structure.add_atom_to_residue(residue_id, Atom::new("CA", residue_id, Point3::origin(), 1.7));
//! ```

pub mod atom;
pub mod chain;
pub mod crosslink;
pub mod ids;
pub mod residue;
pub mod structure;
