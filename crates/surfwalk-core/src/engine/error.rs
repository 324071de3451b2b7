use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::crosslink::AtomSpecifier;

/// Failures that abort processing of a whole structure.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error(
        "Structure '{structure}' exceeds the {resource} limit ({required} required, {limit} allowed)"
    )]
    ResourceLimitExceeded {
        structure: String,
        resource: &'static str,
        required: usize,
        limit: usize,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

/// Failures confined to a single crosslink query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Atom {spec} not found in structure")]
    UnknownResidue { spec: AtomSpecifier },

    #[error("No solvent-accessible voxel within {radius} voxels of atom {spec}")]
    UnreachableAnchor { spec: AtomSpecifier, radius: usize },
}
