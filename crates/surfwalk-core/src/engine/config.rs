use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
    #[error("Structure '{0}' contains no atoms")]
    EmptyStructure(String),
}

/// Lattice adjacency pattern of the surface graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Connectivity {
    /// 6 neighbours sharing a face.
    Face,
    /// 18 neighbours sharing a face or an edge.
    Edge,
    /// 26 neighbours sharing a face, an edge, or a corner.
    #[default]
    Corner,
}

impl Connectivity {
    /// Largest number of non-zero components a neighbour offset may have.
    pub fn max_axes(self) -> u8 {
        match self {
            Connectivity::Face => 1,
            Connectivity::Edge => 2,
            Connectivity::Corner => 3,
        }
    }

    pub fn neighbor_count(self) -> usize {
        match self {
            Connectivity::Face => 6,
            Connectivity::Edge => 18,
            Connectivity::Corner => 26,
        }
    }
}

impl FromStr for Connectivity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "face" | "6" => Ok(Connectivity::Face),
            "edge" | "18" => Ok(Connectivity::Edge),
            "corner" | "26" => Ok(Connectivity::Corner),
            _ => Err(ConfigError::UnknownVariant {
                kind: "connectivity",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Connectivity::Face => "face",
            Connectivity::Edge => "edge",
            Connectivity::Corner => "corner",
        };
        f.write_str(s)
    }
}

/// Shortest-path algorithm used by the path search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    #[default]
    Dijkstra,
    /// Dijkstra guided by the straight-line distance to the target.
    AStar,
}

impl FromStr for SearchStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(SearchStrategy::Dijkstra),
            "astar" | "a-star" | "a*" => Ok(SearchStrategy::AStar),
            _ => Err(ConfigError::UnknownVariant {
                kind: "search strategy",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Dijkstra => f.write_str("dijkstra"),
            SearchStrategy::AStar => f.write_str("a-star"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GridConfig {
    /// Edge length of one voxel in Angstroms.
    pub voxel_size: f64,
    /// Solvent probe radius in Angstroms.
    pub probe_radius: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            voxel_size: 1.0,
            probe_radius: 1.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SearchConfig {
    pub connectivity: Connectivity,
    pub strategy: SearchStrategy,
    /// Largest Chebyshev distance, in voxels, searched for an accessible anchor.
    pub anchor_search_radius: usize,
    /// Path costs above this value are reported as beyond the cutoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
    pub record_paths: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::default(),
            strategy: SearchStrategy::default(),
            anchor_search_radius: 3,
            max_distance: None,
            record_paths: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResourceLimits {
    /// Upper bound on the number of lattice voxels of one structure.
    pub max_voxels: usize,
    /// Upper bound on node expansions of a single path search.
    pub max_search_expansions: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_voxels: 32_000_000,
            max_search_expansions: 10_000_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SasdConfig {
    pub grid: GridConfig,
    pub search: SearchConfig,
    pub limits: ResourceLimits,
}

impl SasdConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |parameter, reason: &str| ConfigError::InvalidParameter {
            parameter,
            reason: reason.to_string(),
        };

        if !(self.grid.voxel_size.is_finite() && self.grid.voxel_size > 0.0) {
            return Err(invalid("voxel_size", "must be a positive finite number"));
        }
        if !(self.grid.probe_radius.is_finite() && self.grid.probe_radius >= 0.0) {
            return Err(invalid("probe_radius", "must be a non-negative finite number"));
        }
        if let Some(max) = self.search.max_distance {
            if !(max.is_finite() && max > 0.0) {
                return Err(invalid("max_distance", "must be a positive finite number"));
            }
        }
        if self.limits.max_voxels == 0 {
            return Err(invalid("max_voxels", "must be greater than zero"));
        }
        if self.limits.max_search_expansions == 0 {
            return Err(invalid("max_search_expansions", "must be greater than zero"));
        }
        // No lattice axis can be longer than the voxel limit.
        if self.search.anchor_search_radius > self.limits.max_voxels {
            return Err(invalid("anchor_search_radius", "must not exceed max_voxels"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct SasdConfigBuilder {
    voxel_size: Option<f64>,
    probe_radius: Option<f64>,
    connectivity: Option<Connectivity>,
    strategy: Option<SearchStrategy>,
    anchor_search_radius: Option<usize>,
    max_distance: Option<f64>,
    record_paths: Option<bool>,
    max_voxels: Option<usize>,
    max_search_expansions: Option<usize>,
}

impl SasdConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn voxel_size(mut self, size: f64) -> Self {
        self.voxel_size = Some(size);
        self
    }
    pub fn probe_radius(mut self, radius: f64) -> Self {
        self.probe_radius = Some(radius);
        self
    }
    pub fn connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = Some(connectivity);
        self
    }
    pub fn strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn anchor_search_radius(mut self, voxels: usize) -> Self {
        self.anchor_search_radius = Some(voxels);
        self
    }
    pub fn max_distance(mut self, distance: f64) -> Self {
        self.max_distance = Some(distance);
        self
    }
    pub fn record_paths(mut self, record: bool) -> Self {
        self.record_paths = Some(record);
        self
    }
    pub fn max_voxels(mut self, voxels: usize) -> Self {
        self.max_voxels = Some(voxels);
        self
    }
    pub fn max_search_expansions(mut self, expansions: usize) -> Self {
        self.max_search_expansions = Some(expansions);
        self
    }

    pub fn build(self) -> Result<SasdConfig, ConfigError> {
        let defaults = SasdConfig::default();
        let config = SasdConfig {
            grid: GridConfig {
                voxel_size: self.voxel_size.unwrap_or(defaults.grid.voxel_size),
                probe_radius: self.probe_radius.unwrap_or(defaults.grid.probe_radius),
            },
            search: SearchConfig {
                connectivity: self.connectivity.unwrap_or(defaults.search.connectivity),
                strategy: self.strategy.unwrap_or(defaults.search.strategy),
                anchor_search_radius: self
                    .anchor_search_radius
                    .unwrap_or(defaults.search.anchor_search_radius),
                max_distance: self.max_distance.or(defaults.search.max_distance),
                record_paths: self.record_paths.unwrap_or(defaults.search.record_paths),
            },
            limits: ResourceLimits {
                max_voxels: self.max_voxels.unwrap_or(defaults.limits.max_voxels),
                max_search_expansions: self
                    .max_search_expansions
                    .unwrap_or(defaults.limits.max_search_expansions),
            },
        };
        config.validate()?;
        Ok(config)
    }
}
