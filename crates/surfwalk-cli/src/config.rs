use crate::cli::MeasureArgs;
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use surfwalk::engine::config::{self as core_config, Connectivity, SasdConfig, SearchStrategy};
use surfwalk::engine::utils::query::PairSelection;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialGridConfig {
    voxel_size: Option<f64>,
    probe_radius: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSearchConfig {
    connectivity: Option<Connectivity>,
    strategy: Option<SearchStrategy>,
    anchor_search_radius: Option<usize>,
    max_distance: Option<f64>,
    record_paths: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialLimitsConfig {
    max_voxels: Option<usize>,
    max_search_expansions: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialCrosslinksConfig {
    residue_names: Option<Vec<String>>,
    include_n_terminus: Option<bool>,
    atom_name: Option<String>,
    max_euclidean_distance: Option<f64>,
}

/// Configuration as read from a TOML file, every value optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialMeasureConfig {
    grid: Option<PartialGridConfig>,
    search: Option<PartialSearchConfig>,
    limits: Option<PartialLimitsConfig>,
    crosslinks: Option<PartialCrosslinksConfig>,
}

/// Fully resolved settings of one `measure` run.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureSettings {
    pub sasd: SasdConfig,
    pub selection: PairSelection,
}

impl PartialMeasureConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Merges file values with command-line overrides. Precedence: CLI > file > defaults.
    pub fn merge_with_cli(mut self, args: &MeasureArgs) -> Result<MeasureSettings> {
        self.apply_set_values(&args.set_values)?;

        let grid = self.grid.take().unwrap_or_default();
        let search = self.search.take().unwrap_or_default();
        let limits = self.limits.take().unwrap_or_default();
        let crosslinks = self.crosslinks.take().unwrap_or_default();

        let mut builder = core_config::SasdConfigBuilder::new();
        if let Some(v) = args.voxel_size.or(grid.voxel_size) {
            builder = builder.voxel_size(v);
        }
        if let Some(v) = args.probe_radius.or(grid.probe_radius) {
            builder = builder.probe_radius(v);
        }
        if let Some(v) = args.connectivity.or(search.connectivity) {
            builder = builder.connectivity(v);
        }
        if let Some(v) = args.strategy.or(search.strategy) {
            builder = builder.strategy(v);
        }
        if let Some(v) = args.anchor_radius.or(search.anchor_search_radius) {
            builder = builder.anchor_search_radius(v);
        }
        if let Some(v) = args.max_distance.or(search.max_distance) {
            builder = builder.max_distance(v);
        }
        if args.no_paths {
            builder = builder.record_paths(false);
        } else if let Some(v) = search.record_paths {
            builder = builder.record_paths(v);
        }
        if let Some(v) = args.max_voxels.or(limits.max_voxels) {
            builder = builder.max_voxels(v);
        }
        if let Some(v) = args.max_expansions.or(limits.max_search_expansions) {
            builder = builder.max_search_expansions(v);
        }
        let sasd = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let defaults = PairSelection::default();
        let selection = PairSelection {
            residue_names: args
                .residues
                .clone()
                .or(crosslinks.residue_names)
                .unwrap_or(defaults.residue_names),
            include_n_terminus: if args.no_n_terminus {
                false
            } else {
                crosslinks
                    .include_n_terminus
                    .unwrap_or(defaults.include_n_terminus)
            },
            atom_name: args
                .anchor_atom
                .clone()
                .or(crosslinks.atom_name)
                .unwrap_or(defaults.atom_name),
            max_euclidean_distance: args
                .max_euclidean
                .or(crosslinks.max_euclidean_distance)
                .or(defaults.max_euclidean_distance),
        };
        if selection.residue_names.is_empty() && !selection.include_n_terminus {
            return Err(CliError::Config(
                "Crosslink enumeration selects no residues: give at least one residue name or allow N-termini.".to_string(),
            ));
        }

        Ok(MeasureSettings { sasd, selection })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value_str = value_str.trim();

            match key {
                "grid.voxel-size" => {
                    self.grid.get_or_insert_with(Default::default).voxel_size =
                        Some(parse_value(key, value_str)?);
                }
                "grid.probe-radius" => {
                    self.grid.get_or_insert_with(Default::default).probe_radius =
                        Some(parse_value(key, value_str)?);
                }
                "search.connectivity" => {
                    self.search.get_or_insert_with(Default::default).connectivity =
                        Some(parse_value(key, value_str)?);
                }
                "search.strategy" => {
                    self.search.get_or_insert_with(Default::default).strategy =
                        Some(parse_value(key, value_str)?);
                }
                "search.anchor-search-radius" => {
                    self.search
                        .get_or_insert_with(Default::default)
                        .anchor_search_radius = Some(parse_value(key, value_str)?);
                }
                "search.max-distance" => {
                    self.search.get_or_insert_with(Default::default).max_distance =
                        Some(parse_value(key, value_str)?);
                }
                "search.record-paths" => {
                    self.search.get_or_insert_with(Default::default).record_paths =
                        Some(parse_value(key, value_str)?);
                }
                "limits.max-voxels" => {
                    self.limits.get_or_insert_with(Default::default).max_voxels =
                        Some(parse_value(key, value_str)?);
                }
                "limits.max-search-expansions" => {
                    self.limits
                        .get_or_insert_with(Default::default)
                        .max_search_expansions = Some(parse_value(key, value_str)?);
                }
                "crosslinks.atom-name" => {
                    self.crosslinks.get_or_insert_with(Default::default).atom_name =
                        Some(value_str.to_string());
                }
                "crosslinks.include-n-terminus" => {
                    self.crosslinks
                        .get_or_insert_with(Default::default)
                        .include_n_terminus = Some(parse_value(key, value_str)?);
                }
                "crosslinks.max-euclidean-distance" => {
                    self.crosslinks
                        .get_or_insert_with(Default::default)
                        .max_euclidean_distance = Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| CliError::Config(format!("Invalid value for {}: '{}' ({})", key, value, e)))
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct CrosslinksDefaults {
    residue_names: Vec<String>,
    include_n_terminus: bool,
    atom_name: String,
}

#[derive(Serialize)]
struct DefaultsDocument {
    grid: core_config::GridConfig,
    search: core_config::SearchConfig,
    limits: core_config::ResourceLimits,
    crosslinks: CrosslinksDefaults,
}

/// The default configuration rendered as a TOML document accepted by [`PartialMeasureConfig`].
pub fn default_config_toml() -> Result<String> {
    let selection = PairSelection::default();
    let sasd = SasdConfig::default();
    let document = DefaultsDocument {
        grid: sasd.grid,
        search: sasd.search,
        limits: sasd.limits,
        crosslinks: CrosslinksDefaults {
            residue_names: selection.residue_names,
            include_n_terminus: selection.include_n_terminus,
            atom_name: selection.atom_name,
        },
    };
    toml::to_string_pretty(&document)
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to render defaults: {}", e)))
}
