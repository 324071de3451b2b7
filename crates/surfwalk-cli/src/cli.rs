use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use surfwalk::engine::config::{Connectivity, SearchStrategy};

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "surfwalk contributors",
    version,
    about = "surfwalk - Solvent-accessible surface distances between crosslinked residues of protein structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure surface distances of crosslinks on one or more structures.
    Measure(MeasureArgs),
    /// Print the default configuration as TOML.
    Defaults,
}

/// Arguments for the `measure` subcommand.
#[derive(Args, Debug)]
pub struct MeasureArgs {
    // --- Core Arguments ---
    /// Atom tables (CSV) of the structures to measure. Each file is one model.
    #[arg(short, long = "input", required = true, num_args(1..), value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Path for the result table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Crosslink list (`res1|chain1|res2|chain2|[atom1|atom2]` per line).
    /// Without it, all pairs of selected residues are measured.
    #[arg(short = 'x', long, value_name = "PATH")]
    pub crosslinks: Option<PathBuf>,

    /// Write the traversed paths as PDB models to this file.
    #[arg(long, value_name = "PATH")]
    pub paths: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Grid Overrides ---
    /// Override the voxel edge length in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub voxel_size: Option<f64>,

    /// Override the solvent probe radius in Angstroms.
    #[arg(short = 'p', long, value_name = "FLOAT")]
    pub probe_radius: Option<f64>,

    // --- Search Overrides ---
    /// Override the surface graph connectivity (face, edge, corner or 6, 18, 26).
    #[arg(long, value_name = "PATTERN")]
    pub connectivity: Option<Connectivity>,

    /// Override the shortest-path algorithm (dijkstra, a-star).
    #[arg(long, value_name = "NAME")]
    pub strategy: Option<SearchStrategy>,

    /// Override how far, in voxels, an anchor may be moved to reach the surface.
    #[arg(long, value_name = "INT")]
    pub anchor_radius: Option<usize>,

    /// Report crosslinks longer than this surface distance as beyond the cutoff.
    #[arg(short = 'd', long, value_name = "FLOAT")]
    pub max_distance: Option<f64>,

    /// Do not record traversed paths.
    #[arg(long, conflicts_with = "paths")]
    pub no_paths: bool,

    // --- Resource Overrides ---
    /// Override the largest number of voxels per structure.
    #[arg(long, value_name = "INT")]
    pub max_voxels: Option<usize>,

    /// Override the largest number of node expansions per search.
    #[arg(long, value_name = "INT")]
    pub max_expansions: Option<usize>,

    // --- Pair Enumeration Overrides ---
    /// Residue names eligible for generated crosslinks (comma separated).
    #[arg(short = 'r', long, value_name = "NAMES", value_delimiter = ',')]
    pub residues: Option<Vec<String>>,

    /// Do not add each chain's N-terminal residue to generated crosslinks.
    #[arg(long)]
    pub no_n_terminus: bool,

    /// Atom anchoring every generated crosslink.
    #[arg(long, value_name = "NAME")]
    pub anchor_atom: Option<String>,

    /// Skip generated pairs whose atoms are farther apart than this.
    #[arg(long, value_name = "FLOAT")]
    pub max_euclidean: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S grid.voxel-size=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
