use clap::{Args, Parser, Subcommand, ValueEnum};
use hpfold::engine::config::TieBreak;
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Hendrik DuPont, Jeppe Mul, Nasreddine Ouchene",
    version,
    about = "hpfold - Search low-energy folds of HP lattice proteins on the square and cubic lattices.",
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

    /// Set the number of threads used to run trials in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fold a sequence and write the best fold to a CSV file.
    Fold(FoldArgs),
    /// Re-score a fold CSV and compare it with the energy recorded in the file.
    Score(ScoreArgs),
}

/// Search strategy selectable from the command line or a config file.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Random,
    Greedy,
    Beam,
    PullMove,
}

/// Arguments for the `fold` subcommand.
#[derive(Args, Debug)]
pub struct FoldArgs {
    // --- Core Arguments ---
    /// Residue sequence over H, P and C (e.g., HPHPPHHPHPPHPHHPPHPH).
    #[arg(required = true, value_name = "SEQUENCE")]
    pub sequence: String,

    /// Path for the output fold CSV.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fold on the cubic lattice instead of the square lattice.
    #[arg(long = "three-d")]
    pub three_d: bool,

    // --- Experiment Overrides ---
    /// Override the search strategy.
    #[arg(long, value_enum, value_name = "STRATEGY")]
    pub strategy: Option<StrategyKind>,

    /// Override the number of independent trials.
    #[arg(short = 'n', long, value_name = "INT")]
    pub trials: Option<usize>,

    /// Base random seed; trial i uses seed + i.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the contact energy table (TOML).
    #[arg(long, value_name = "PATH")]
    pub energy_table: Option<PathBuf>,

    // --- Strategy Overrides ---
    /// Cap on construction attempts per trial (random, greedy, beam, pull-move start).
    #[arg(long, value_name = "INT")]
    pub max_attempts: Option<usize>,

    /// Skip moves that would leave the next residue without a free neighbour.
    #[arg(long)]
    pub prune_dead_ends: bool,

    /// Which equally scored move greedy construction keeps.
    #[arg(long, value_name = "first|last")]
    pub tie_break: Option<TieBreak>,

    /// Override the beam width.
    #[arg(long, value_name = "INT")]
    pub width: Option<usize>,

    /// Override the beam lookahead depth.
    #[arg(long, value_name = "INT")]
    pub lookahead: Option<usize>,

    /// Override the number of stale sweeps the pull-move climb tolerates.
    #[arg(long, value_name = "INT")]
    pub patience: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S strategy.width=20
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to a fold CSV written by `hpfold fold`.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Read the fold codes as a cubic-lattice fold.
    #[arg(long = "three-d")]
    pub three_d: bool,

    /// Contact energy table (TOML) used for the recomputed energy.
    #[arg(long, value_name = "PATH")]
    pub energy_table: Option<PathBuf>,
}
