//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `polytope`.
#[derive(Debug, Parser)]
#[command(name = "polytope", version, about = "Generate short random identifiers")]
pub struct Cli {
    /// Generator settings shared by every subcommand.
    #[command(flatten)]
    pub options: GeneratorArgs,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Flags that shape the generator. They override `POLYTOPE_*` variables and
/// the config file.
#[derive(Debug, Default, Args)]
pub struct GeneratorArgs {
    /// Characters to draw from; each may appear only once.
    #[arg(long, global = true)]
    pub alphabet: Option<String>,
    /// Characters per identifier.
    #[arg(long, global = true)]
    pub length: Option<usize>,
    /// Seed for reproducible output.
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// YAML file with `alphabet`, `length` and `seed` keys.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Record every random draw to this cassette file.
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "replay")]
    pub record: Option<PathBuf>,
    /// Replay random draws from this cassette file.
    #[arg(long, global = true, value_name = "FILE")]
    pub replay: Option<PathBuf>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print independent identifiers; repeats are possible.
    Generate {
        /// How many identifiers to print.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Print pairwise-distinct identifiers.
    Bulk {
        /// How many distinct identifiers to print.
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
    /// Describe the identifier space and the bulk strategy it selects.
    Space,
}
