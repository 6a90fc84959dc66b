//! CLI argument definitions for the case/rainfall join.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "epi-join",
    version,
    about = "Join disease case counts with rainfall by region and month",
    long_about = "Join disease case counts with rainfall measurements by region and month.\n\n\
                  Case counts are summed per region-month, rainfall is summed and rounded\n\
                  to one decimal, and only region-months present in both datasets are written."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Join a case dataset with a rainfall dataset and write the result.
    Run(RunArgs),

    /// Print the header line written at the top of every output file.
    Header,
}

#[derive(Args)]
pub struct RunArgs {
    /// TOML file with [input], [output] and [options] sections.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// `|`-delimited case dataset.
    #[arg(long = "cases", value_name = "PATH")]
    pub cases: Option<PathBuf>,

    /// `,`-delimited rainfall dataset.
    #[arg(long = "rainfall", value_name = "PATH")]
    pub rainfall: Option<PathBuf>,

    /// Output path prefix (default: resultado).
    #[arg(long = "output", value_name = "PREFIX")]
    pub output: Option<PathBuf>,

    /// Output file suffix (default: .csv).
    #[arg(long = "suffix", value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Number of output files to spread records over (default: 1).
    #[arg(long = "shards", value_name = "N")]
    pub shards: Option<usize>,

    /// Require 4-digit years, months 01-12 and two-letter uppercase region codes.
    #[arg(long = "strict-keys", conflicts_with = "lenient_keys")]
    pub strict_keys: bool,

    /// Only reject keys that would not split back into region, year and month.
    #[arg(long = "lenient-keys")]
    pub lenient_keys: bool,

    /// Drop malformed records with a warning instead of failing the run.
    #[arg(long = "skip-malformed")]
    pub skip_malformed: bool,

    /// Run every stage but do not write output files.
    #[arg(long = "dry-run", conflicts_with = "verify")]
    pub dry_run: bool,

    /// Read written files back and check them against the joined records.
    #[arg(long = "verify")]
    pub verify: bool,

    /// Also write the run summary as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
