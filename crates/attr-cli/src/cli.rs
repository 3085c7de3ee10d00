//! CLI argument definitions for the attribution reporter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "attr",
    version,
    about = "Referral attribution reporter - join, validate, and report marketing referrals",
    long_about = "Join raw referral, activity-log, transaction, and reward tables into a\n\
                  row-per-referral marketing report, classifying each referral as valid\n\
                  or invalid with a rejection reason."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Build the attribution report from a data directory.
    Report(ReportArgs),

    /// Profile every CSV file in a data directory.
    Profile(ProfileArgs),

    /// Write the report schema dictionary.
    Dictionary(DictionaryArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Directory containing the raw input CSV files.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output directory for the report artifacts (default: <DATA_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Run the pipeline and print the summary without writing artifacts.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip the validation_summary.json artifact.
    #[arg(long = "no-summary-json")]
    pub no_summary_json: bool,
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Directory containing CSV files to profile.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output directory for the profile artifact (default: <DATA_DIR>/docs).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DictionaryArgs {
    /// Output directory for the dictionary artifact (default: docs).
    #[arg(long = "output-dir", value_name = "DIR", default_value = "docs")]
    pub output_dir: PathBuf,
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
