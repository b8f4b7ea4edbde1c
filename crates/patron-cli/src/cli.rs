//! CLI argument definitions for the patron data prep tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "patron-prep",
    version,
    about = "Clean, validate, and normalize patron data before ILS import",
    long_about = "Clean, validate, and normalize tabular patron records before import\n\
                  into a library-management system.\n\n\
                  Each invocation runs one operation over a CSV table (row 1 is the\n\
                  header). Every cell mutation is recorded in an action-log CSV for\n\
                  full traceability."
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

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Remove line breaks and extra spaces in a column, or run the
    /// advanced cleanup over a cell range.
    Cleanup(CleanupArgs),

    /// Validate and normalize 10-digit Indian mobile numbers.
    Mobile(ColumnArgs),

    /// Validate email syntax and domain reachability.
    Email(EmailArgs),

    /// Validate 12-digit Aadhaar numbers with the Verhoeff checksum.
    Aadhaar(ColumnArgs),

    /// Validate and format dates to YYYY-MM-DD; ambiguous two-digit
    /// years are parked in a pending file for later resolution.
    Dates(DatesArgs),

    /// Resolve one pending ambiguous-date clarification.
    ResolveDate(ResolveDateArgs),

    /// Find duplicate values in one or more columns and resolve them.
    Duplicates(DuplicatesArgs),

    /// Export rows matching a filter value as CSV.
    Export(ExportArgs),
}

/// Arguments shared by every operation that rewrites the table.
#[derive(Args)]
pub struct TableArgs {
    /// Path to the CSV table (row 1 is the header).
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Where to write the cleaned table (default: overwrite in place).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Action-log CSV to append audit entries to.
    #[arg(long = "action-log", value_name = "PATH", default_value = "action-log.csv")]
    pub action_log: PathBuf,
}

#[derive(Args)]
pub struct ColumnArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Column letter to process, e.g. C.
    #[arg(long = "column", value_name = "LETTER")]
    pub column: String,
}

#[derive(Args)]
pub struct CleanupArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Column letter for the line-break cleanup.
    #[arg(long = "column", value_name = "LETTER", conflicts_with = "range")]
    pub column: Option<String>,

    /// Cell range for the advanced cleanup, e.g. A2:C50.
    #[arg(long = "range", value_name = "RANGE")]
    pub range: Option<String>,
}

#[derive(Args)]
pub struct EmailArgs {
    #[command(flatten)]
    pub column: ColumnArgs,

    /// What to do when the MX lookup itself fails.
    #[arg(long = "on-lookup-failure", value_enum, default_value = "assume-valid")]
    pub on_lookup_failure: LookupFailureArg,
}

#[derive(Args)]
pub struct DatesArgs {
    #[command(flatten)]
    pub column: ColumnArgs,

    /// Where ambiguous two-digit-year requests are parked.
    #[arg(long = "pending-file", value_name = "PATH", default_value = "pending-dates.json")]
    pub pending_file: PathBuf,
}

#[derive(Args)]
pub struct ResolveDateArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Pending file written by the `dates` command.
    #[arg(long = "pending-file", value_name = "PATH", default_value = "pending-dates.json")]
    pub pending_file: PathBuf,

    /// Which pending entry to resolve (0-based, as listed by `dates`).
    #[arg(long = "index", value_name = "N", default_value_t = 0)]
    pub index: usize,

    /// Century choice for the two-digit year, or mark it invalid.
    #[arg(long = "choice", value_enum)]
    pub choice: CenturyArg,
}

#[derive(Args)]
pub struct DuplicatesArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Comma-separated column letters to scan, e.g. "A, C".
    #[arg(long = "columns", value_name = "LETTERS")]
    pub columns: String,

    /// How duplicates are handled.
    #[arg(long = "mode", value_enum, default_value = "interactive")]
    pub mode: DuplicateModeArg,

    /// Scripted answers for interactive mode (comma-separated
    /// remove/clear/skip), consumed in order instead of prompting.
    #[arg(long = "choices", value_name = "LIST")]
    pub choices: Option<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Path to the CSV table (row 1 is the header).
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Column letter to filter by.
    #[arg(long = "column", value_name = "LETTER")]
    pub column: String,

    /// Keep rows whose cell equals this value.
    #[arg(long = "value", value_name = "VALUE")]
    pub value: String,

    /// Where to write the filtered CSV.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Action-log CSV to append the export record to.
    #[arg(long = "action-log", value_name = "PATH", default_value = "action-log.csv")]
    pub action_log: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LookupFailureArg {
    /// Treat the domain as reachable (availability over precision).
    AssumeValid,
    /// Treat the domain as unreachable.
    AssumeInvalid,
    /// Abort the pass before any write.
    Reject,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CenturyArg {
    #[value(name = "1900")]
    Century1900,
    #[value(name = "2000")]
    Century2000,
    Invalid,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DuplicateModeArg {
    Interactive,
    RemoveRow,
    ClearCell,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
