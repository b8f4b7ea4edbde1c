//! Patron data preparation CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};

use patron_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;
mod confirm;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{
    run_aadhaar, run_cleanup, run_dates, run_duplicates, run_email, run_export, run_mobile,
    run_resolve_date,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));

    let result = match &cli.command {
        Command::Cleanup(args) => run_cleanup(args),
        Command::Mobile(args) => run_mobile(args),
        Command::Email(args) => run_email(args),
        Command::Aadhaar(args) => run_aadhaar(args),
        Command::Dates(args) => run_dates(args),
        Command::ResolveDate(args) => run_resolve_date(args),
        Command::Duplicates(args) => run_duplicates(args),
        Command::Export(args) => run_export(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        },
    }
}
