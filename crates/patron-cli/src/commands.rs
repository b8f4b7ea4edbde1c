//! One function per subcommand: load the table, run the engine pass,
//! persist the table and the audit trail, print a summary.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use patron_engine::{
    DuplicatePolicy, InMemoryTable, LookupFailurePolicy, MemoryAuditSink, Outcome,
    ScriptedConfirm, engine,
};
use patron_model::{ActionCategory, AuditEntry, ClarificationChoice, ColumnRef, RangeRef};

use crate::cli::{
    CenturyArg, CleanupArgs, ColumnArgs, DatesArgs, DuplicateModeArg, DuplicatesArgs, EmailArgs,
    ExportArgs, LookupFailureArg, ResolveDateArgs, TableArgs,
};
use patron_cli::table_io::{
    append_action_log, load_pending, load_table, merge_pending, save_pending, save_table,
    write_rows,
};

use crate::confirm::{StdinConfirm, parse_choice_script};
use crate::summary::{print_duplicate_summary, print_pass_summary};

pub fn run_cleanup(args: &CleanupArgs) -> Result<()> {
    let span = info_span!("cleanup");
    let _guard = span.enter();
    let mut table = load_table(&args.table.table)?;
    let mut audit = MemoryAuditSink::new();

    let report = match (&args.column, &args.range) {
        (Some(column), None) => {
            let column = ColumnRef::parse(column)?;
            engine::clean_line_breaks_column(&mut table, &mut audit, column)?
        }
        (None, Some(range)) => {
            let range = RangeRef::parse(range)?;
            engine::clean_range(&mut table, &mut audit, range)?
        }
        _ => bail!("cleanup needs exactly one of --column or --range"),
    };

    finish(&args.table, &table, &audit)?;
    print_pass_summary("Cleanup", &report);
    Ok(())
}

pub fn run_mobile(args: &ColumnArgs) -> Result<()> {
    let span = info_span!("mobile");
    let _guard = span.enter();
    let mut table = load_table(&args.table.table)?;
    let mut audit = MemoryAuditSink::new();
    let column = ColumnRef::parse(&args.column)?;

    let report = engine::validate_mobile_column(&mut table, &mut audit, column)?;

    finish(&args.table, &table, &audit)?;
    print_pass_summary("Mobile Validation", &report);
    Ok(())
}

pub fn run_email(args: &EmailArgs) -> Result<()> {
    let span = info_span!("email");
    let _guard = span.enter();
    let mut table = load_table(&args.column.table.table)?;
    let mut audit = MemoryAuditSink::new();
    let column = ColumnRef::parse(&args.column.column)?;
    let policy = match args.on_lookup_failure {
        LookupFailureArg::AssumeValid => LookupFailurePolicy::AssumeValid,
        LookupFailureArg::AssumeInvalid => LookupFailurePolicy::AssumeInvalid,
        LookupFailureArg::Reject => LookupFailurePolicy::Reject,
    };
    let mut lookup = patron_dns::DohResolver::new().context("build DNS resolver")?;

    let report =
        engine::validate_email_column(&mut table, &mut audit, &mut lookup, policy, column)?;

    finish(&args.column.table, &table, &audit)?;
    print_pass_summary("Email Validation", &report);
    Ok(())
}

pub fn run_aadhaar(args: &ColumnArgs) -> Result<()> {
    let span = info_span!("aadhaar");
    let _guard = span.enter();
    let mut table = load_table(&args.table.table)?;
    let mut audit = MemoryAuditSink::new();
    let column = ColumnRef::parse(&args.column)?;

    let report = engine::validate_aadhaar_column(&mut table, &mut audit, column)?;

    finish(&args.table, &table, &audit)?;
    print_pass_summary("Aadhaar Validation", &report);
    Ok(())
}

pub fn run_dates(args: &DatesArgs) -> Result<()> {
    let span = info_span!("dates");
    let _guard = span.enter();
    let mut table = load_table(&args.column.table.table)?;
    let mut audit = MemoryAuditSink::new();
    let column = ColumnRef::parse(&args.column.column)?;

    let report = engine::validate_date_column(&mut table, &mut audit, column)?;

    finish(&args.column.table, &table, &audit)?;
    print_pass_summary("Date Validation", &report.pass);

    if !report.pending.is_empty() {
        let mut pending = load_pending(&args.pending_file)?;
        merge_pending(&mut pending, report.pending);
        save_pending(&args.pending_file, &pending)?;
        println!(
            "{} ambiguous date(s) need clarification (see {}):",
            pending.len(),
            args.pending_file.display()
        );
        for (index, request) in pending.iter().enumerate() {
            println!(
                "  [{index}] {} at {}: {} or {}?",
                request.original,
                request.cell(),
                request.candidate_1900s,
                request.candidate_2000s
            );
        }
        println!("Resolve with: patron-prep resolve-date --index <N> --choice <1900|2000|invalid>");
    }
    Ok(())
}

pub fn run_resolve_date(args: &ResolveDateArgs) -> Result<()> {
    let span = info_span!("resolve_date");
    let _guard = span.enter();
    let mut pending = load_pending(&args.pending_file)?;
    if args.index >= pending.len() {
        bail!(
            "pending index {} out of range ({} request(s) outstanding)",
            args.index,
            pending.len()
        );
    }
    let request = pending.remove(args.index);
    let choice = match args.choice {
        CenturyArg::Century1900 => ClarificationChoice::Century1900,
        CenturyArg::Century2000 => ClarificationChoice::Century2000,
        CenturyArg::Invalid => ClarificationChoice::MarkInvalid,
    };

    let mut table = load_table(&args.table.table)?;
    let mut audit = MemoryAuditSink::new();
    let outcome = engine::resolve_date_clarification(&mut table, &mut audit, &request, &choice)?;
    info!(cell = %request.cell(), ?outcome, "clarification resolved");

    finish(&args.table, &table, &audit)?;
    save_pending(&args.pending_file, &pending)?;
    if outcome == Outcome::Unchanged {
        println!(
            "Request for {} no longer matches the cell; dropped it ({} request(s) remaining).",
            request.cell(),
            pending.len()
        );
    } else {
        println!(
            "Resolved {} ({} request(s) remaining).",
            request.cell(),
            pending.len()
        );
    }
    Ok(())
}

pub fn run_duplicates(args: &DuplicatesArgs) -> Result<()> {
    let span = info_span!("duplicates");
    let _guard = span.enter();
    let mut table = load_table(&args.table.table)?;
    let mut audit = MemoryAuditSink::new();
    let columns = ColumnRef::parse_list(&args.columns)?;
    let policy = match args.mode {
        DuplicateModeArg::Interactive => DuplicatePolicy::Interactive,
        DuplicateModeArg::RemoveRow => DuplicatePolicy::RemoveRow,
        DuplicateModeArg::ClearCell => DuplicatePolicy::ClearCell,
    };

    let report = if let Some(list) = &args.choices {
        let mut confirm = ScriptedConfirm::new(parse_choice_script(list)?);
        engine::handle_duplicates(&mut table, &mut audit, &mut confirm, &columns, policy)?
    } else {
        let mut confirm = StdinConfirm;
        engine::handle_duplicates(&mut table, &mut audit, &mut confirm, &columns, policy)?
    };

    finish(&args.table, &table, &audit)?;
    print_duplicate_summary(&report);
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let span = info_span!("export");
    let _guard = span.enter();
    let table = load_table(&args.table)?;
    let column = ColumnRef::parse(&args.column)?;

    let rows = engine::export_filtered(&table, column, &args.value)?;
    if rows.len() <= 1 {
        println!("No data rows matched '{}' in column {column}.", args.value);
        return Ok(());
    }
    write_rows(&args.output, &rows)?;

    let entry = AuditEntry::new(
        ActionCategory::Export,
        "CSV Export",
        format!("File: {}", args.output.display()),
        format!(
            "Exported {} rows where column {column} was '{}'.",
            rows.len() - 1,
            args.value
        ),
    );
    append_action_log(&args.action_log, &[entry])?;
    println!("Exported {} rows to {}.", rows.len() - 1, args.output.display());
    Ok(())
}

/// Persist the table and flush audit entries once a pass succeeded.
fn finish(args: &TableArgs, table: &InMemoryTable, audit: &MemoryAuditSink) -> Result<()> {
    let output = args.output.as_ref().unwrap_or(&args.table);
    save_table(output, table)?;
    append_action_log(&args.action_log, &audit.entries)?;
    info!(
        table = %output.display(),
        entries = audit.entries.len(),
        "pass committed"
    );
    Ok(())
}
