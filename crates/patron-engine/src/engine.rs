//! Validation orchestrator.
//!
//! One function per operation. Every pass follows the same
//! discipline: snapshot the column, compute one outcome per data row
//! against the snapshot, then commit the changed cells in a single
//! batched write and append one audit entry per mutated cell. An
//! error raised before the batch write leaves the table untouched and
//! the audit trail empty.

use tracing::debug;

use patron_model::{
    ActionCategory, AuditEntry, CellRef, CellValue, ClarificationChoice, ColumnRef,
    PendingClarification, RangeRef,
};

use crate::aadhaar;
use crate::audit_sink::AuditSink;
use crate::cleanup;
use crate::confirm::ConfirmChannel;
use crate::dates;
use crate::duplicates::{self, DuplicatePolicy, DuplicateReport};
use crate::email::{self, DomainCache};
use crate::error::Result;
use crate::lookup::{LookupFailurePolicy, MxLookup};
use crate::mobile;
use crate::outcome::Outcome;
use crate::source::TabularSource;

/// Per-pass cell counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Data cells examined (header excluded).
    pub scanned: usize,
    /// Cells rewritten to a canonical form.
    pub normalized: usize,
    /// Cells cleared because their value was invalid.
    pub cleared: usize,
    /// Cells left as they were.
    pub unchanged: usize,
}

impl PassReport {
    pub fn changed(&self) -> usize {
        self.normalized + self.cleared
    }
}

/// A date pass also carries the clarifications it suspended on.
/// Every ambiguous cell in the pass gets its own entry; each resolves
/// independently via [`resolve_date_clarification`].
#[derive(Debug, Default)]
pub struct DatePassReport {
    pub pass: PassReport,
    pub pending: Vec<PendingClarification>,
}

/// Collapse line breaks and extra spaces in one column.
pub fn clean_line_breaks_column(
    source: &mut dyn TabularSource,
    audit: &mut dyn AuditSink,
    column: ColumnRef,
) -> Result<PassReport> {
    let (report, _) = run_column_pass(
        source,
        audit,
        column,
        ActionCategory::DataCleanup,
        "Column Cleanup",
        |value, _| Ok(cleanup::clean_line_breaks(value)),
    )?;
    Ok(report)
}

/// Advanced cleanup over a rectangular range. The header row is never
/// touched even when the range includes it.
pub fn clean_range(
    source: &mut dyn TabularSource,
    audit: &mut dyn AuditSink,
    range: RangeRef,
) -> Result<PassReport> {
    let mut report = PassReport::default();
    let mut changes: Vec<(CellRef, CellValue)> = Vec::new();
    let mut entries: Vec<AuditEntry> = Vec::new();

    for column in range.columns() {
        let values = source.column_values(column)?;
        let last_row = range.end.row.min(values.len());
        for row in range.start.row..=last_row {
            if row == 1 {
                continue;
            }
            let value = &values[row - 1];
            let cell = CellRef { column, row };
            report.scanned += 1;
            match cleanup::clean_advanced(value) {
                Outcome::Normalized(new) => {
                    entries.push(AuditEntry::new(
                        ActionCategory::DataCleanup,
                        "Range Cleanup",
                        cell,
                        format!("Cleaned '{value}' to '{new}'."),
                    ));
                    changes.push((cell, new));
                    report.normalized += 1;
                }
                _ => report.unchanged += 1,
            }
        }
    }

    if !changes.is_empty() {
        source.set_cells(&changes)?;
    }
    for entry in entries {
        audit.append(entry);
    }
    Ok(report)
}

/// Normalize and validate mobile numbers in one column.
pub fn validate_mobile_column(
    source: &mut dyn TabularSource,
    audit: &mut dyn AuditSink,
    column: ColumnRef,
) -> Result<PassReport> {
    let (report, _) = run_column_pass(
        source,
        audit,
        column,
        ActionCategory::Validation,
        "Mobile Validation",
        |value, _| Ok(mobile::normalize_mobile(value)),
    )?;
    Ok(report)
}

/// Validate email syntax and domain reachability in one column.
///
/// The domain cache lives exactly as long as this call.
pub fn validate_email_column(
    source: &mut dyn TabularSource,
    audit: &mut dyn AuditSink,
    lookup: &mut dyn MxLookup,
    policy: LookupFailurePolicy,
    column: ColumnRef,
) -> Result<PassReport> {
    let mut cache = DomainCache::new();
    let (report, _) = run_column_pass(
        source,
        audit,
        column,
        ActionCategory::Validation,
        "Email Validation",
        |value, _| email::check_email(value, &mut cache, lookup, policy),
    )?;
    Ok(report)
}

/// Validate Aadhaar numbers in one column.
pub fn validate_aadhaar_column(
    source: &mut dyn TabularSource,
    audit: &mut dyn AuditSink,
    column: ColumnRef,
) -> Result<PassReport> {
    let (report, _) = run_column_pass(
        source,
        audit,
        column,
        ActionCategory::Validation,
        "Aadhaar Validation",
        |value, _| Ok(aadhaar::validate_aadhaar(value)),
    )?;
    Ok(report)
}

/// Validate and format dates in one column.
///
/// Ambiguous two-digit-year cells are neither written nor audited
/// here; they come back as pending clarifications while every other
/// row is auto-resolved in the same pass.
pub fn validate_date_column(
    source: &mut dyn TabularSource,
    audit: &mut dyn AuditSink,
    column: ColumnRef,
) -> Result<DatePassReport> {
    let (pass, pending) = run_column_pass(
        source,
        audit,
        column,
        ActionCategory::Validation,
        "Date Validation",
        |value, cell| Ok(dates::validate_date(value, cell)),
    )?;
    Ok(DatePassReport { pass, pending })
}

/// Resolve one suspended date clarification.
///
/// Re-runs the automatic parsing paths on the chosen candidate,
/// writes the formatted date or clears the cell, and emits a distinct
/// manually-clarified audit entry. A request whose cell no longer
/// holds the original ambiguous text is stale (already resolved, or
/// the row moved); it is dropped without writing or auditing.
pub fn resolve_date_clarification(
    source: &mut dyn TabularSource,
    audit: &mut dyn AuditSink,
    pending: &PendingClarification,
    choice: &ClarificationChoice,
) -> Result<Outcome> {
    let cell = pending.cell();
    let values = source.column_values(pending.column)?;
    let current = pending
        .row
        .checked_sub(1)
        .and_then(|index| values.get(index))
        .map(CellValue::display_string)
        .unwrap_or_default();
    if current.trim() != pending.original {
        debug!(%cell, original = %pending.original, "stale clarification dropped");
        return Ok(Outcome::Unchanged);
    }
    let outcome = dates::resolve_choice(pending, choice);
    match &outcome {
        Outcome::Normalized(new) => {
            source.set_cells(&[(cell, new.clone())])?;
            audit.append(AuditEntry::new(
                ActionCategory::Validation,
                "Date Validation (Manual)",
                cell,
                format!(
                    "User clarified ambiguous year '{}' as '{new}'.",
                    pending.original
                ),
            ));
        }
        Outcome::Invalid(_) => {
            source.clear_cells(&[cell])?;
            let detail = match choice {
                ClarificationChoice::MarkInvalid => format!(
                    "User marked ambiguous year date '{}' as invalid.",
                    pending.original
                ),
                ClarificationChoice::Century1900 => format!(
                    "User-clarified date '{}' was still invalid and was removed.",
                    pending.candidate_1900s
                ),
                ClarificationChoice::Century2000 => format!(
                    "User-clarified date '{}' was still invalid and was removed.",
                    pending.candidate_2000s
                ),
            };
            audit.append(AuditEntry::new(
                ActionCategory::Validation,
                "Date Validation (Manual)",
                cell,
                detail,
            ));
        }
        Outcome::Unchanged | Outcome::NeedsClarification(_) => {}
    }
    Ok(outcome)
}

/// Scan one or more columns for duplicates and resolve them.
pub fn handle_duplicates(
    source: &mut dyn TabularSource,
    audit: &mut dyn AuditSink,
    confirm: &mut dyn ConfirmChannel,
    columns: &[ColumnRef],
    policy: DuplicatePolicy,
) -> Result<DuplicateReport> {
    duplicates::handle_duplicates(source, audit, confirm, columns, policy)
}

/// Rows whose cell in `filter_column` equals `filter_value` (trimmed
/// string comparison), header always included, as display strings.
pub fn export_filtered(
    source: &dyn TabularSource,
    filter_column: ColumnRef,
    filter_value: &str,
) -> Result<Vec<Vec<String>>> {
    let filter = source.column_values(filter_column)?;
    let wanted = filter_value.trim();

    let mut columns = Vec::with_capacity(source.column_count());
    for index in 0..source.column_count() {
        columns.push(source.column_values(ColumnRef::from_index(index))?);
    }

    let mut rows = Vec::new();
    for row_index in 0..source.row_count() {
        let keep = row_index == 0 || filter[row_index].display_string().trim() == wanted;
        if keep {
            rows.push(
                columns
                    .iter()
                    .map(|col| col[row_index].display_string())
                    .collect(),
            );
        }
    }
    Ok(rows)
}

/// Shared pass skeleton: snapshot, per-row outcomes, one batched
/// write, audits only after the write commits.
fn run_column_pass<F>(
    source: &mut dyn TabularSource,
    audit: &mut dyn AuditSink,
    column: ColumnRef,
    category: ActionCategory,
    target: &str,
    mut validate: F,
) -> Result<(PassReport, Vec<PendingClarification>)>
where
    F: FnMut(&CellValue, CellRef) -> Result<Outcome>,
{
    let values = source.column_values(column)?;
    let mut report = PassReport::default();
    let mut changes: Vec<(CellRef, CellValue)> = Vec::new();
    let mut entries: Vec<AuditEntry> = Vec::new();
    let mut pending: Vec<PendingClarification> = Vec::new();

    for (index, value) in values.iter().enumerate().skip(1) {
        let cell = CellRef {
            column,
            row: index + 1,
        };
        report.scanned += 1;
        match validate(value, cell)? {
            Outcome::Unchanged => report.unchanged += 1,
            Outcome::Normalized(new) => {
                entries.push(AuditEntry::new(
                    category,
                    target,
                    cell,
                    format!("Formatted '{value}' to '{new}'."),
                ));
                changes.push((cell, new));
                report.normalized += 1;
            }
            Outcome::Invalid(reason) => {
                entries.push(AuditEntry::new(
                    category,
                    target,
                    cell,
                    reason.removal_detail(&value.display_string()),
                ));
                changes.push((cell, CellValue::Empty));
                report.cleared += 1;
            }
            Outcome::NeedsClarification(request) => pending.push(request),
        }
    }

    debug!(
        column = %column,
        target,
        scanned = report.scanned,
        changed = report.changed(),
        pending = pending.len(),
        "column pass computed"
    );

    if !changes.is_empty() {
        source.set_cells(&changes)?;
    }
    for entry in entries {
        audit.append(entry);
    }
    Ok((report, pending))
}
