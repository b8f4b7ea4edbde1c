//! Duplicate detection and resolution.
//!
//! Each requested column is scanned independently, top to bottom. The
//! first occurrence of a key is recorded, never flagged; every later
//! occurrence is a duplicate. Keys are type-sensitive: the string
//! `"1"` and the number `1` are distinct on purpose, and empty or
//! boolean cells never participate. Mutations are batched: cell
//! clears first, then row deletions in descending row order so earlier
//! deletions cannot shift a not-yet-deleted row's index.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use patron_model::{ActionCategory, AuditEntry, CellRef, CellValue, ColumnRef};

use crate::audit_sink::AuditSink;
use crate::confirm::ConfirmChannel;
use crate::error::Result;
use crate::source::TabularSource;

/// How duplicate occurrences are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Ask the confirmation channel once per occurrence.
    Interactive,
    /// Delete every duplicate's row.
    RemoveRow,
    /// Clear every duplicate's cell.
    ClearCell,
}

/// Composite duplicate key over (dynamic type tag, value).
///
/// `NaN` numbers are excluded (like empty cells) so the key stays
/// `Eq + Hash`; negative zero folds onto zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DuplicateKey {
    Text(String),
    Number(u64),
    Date(NaiveDate),
}

pub fn duplicate_key(value: &CellValue) -> Option<DuplicateKey> {
    match value {
        CellValue::Empty | CellValue::Bool(_) => None,
        CellValue::Text(s) if s.is_empty() => None,
        CellValue::Text(s) => Some(DuplicateKey::Text(s.clone())),
        CellValue::Number(n) if n.is_nan() => None,
        CellValue::Number(n) => {
            let canonical = if *n == 0.0 { 0.0 } else { *n };
            Some(DuplicateKey::Number(canonical.to_bits()))
        }
        CellValue::Date(d) => Some(DuplicateKey::Date(*d)),
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    /// Subsequent occurrences found, whatever their resolution.
    pub duplicates_found: usize,
    pub rows_removed: usize,
    pub cells_cleared: usize,
    pub skipped: usize,
}

/// Scan `columns` for duplicates and resolve them under `policy`.
///
/// All affected addresses are collected first; nothing is written
/// until every column has been scanned and every interactive choice
/// answered.
pub fn handle_duplicates(
    source: &mut dyn TabularSource,
    audit: &mut dyn AuditSink,
    confirm: &mut dyn ConfirmChannel,
    columns: &[ColumnRef],
    policy: DuplicatePolicy,
) -> Result<DuplicateReport> {
    let mut report = DuplicateReport::default();
    let mut cells_to_clear: Vec<CellRef> = Vec::new();
    let mut rows_to_delete: BTreeSet<usize> = BTreeSet::new();

    for &column in columns {
        let values = source.column_values(column)?;
        // First-occurrence map, reset for each column.
        let mut seen: HashMap<DuplicateKey, CellRef> = HashMap::new();

        for (index, value) in values.iter().enumerate().skip(1) {
            let Some(key) = duplicate_key(value) else {
                continue;
            };
            let row = index + 1;
            let cell = CellRef { column, row };
            let first = match seen.get(&key) {
                Some(first) => *first,
                None => {
                    seen.insert(key, cell);
                    continue;
                }
            };

            report.duplicates_found += 1;
            let decision = decide(policy, confirm, value, cell, first);
            match decision {
                Decision::RemoveRow => {
                    rows_to_delete.insert(row);
                    audit.append(AuditEntry::new(
                        ActionCategory::Validation,
                        "Duplicate Removal",
                        cell,
                        format!(
                            "Removed duplicate row. Value was '{value}', first seen at {first}."
                        ),
                    ));
                }
                Decision::ClearCell => {
                    cells_to_clear.push(cell);
                    audit.append(AuditEntry::new(
                        ActionCategory::Validation,
                        "Duplicate Removal",
                        cell,
                        format!(
                            "Cleared duplicate cell. Value was '{value}', first seen at {first}."
                        ),
                    ));
                }
                Decision::Skip => {
                    report.skipped += 1;
                }
            }
        }
    }

    report.cells_cleared = cells_to_clear.len();
    report.rows_removed = rows_to_delete.len();
    debug!(
        duplicates = report.duplicates_found,
        clears = report.cells_cleared,
        deletes = report.rows_removed,
        "applying duplicate resolution batch"
    );

    // Clears first; a row flagged for both is cleared then deleted,
    // so deletion effectively wins.
    if !cells_to_clear.is_empty() {
        source.clear_cells(&cells_to_clear)?;
    }
    for &row in rows_to_delete.iter().rev() {
        source.delete_row(row)?;
    }
    Ok(report)
}

#[derive(Debug, Clone, Copy)]
enum Decision {
    RemoveRow,
    ClearCell,
    Skip,
}

fn decide(
    policy: DuplicatePolicy,
    confirm: &mut dyn ConfirmChannel,
    value: &CellValue,
    cell: CellRef,
    first: CellRef,
) -> Decision {
    match policy {
        DuplicatePolicy::RemoveRow => Decision::RemoveRow,
        DuplicatePolicy::ClearCell => Decision::ClearCell,
        DuplicatePolicy::Interactive => {
            let prompt =
                format!("Duplicate value '{value}' at {cell}; first seen at {first}. Handle how?");
            match confirm.choose(&prompt, &["Remove Row", "Clear Cell", "Skip"]) {
                Some(0) => Decision::RemoveRow,
                Some(1) => Decision::ClearCell,
                // Cancelled counts as skip; it never aborts the scan.
                _ => Decision::Skip,
            }
        }
    }
}
