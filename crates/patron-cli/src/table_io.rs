//! CSV ingestion and persistence.
//!
//! CSV carries no cell types, so loading infers them: `TRUE`/`FALSE`
//! become booleans, numeric text becomes numbers, ISO dates become
//! typed dates, everything else stays text. Saving writes display
//! strings, so a load/save round trip preserves what the operator
//! sees.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use patron_engine::InMemoryTable;
use patron_model::{AuditEntry, CellValue, PendingClarification};

pub fn load_table(path: &Path) -> Result<InMemoryTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open table {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read table {}", path.display()))?;
        rows.push(record.iter().map(infer_cell).collect());
    }
    Ok(InMemoryTable::new(rows))
}

pub fn save_table(path: &Path, table: &InMemoryTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("write table {}", path.display()))?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(CellValue::display_string))
            .context("write table row")?;
    }
    writer.flush().context("flush table")?;
    Ok(())
}

pub fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("write export {}", path.display()))?;
    for row in rows {
        writer.write_record(row).context("write export row")?;
    }
    writer.flush().context("flush export")?;
    Ok(())
}

/// Append audit entries to the action-log CSV, creating it with a
/// header row on first use. The log is append-only.
pub fn append_action_log(path: &Path, entries: &[AuditEntry]) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let new_file = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open action log {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    if new_file {
        writer
            .write_record(["Timestamp", "Action Type", "Target", "Cell Reference", "Details"])
            .context("write action log header")?;
    }
    for entry in entries {
        writer
            .write_record([
                entry.timestamp.to_rfc3339(),
                entry.category.to_string(),
                entry.target.clone(),
                entry.cell_ref.clone(),
                entry.detail.clone(),
            ])
            .context("write action log entry")?;
    }
    writer.flush().context("flush action log")?;
    Ok(())
}

pub fn load_pending(path: &Path) -> Result<Vec<PendingClarification>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("read pending file {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parse pending file {}", path.display()))
}

/// Fold freshly scanned clarification requests into the queue. A
/// re-run of the same pass sees the same ambiguous cells again; the
/// fresh request replaces any queued one for the same cell so a cell
/// is never listed twice.
pub fn merge_pending(queue: &mut Vec<PendingClarification>, fresh: Vec<PendingClarification>) {
    queue.retain(|queued| !fresh.iter().any(|request| request.cell() == queued.cell()));
    queue.extend(fresh);
}

pub fn save_pending(path: &Path, pending: &[PendingClarification]) -> Result<()> {
    if pending.is_empty() {
        if path.exists() {
            std::fs::remove_file(path)
                .with_context(|| format!("remove pending file {}", path.display()))?;
        }
        return Ok(());
    }
    let data = serde_json::to_string_pretty(pending).context("serialize pending requests")?;
    std::fs::write(path, data).with_context(|| format!("write pending file {}", path.display()))?;
    Ok(())
}

fn infer_cell(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Empty;
    }
    match field {
        "TRUE" => return CellValue::Bool(true),
        "FALSE" => return CellValue::Bool(false),
        _ => {}
    }
    if let Ok(date) = NaiveDate::parse_from_str(field, "%Y-%m-%d") {
        return CellValue::Date(date);
    }
    if let Ok(number) = field.parse::<f64>()
        && number.is_finite()
    {
        return CellValue::Number(number);
    }
    CellValue::Text(field.to_string())
}
