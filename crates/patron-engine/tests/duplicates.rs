//! Duplicate scan behavior: first-occurrence tracking, batched
//! resolution, and the clear-versus-delete precedence.

use patron_engine::{
    DuplicatePolicy, InMemoryTable, MemoryAuditSink, ScriptedConfirm, TabularSource,
    handle_duplicates,
};
use patron_model::{CellRef, CellValue, ColumnRef};

fn columns(letters: &str) -> Vec<ColumnRef> {
    ColumnRef::parse_list(letters).expect("column letters")
}

fn cell_text(table: &InMemoryTable, a1: &str) -> String {
    table
        .cell(CellRef::parse(a1).expect("cell ref"))
        .expect("cell in bounds")
        .display_string()
}

#[test]
fn remove_row_deletes_later_occurrences_highest_first() {
    // Rows 2-5 hold A, A, B, A: rows 3 and 5 are duplicates.
    let mut table = InMemoryTable::from_strings(vec![
        vec!["card"],
        vec!["A"],
        vec!["A"],
        vec!["B"],
        vec!["A"],
    ]);
    let mut audit = MemoryAuditSink::new();
    let mut confirm = ScriptedConfirm::default();

    let report = handle_duplicates(
        &mut table,
        &mut audit,
        &mut confirm,
        &columns("A"),
        DuplicatePolicy::RemoveRow,
    )
    .expect("scan runs");

    assert_eq!(report.duplicates_found, 2);
    assert_eq!(report.rows_removed, 2);
    assert_eq!(report.cells_cleared, 0);

    // Descending deletion keeps row "B" intact at its shifted position.
    assert_eq!(table.row_count(), 3);
    assert_eq!(cell_text(&table, "A2"), "A");
    assert_eq!(cell_text(&table, "A3"), "B");
}

#[test]
fn first_occurrence_is_never_flagged() {
    let mut table = InMemoryTable::from_strings(vec![
        vec!["card"],
        vec!["X"],
        vec!["Y"],
        vec!["Z"],
    ]);
    let mut audit = MemoryAuditSink::new();
    let mut confirm = ScriptedConfirm::default();

    let report = handle_duplicates(
        &mut table,
        &mut audit,
        &mut confirm,
        &columns("A"),
        DuplicatePolicy::RemoveRow,
    )
    .expect("scan runs");

    assert_eq!(report.duplicates_found, 0);
    assert_eq!(table.row_count(), 4);
    assert!(audit.entries.is_empty());
}

#[test]
fn type_sensitive_keys_keep_text_and_number_apart() {
    let mut table = InMemoryTable::new(vec![
        vec![CellValue::Text("id".into())],
        vec![CellValue::Text("1".into())],
        vec![CellValue::Number(1.0)],
        vec![CellValue::Bool(true)],
        vec![CellValue::Bool(true)],
    ]);
    let mut audit = MemoryAuditSink::new();
    let mut confirm = ScriptedConfirm::default();

    let report = handle_duplicates(
        &mut table,
        &mut audit,
        &mut confirm,
        &columns("A"),
        DuplicatePolicy::ClearCell,
    )
    .expect("scan runs");

    // "1" vs 1 differ by type; booleans never participate.
    assert_eq!(report.duplicates_found, 0);
    assert_eq!(report.cells_cleared, 0);
}

#[test]
fn interactive_mode_decides_per_occurrence() {
    let mut table = InMemoryTable::from_strings(vec![
        vec!["card"],
        vec!["A"],
        vec!["A"],
        vec!["A"],
        vec!["A"],
    ]);
    let mut audit = MemoryAuditSink::new();
    // Same key, three different answers: clear, skip, remove.
    let mut confirm = ScriptedConfirm::new([Some(1), None, Some(0)]);

    let report = handle_duplicates(
        &mut table,
        &mut audit,
        &mut confirm,
        &columns("A"),
        DuplicatePolicy::Interactive,
    )
    .expect("scan runs");

    assert_eq!(report.duplicates_found, 3);
    assert_eq!(report.cells_cleared, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.rows_removed, 1);
    assert_eq!(confirm.prompts.len(), 3);

    assert_eq!(table.row_count(), 4);
    assert_eq!(cell_text(&table, "A2"), "A"); // first occurrence
    assert_eq!(cell_text(&table, "A3"), ""); // cleared
    assert_eq!(cell_text(&table, "A4"), "A"); // skipped
}

#[test]
fn delete_wins_over_clear_across_columns() {
    // Column A flags row 3 for clearing; column B flags the same row
    // for deletion. The clear lands first, then the delete removes
    // the row, so deletion takes precedence.
    let mut table = InMemoryTable::from_strings(vec![
        vec!["email", "card"],
        vec!["x@example.org", "C1"],
        vec!["x@example.org", "C1"],
    ]);
    let mut audit = MemoryAuditSink::new();
    // Column A's duplicate: clear. Column B's duplicate: remove row.
    let mut confirm = ScriptedConfirm::new([Some(1), Some(0)]);

    let report = handle_duplicates(
        &mut table,
        &mut audit,
        &mut confirm,
        &columns("A, B"),
        DuplicatePolicy::Interactive,
    )
    .expect("scan runs");

    assert_eq!(report.cells_cleared, 1);
    assert_eq!(report.rows_removed, 1);
    assert_eq!(table.row_count(), 2);
    assert_eq!(cell_text(&table, "B2"), "C1");
}

#[test]
fn first_occurrence_map_resets_between_columns() {
    let mut table = InMemoryTable::from_strings(vec![
        vec!["a", "b"],
        vec!["K", "K"],
    ]);
    let mut audit = MemoryAuditSink::new();
    let mut confirm = ScriptedConfirm::default();

    // The same value in two different columns is not a duplicate;
    // each column is scanned independently.
    let report = handle_duplicates(
        &mut table,
        &mut audit,
        &mut confirm,
        &columns("A, B"),
        DuplicatePolicy::RemoveRow,
    )
    .expect("scan runs");
    assert_eq!(report.duplicates_found, 0);
}
