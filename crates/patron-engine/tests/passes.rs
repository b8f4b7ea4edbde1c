//! Column-pass behavior over an in-memory table: batched write-back,
//! per-cell audit entries, suspension, and idempotence.

use patron_engine::{
    InMemoryTable, LookupFailurePolicy, MemoryAuditSink, Outcome, StaticLookup, TabularSource,
    clean_range, export_filtered, resolve_date_clarification, validate_date_column,
    validate_email_column, validate_mobile_column,
};
use patron_model::{CellRef, CellValue, ClarificationChoice, ColumnRef, RangeRef};

fn column(letter: &str) -> ColumnRef {
    ColumnRef::parse(letter).expect("column letter")
}

fn cell_text(table: &InMemoryTable, a1: &str) -> String {
    table
        .cell(CellRef::parse(a1).expect("cell ref"))
        .expect("cell in bounds")
        .display_string()
}

#[test]
fn mobile_pass_normalizes_clears_and_audits() {
    let mut table = InMemoryTable::from_strings(vec![
        vec!["mobile"],
        vec!["9876543210"],
        vec!["+91 98765 43211"],
        vec!["5876543210"],
        vec![""],
    ]);
    let mut audit = MemoryAuditSink::new();

    let report = validate_mobile_column(&mut table, &mut audit, column("A")).expect("pass runs");

    assert_eq!(report.scanned, 4);
    assert_eq!(report.normalized, 1);
    assert_eq!(report.cleared, 1);
    assert_eq!(report.unchanged, 2);

    assert_eq!(cell_text(&table, "A2"), "9876543210");
    assert_eq!(cell_text(&table, "A3"), "9876543211");
    assert_eq!(cell_text(&table, "A4"), "");

    // One audit entry per mutated cell, none for untouched cells.
    assert_eq!(audit.entries.len(), 2);
    assert_eq!(audit.entries[0].cell_ref, "A3");
    assert!(audit.entries[0].detail.contains("'9876543211'"));
    assert_eq!(audit.entries[1].cell_ref, "A4");
    assert!(audit.entries[1].detail.contains("invalid number"));
}

#[test]
fn mobile_pass_is_idempotent() {
    let mut table = InMemoryTable::from_strings(vec![
        vec!["mobile"],
        vec!["919876543210"],
        vec!["09812345678"],
    ]);
    let mut audit = MemoryAuditSink::new();
    let first = validate_mobile_column(&mut table, &mut audit, column("A")).expect("first pass");
    assert_eq!(first.changed(), 2);

    let second = validate_mobile_column(&mut table, &mut audit, column("A")).expect("second pass");
    assert_eq!(second.changed(), 0);
    assert_eq!(second.unchanged, 2);
}

#[test]
fn operator_error_aborts_before_any_write_or_audit() {
    let mut table = InMemoryTable::from_strings(vec![vec!["mobile"], vec!["bad"]]);
    let snapshot = table.clone();
    let mut audit = MemoryAuditSink::new();

    let result = validate_mobile_column(&mut table, &mut audit, column("Q"));
    assert!(result.is_err());
    assert!(audit.entries.is_empty());
    assert_eq!(table.rows(), snapshot.rows());
}

#[test]
fn email_pass_judges_without_rewriting() {
    let mut table = InMemoryTable::from_strings(vec![
        vec!["email"],
        vec!["user@gmail.com"],
        vec!["not-an-email"],
        vec!["reader@library.example"],
        vec!["gone@dead.example"],
    ]);
    let mut audit = MemoryAuditSink::new();
    let mut lookup = StaticLookup::new(["library.example"]);

    let report = validate_email_column(
        &mut table,
        &mut audit,
        &mut lookup,
        LookupFailurePolicy::AssumeValid,
        column("A"),
    )
    .expect("pass runs");

    assert_eq!(report.normalized, 0);
    assert_eq!(report.cleared, 2);
    assert_eq!(cell_text(&table, "A2"), "user@gmail.com");
    assert_eq!(cell_text(&table, "A3"), "");
    assert_eq!(cell_text(&table, "A4"), "reader@library.example");
    assert_eq!(cell_text(&table, "A5"), "");

    // gmail.com is hard-coded and the syntax failure short-circuits,
    // so only the two real domains hit the resolver.
    assert_eq!(lookup.queries, vec!["library.example", "dead.example"]);
}

#[test]
fn date_pass_suspends_ambiguous_rows_and_resolves_later() {
    let mut table = InMemoryTable::from_strings(vec![
        vec!["dateofbirth"],
        vec!["15/06/2020"],
        vec!["05/06/20"],
        vec!["nonsense"],
    ]);
    let mut audit = MemoryAuditSink::new();

    let report = validate_date_column(&mut table, &mut audit, column("A")).expect("pass runs");

    // The scan did not block: other rows resolved in the same pass.
    assert_eq!(cell_text(&table, "A2"), "2020-06-15");
    assert_eq!(cell_text(&table, "A4"), "");
    // The ambiguous cell is untouched and unaudited so far.
    assert_eq!(cell_text(&table, "A3"), "05/06/20");
    assert_eq!(audit.entries.len(), 2);

    assert_eq!(report.pending.len(), 1);
    let pending = &report.pending[0];
    assert_eq!(pending.candidate_1900s, "05/06/1920");
    assert_eq!(pending.candidate_2000s, "05/06/2020");

    let outcome = resolve_date_clarification(
        &mut table,
        &mut audit,
        pending,
        &ClarificationChoice::Century2000,
    )
    .expect("resolution runs");
    assert_eq!(
        outcome,
        Outcome::Normalized(CellValue::Text("2020-06-05".into()))
    );
    assert_eq!(cell_text(&table, "A3"), "2020-06-05");

    let manual = audit.entries.last().expect("manual entry");
    assert_eq!(manual.target, "Date Validation (Manual)");
    assert!(manual.detail.contains("'2020-06-05'"));
}

#[test]
fn clarification_marked_invalid_clears_the_cell() {
    let mut table = InMemoryTable::from_strings(vec![vec!["joined"], vec!["01/01/99"]]);
    let mut audit = MemoryAuditSink::new();

    let report = validate_date_column(&mut table, &mut audit, column("A")).expect("pass runs");
    let pending = &report.pending[0];

    resolve_date_clarification(
        &mut table,
        &mut audit,
        pending,
        &ClarificationChoice::MarkInvalid,
    )
    .expect("resolution runs");
    assert_eq!(cell_text(&table, "A2"), "");
    assert!(
        audit
            .entries
            .last()
            .expect("manual entry")
            .detail
            .contains("marked ambiguous year date '01/01/99' as invalid")
    );
}

#[test]
fn resolving_the_same_clarification_twice_does_not_revert() {
    let mut table = InMemoryTable::from_strings(vec![vec!["joined"], vec!["05/06/20"]]);
    let mut audit = MemoryAuditSink::new();

    let report = validate_date_column(&mut table, &mut audit, column("A")).expect("pass runs");
    let pending = &report.pending[0];
    // A second scan of the untouched table yields an identical request.
    let twin = pending.clone();

    resolve_date_clarification(
        &mut table,
        &mut audit,
        pending,
        &ClarificationChoice::Century2000,
    )
    .expect("resolution runs");
    assert_eq!(cell_text(&table, "A2"), "2020-06-05");
    let entries_after_first = audit.entries.len();

    // The twin is stale: the cell no longer holds the ambiguous text,
    // so a conflicting answer must not overwrite the earlier decision.
    let outcome = resolve_date_clarification(
        &mut table,
        &mut audit,
        &twin,
        &ClarificationChoice::Century1900,
    )
    .expect("stale resolution runs");
    assert_eq!(outcome, Outcome::Unchanged);
    assert_eq!(cell_text(&table, "A2"), "2020-06-05");
    assert_eq!(audit.entries.len(), entries_after_first);
}

#[test]
fn range_cleanup_never_touches_the_header_row() {
    let mut table = InMemoryTable::from_strings(vec![
        vec!["city ,name", "note"],
        vec!["Kolkata ,West Bengal", "  padded  "],
        vec!["Chennai", "fine"],
    ]);
    let mut audit = MemoryAuditSink::new();
    let range = RangeRef::parse("A1:B3").expect("range");

    let report = clean_range(&mut table, &mut audit, range).expect("pass runs");

    // Row 1 is inside the range but is exempt, cleanable as it is.
    assert_eq!(cell_text(&table, "A1"), "city ,name");
    assert_eq!(cell_text(&table, "A2"), "Kolkata, West Bengal");
    assert_eq!(cell_text(&table, "B2"), "padded");
    assert_eq!(report.normalized, 2);
    assert_eq!(audit.entries.len(), 2);
}

#[test]
fn export_keeps_the_header_and_matches_trimmed_values() {
    let table = InMemoryTable::from_strings(vec![
        vec!["name", "status"],
        vec!["Asha", " Member "],
        vec!["Ravi", "Expired"],
        vec!["Meena", "Member"],
    ]);

    let rows = export_filtered(&table, column("B"), "Member").expect("export runs");

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["name".to_string(), "status".to_string()]);
    assert_eq!(rows[1][0], "Asha");
    assert_eq!(rows[2][0], "Meena");
}

#[test]
fn date_pass_is_idempotent_on_its_own_output() {
    let mut table = InMemoryTable::from_strings(vec![
        vec!["joined"],
        vec!["13/02/2020"],
        vec!["15-Jan-2024"],
    ]);
    let mut audit = MemoryAuditSink::new();
    validate_date_column(&mut table, &mut audit, column("A")).expect("first pass");
    assert_eq!(cell_text(&table, "A2"), "2020-02-13");

    let second = validate_date_column(&mut table, &mut audit, column("A")).expect("second pass");
    assert_eq!(second.pass.changed(), 0);
    assert!(second.pending.is_empty());
}
