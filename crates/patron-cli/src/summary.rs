//! Operation summaries printed after each run.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use patron_engine::{DuplicateReport, PassReport};

pub fn print_pass_summary(operation: &str, report: &PassReport) {
    let mut table = styled_table();
    table.set_header(vec!["Operation", "Scanned", "Normalized", "Cleared", "Unchanged"]);
    table.add_row(vec![
        Cell::new(operation),
        count_cell(report.scanned),
        count_cell(report.normalized),
        count_cell(report.cleared),
        count_cell(report.unchanged),
    ]);
    println!("{table}");
}

pub fn print_duplicate_summary(report: &DuplicateReport) {
    let mut table = styled_table();
    table.set_header(vec!["Duplicates", "Rows Removed", "Cells Cleared", "Skipped"]);
    table.add_row(vec![
        count_cell(report.duplicates_found),
        count_cell(report.rows_removed),
        count_cell(report.cells_cleared),
        count_cell(report.skipped),
    ]);
    println!("{table}");
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn count_cell(count: usize) -> Cell {
    Cell::new(count).set_alignment(CellAlignment::Right)
}
