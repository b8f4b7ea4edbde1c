//! Date validation, formatting, and two-digit-year ambiguity handling.
//!
//! Three mutually exclusive paths, tried in order:
//!
//! 1. `D[D]/M[M]/YY` — inherently ambiguous between centuries; the
//!    cell suspends behind a [`PendingClarification`] carrying both
//!    fully-qualified candidates plus a "mark invalid" option.
//! 2. `D[D]/M[M]/YYYY` — parsed day-first (source locale convention
//!    beats month-first).
//! 3. Anything else is handed to a generic format list.
//!
//! Valid results are formatted `YYYY-MM-DD`. Cells already typed as a
//! date are left unchanged without reformatting; a text cell holding
//! the same date would be rewritten. That asymmetry is deliberate.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use patron_model::{CellRef, CellValue, ClarificationChoice, PendingClarification};

use crate::outcome::{InvalidReason, Outcome};

static TWO_DIGIT_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}[-/]\d{1,2}[-/])(\d{2})$").expect("two-digit-year regex compiles")
});

static DAY_MONTH_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[-/](\d{1,2})[-/](\d{4})$").expect("day-month-year regex compiles")
});

/// Fallback formats for values outside the slash-separated patterns.
const FALLBACK_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%Y",  // 15-Jan-2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%d.%m.%Y",  // 15.01.2024
    "%Y%m%d",    // 20240115
];

pub fn validate_date(value: &CellValue, cell: CellRef) -> Outcome {
    if value.is_empty() {
        return Outcome::Unchanged;
    }
    // Pre-typed dates are trusted as-is.
    if matches!(value, CellValue::Date(_)) {
        return Outcome::Unchanged;
    }
    let original = value.display_string();
    let text = original.trim();

    if let Some(captures) = TWO_DIGIT_YEAR_RE.captures(text) {
        let prefix = &captures[1];
        let year = &captures[2];
        return Outcome::NeedsClarification(PendingClarification {
            column: cell.column,
            row: cell.row,
            original: text.to_string(),
            candidate_1900s: format!("{prefix}19{year}"),
            candidate_2000s: format!("{prefix}20{year}"),
        });
    }

    match parse_unambiguous(text) {
        Some(date) => {
            let formatted = date.format("%Y-%m-%d").to_string();
            if original == formatted {
                Outcome::Unchanged
            } else {
                Outcome::Normalized(CellValue::Text(formatted))
            }
        }
        None => Outcome::Invalid(InvalidReason::DateUnparseable),
    }
}

/// Paths 2 and 3: explicit day-first parse, then the generic list.
pub fn parse_unambiguous(text: &str) -> Option<NaiveDate> {
    if let Some(captures) = DAY_MONTH_YEAR_RE.captures(text) {
        let day: u32 = captures[1].parse().ok()?;
        let month: u32 = captures[2].parse().ok()?;
        let year: i32 = captures[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Re-run the automatic paths on the operator's chosen candidate.
///
/// The chosen candidate can still fail (e.g. `29/02/1923`), in which
/// case the cell is cleared like any other invalid date.
pub fn resolve_choice(pending: &PendingClarification, choice: &ClarificationChoice) -> Outcome {
    let candidate = match choice {
        ClarificationChoice::Century1900 => &pending.candidate_1900s,
        ClarificationChoice::Century2000 => &pending.candidate_2000s,
        ClarificationChoice::MarkInvalid => {
            return Outcome::Invalid(InvalidReason::DateUnparseable);
        }
    };
    match parse_unambiguous(candidate) {
        Some(date) => Outcome::Normalized(CellValue::Text(date.format("%Y-%m-%d").to_string())),
        None => Outcome::Invalid(InvalidReason::DateUnparseable),
    }
}
