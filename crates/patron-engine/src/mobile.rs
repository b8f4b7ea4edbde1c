//! Indian mobile number normalization.
//!
//! Valid numbers are exactly 10 digits starting with 6-9. A `91`
//! calling-code prefix (12 digits total) or a `0` trunk prefix (11
//! digits total) is stripped before the check. Purely local and
//! deterministic; no external calls.

use patron_model::CellValue;

use crate::outcome::{InvalidReason, Outcome};

const MOBILE_FIRST_DIGITS: [char; 4] = ['6', '7', '8', '9'];

pub fn normalize_mobile(value: &CellValue) -> Outcome {
    if value.is_empty() {
        return Outcome::Unchanged;
    }
    let original = value.display_string();
    let mut digits: String = original.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 12 && digits.starts_with("91") {
        digits.drain(..2);
    } else if digits.len() == 11 && digits.starts_with('0') {
        digits.drain(..1);
    }

    let first_ok = digits
        .chars()
        .next()
        .is_some_and(|c| MOBILE_FIRST_DIGITS.contains(&c));
    if digits.len() == 10 && first_ok {
        if original == digits {
            Outcome::Unchanged
        } else {
            Outcome::Normalized(CellValue::Text(digits))
        }
    } else {
        Outcome::Invalid(InvalidReason::MobileFormat)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn bare_ten_digit_number_is_unchanged() {
        assert_eq!(normalize_mobile(&text("9876543210")), Outcome::Unchanged);
    }

    #[test]
    fn calling_code_prefix_is_stripped() {
        assert_eq!(
            normalize_mobile(&text("919876543210")),
            Outcome::Normalized(text("9876543210"))
        );
        assert_eq!(
            normalize_mobile(&text("+91 98765 43210")),
            Outcome::Normalized(text("9876543210"))
        );
    }

    #[test]
    fn trunk_prefix_is_stripped() {
        assert_eq!(
            normalize_mobile(&text("09876543210")),
            Outcome::Normalized(text("9876543210"))
        );
    }

    #[test]
    fn leading_digit_outside_mobile_range_is_invalid() {
        assert_eq!(
            normalize_mobile(&text("5876543210")),
            Outcome::Invalid(InvalidReason::MobileFormat)
        );
    }

    #[test]
    fn wrong_length_is_invalid() {
        assert_eq!(
            normalize_mobile(&text("98765")),
            Outcome::Invalid(InvalidReason::MobileFormat)
        );
        // 11 digits without the trunk prefix do not shrink to 10.
        assert_eq!(
            normalize_mobile(&text("19876543210")),
            Outcome::Invalid(InvalidReason::MobileFormat)
        );
    }

    #[test]
    fn numeric_cells_normalize_to_text() {
        assert_eq!(
            normalize_mobile(&CellValue::Number(919876543210.0)),
            Outcome::Normalized(text("9876543210"))
        );
        // A numeric cell that is already the canonical digit string
        // displays identically, so it is left alone.
        assert_eq!(
            normalize_mobile(&CellValue::Number(9876543210.0)),
            Outcome::Unchanged
        );
    }

    #[test]
    fn empty_cells_are_skipped() {
        assert_eq!(normalize_mobile(&CellValue::Empty), Outcome::Unchanged);
    }

    proptest! {
        /// Whatever a pass normalizes, a second pass leaves alone.
        #[test]
        fn normalization_is_idempotent(input in "[0-9+() -]{0,16}") {
            if let Outcome::Normalized(cell) = normalize_mobile(&text(&input)) {
                prop_assert_eq!(normalize_mobile(&cell), Outcome::Unchanged);
            }
        }
    }
}
