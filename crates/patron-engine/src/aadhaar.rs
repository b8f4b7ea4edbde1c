//! Aadhaar number validation.
//!
//! Structural only: exact length 12 after stripping non-digits, then
//! the Verhoeff checksum. Whether the number was actually issued is
//! out of scope.

use patron_model::CellValue;

use crate::outcome::{InvalidReason, Outcome};
use crate::verhoeff;

pub fn validate_aadhaar(value: &CellValue) -> Outcome {
    if value.is_empty() {
        return Outcome::Unchanged;
    }
    let original = value.display_string();
    let digits: String = original.chars().filter(char::is_ascii_digit).collect();

    if digits.len() == 12 {
        if verhoeff::validate(&digits) {
            if original == digits {
                Outcome::Unchanged
            } else {
                Outcome::Normalized(CellValue::Text(digits))
            }
        } else {
            Outcome::Invalid(InvalidReason::AadhaarChecksum)
        }
    } else if digits.is_empty() {
        // No digits at all: not an Aadhaar attempt, leave it alone.
        Outcome::Unchanged
    } else {
        Outcome::Invalid(InvalidReason::AadhaarLength)
    }
}
