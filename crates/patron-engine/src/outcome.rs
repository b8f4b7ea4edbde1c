use patron_model::{CellValue, PendingClarification};

/// Result of applying one validator to one cell. Exactly one outcome
/// per cell per pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The value already satisfies the validator.
    Unchanged,
    /// The value was rewritten to its canonical form.
    Normalized(CellValue),
    /// The value fails a structural rule; the cell is cleared.
    Invalid(InvalidReason),
    /// A two-digit-year date needs an external century choice.
    NeedsClarification(PendingClarification),
}

/// Why a cell was judged invalid. Distinct reasons keep the audit
/// trail specific enough to trace any data loss back to its cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    MobileFormat,
    EmailSyntax,
    EmailDomainUnreachable,
    AadhaarLength,
    AadhaarChecksum,
    DateUnparseable,
}

impl InvalidReason {
    /// Audit detail for the removal of `original`.
    pub fn removal_detail(self, original: &str) -> String {
        match self {
            InvalidReason::MobileFormat => {
                format!("Removed invalid number: '{original}'.")
            }
            InvalidReason::EmailSyntax => {
                format!("Removed email with invalid syntax: '{original}'.")
            }
            InvalidReason::EmailDomainUnreachable => {
                format!("Removed email with invalid domain (no MX record): '{original}'.")
            }
            InvalidReason::AadhaarLength => {
                format!("Removed invalid Aadhaar (not 12 digits): '{original}'.")
            }
            InvalidReason::AadhaarChecksum => {
                format!("Removed invalid Aadhaar (failed checksum): '{original}'.")
            }
            InvalidReason::DateUnparseable => {
                format!("Removed invalid date value: '{original}'.")
            }
        }
    }
}
