use crate::{CellRef, ColumnRef};

/// A suspended ambiguous-date decision.
///
/// Created when a two-digit-year date is encountered during a date
/// pass. The surrounding scan does not block on it; the request is
/// handed back to the caller, who resolves it in a later, independent
/// invocation. Serializable so the caller can park it across process
/// boundaries. Resolved exactly once, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PendingClarification {
    pub column: ColumnRef,
    /// 1-based row of the ambiguous cell.
    pub row: usize,
    /// The original cell text, e.g. `05/06/20`.
    pub original: String,
    /// Fully-qualified candidate with the 19xx century, e.g. `05/06/1920`.
    pub candidate_1900s: String,
    /// Fully-qualified candidate with the 20xx century, e.g. `05/06/2020`.
    pub candidate_2000s: String,
}

impl PendingClarification {
    pub fn cell(&self) -> CellRef {
        CellRef {
            column: self.column,
            row: self.row,
        }
    }
}

/// The operator's answer to a [`PendingClarification`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClarificationChoice {
    /// Use the 19xx candidate.
    Century1900,
    /// Use the 20xx candidate.
    Century2000,
    /// The value cannot be salvaged; clear the cell.
    MarkInvalid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_round_trips_through_json() {
        let pending = PendingClarification {
            column: ColumnRef::from_index(6),
            row: 14,
            original: "05/06/20".to_string(),
            candidate_1900s: "05/06/1920".to_string(),
            candidate_2000s: "05/06/2020".to_string(),
        };
        let json = serde_json::to_string(&pending).expect("serialize pending");
        let round: PendingClarification =
            serde_json::from_str(&json).expect("deserialize pending");
        assert_eq!(round, pending);
        assert_eq!(round.cell().to_string(), "G14");
    }
}
