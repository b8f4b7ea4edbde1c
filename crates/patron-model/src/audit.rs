use std::fmt;

use chrono::{DateTime, Utc};

/// Category of a logged action, one per tool family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ActionCategory {
    DataCleanup,
    Validation,
    Export,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionCategory::DataCleanup => "Data Cleanup",
            ActionCategory::Validation => "Validation",
            ActionCategory::Export => "Export",
        };
        f.write_str(label)
    }
}

/// One immutable audit record. Created by the orchestrator for every
/// mutated cell (not per column) so any data loss can be traced back
/// to its cause. Append-only; never mutated or deleted by the engine.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub category: ActionCategory,
    /// General description of the target, e.g. `Mobile Validation`.
    pub target: String,
    /// A1 reference of the affected cell, range, or column.
    pub cell_ref: String,
    /// Human-readable description of the change.
    pub detail: String,
}

impl AuditEntry {
    pub fn new(
        category: ActionCategory,
        target: impl Into<String>,
        cell_ref: impl fmt::Display,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            category,
            target: target.into(),
            cell_ref: cell_ref.to_string(),
            detail: detail.into(),
        }
    }
}
