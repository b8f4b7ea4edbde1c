//! Append-only audit sink capability.

use patron_model::AuditEntry;

/// Receives one entry per mutated cell. Entries are never read back,
/// mutated, or deleted by the engine.
pub trait AuditSink {
    fn append(&mut self, entry: AuditEntry);
}

/// Collects entries in memory; the CLI flushes them to the action-log
/// CSV, tests assert on them directly.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    pub entries: Vec<AuditEntry>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditSink for MemoryAuditSink {
    fn append(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }
}
