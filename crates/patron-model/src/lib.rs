//! Data model for the patron data prep tools.
//!
//! Cell values, A1-style references, audit records, and the
//! serializable pending-operation values that carry suspended
//! interactive decisions across invocations.

#![deny(unsafe_code)]

pub mod audit;
pub mod cell;
pub mod error;
pub mod pending;
pub mod refs;

pub use audit::{ActionCategory, AuditEntry};
pub use cell::CellValue;
pub use error::{ModelError, Result};
pub use pending::{ClarificationChoice, PendingClarification};
pub use refs::{CellRef, ColumnRef, RangeRef};
