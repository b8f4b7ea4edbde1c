//! Validation and normalization engine for patron data.
//!
//! Per-column validators (mobile numbers, emails, Aadhaar numbers,
//! dates), text cleanup passes, duplicate detection/resolution, and
//! the orchestrator that applies one validator across a column with
//! batched write-back and a per-cell audit trail.
//!
//! The engine depends only on three capability traits — a tabular
//! data source, a confirmation channel, and an MX lookup — so it runs
//! identically against an in-memory table with a scripted operator
//! feed (tests, CLI) or any other host.

pub mod aadhaar;
pub mod audit_sink;
pub mod cleanup;
pub mod confirm;
pub mod dates;
pub mod duplicates;
pub mod email;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod mobile;
pub mod outcome;
pub mod source;
pub mod verhoeff;

pub use aadhaar::validate_aadhaar;
pub use audit_sink::{AuditSink, MemoryAuditSink};
pub use confirm::{ConfirmChannel, ScriptedConfirm};
pub use dates::validate_date;
pub use duplicates::{DuplicateKey, DuplicatePolicy, DuplicateReport, duplicate_key};
pub use email::{DomainCache, check_email};
pub use engine::{
    DatePassReport, PassReport, clean_line_breaks_column, clean_range, export_filtered,
    handle_duplicates, resolve_date_clarification, validate_aadhaar_column, validate_date_column,
    validate_email_column, validate_mobile_column,
};
pub use error::{EngineError, Result};
pub use lookup::{LookupError, LookupFailurePolicy, MxLookup, StaticLookup};
pub use mobile::normalize_mobile;
pub use outcome::{InvalidReason, Outcome};
pub use source::{InMemoryTable, TabularSource};
