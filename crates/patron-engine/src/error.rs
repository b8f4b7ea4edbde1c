use patron_model::{ColumnRef, ModelError};
use thiserror::Error;

use crate::lookup::LookupError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("column {0} is out of bounds")]
    ColumnOutOfBounds(ColumnRef),
    #[error("row {0} is out of bounds")]
    RowOutOfBounds(usize),
    #[error("domain lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
