use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid column reference: {0:?}")]
    InvalidColumnRef(String),
    #[error("invalid cell reference: {0:?}")]
    InvalidCellRef(String),
    #[error("row index must be >= 1, got {0}")]
    InvalidRowIndex(usize),
}

pub type Result<T> = std::result::Result<T, ModelError>;
