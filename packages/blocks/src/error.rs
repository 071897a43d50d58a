//! Error types for the block catalogue

use thiserror::Error;

pub type BlockResult<T> = Result<T, BlockError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("Block type registered twice: {0}")]
    DuplicateType(String),

    #[error("Block type must not be empty")]
    EmptyType,

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}
