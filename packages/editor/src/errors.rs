//! Error types for the editor

use pagecraft_blocks::BlockError;
use pagecraft_store::StoreError;
use pagecraft_theme::ThemeError;
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Block registry error: {0}")]
    Block(#[from] BlockError),

    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
