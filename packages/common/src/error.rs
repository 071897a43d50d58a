use thiserror::Error;

pub type CommonResult<T> = Result<T, CommonError>;

/// Failures reading shared configuration
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
