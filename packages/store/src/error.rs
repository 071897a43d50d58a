//! Error types for page persistence

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Page title must not be empty")]
    MissingTitle,

    #[error("Slug is not URL-safe: {0:?}")]
    InvalidSlug(String),

    #[error("Slug already used by another page: {0}")]
    SlugTaken(String),

    #[error("Invalid publish date {value:?}: {reason}")]
    InvalidSchedule { value: String, reason: String },

    #[error("Page {0} has no publish date; use schedule_publish")]
    ScheduleWithoutDate(String),

    #[error("Preview secret must not be empty")]
    InvalidSecret,

    #[error("Page store lock poisoned")]
    Poisoned,
}
