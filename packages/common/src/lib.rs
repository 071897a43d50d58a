//! Shared plumbing for the pagecraft packages: configuration, id
//! generation and the error type for both.

pub mod config;
pub mod error;
pub mod id_generator;

pub use config::*;
pub use error::*;
pub use id_generator::*;
