//! Error types for Innkeep Core

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationReport;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by the caller's input rather than the backend
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::Conflict(_) | Error::NotFound(_)
        )
    }
}

impl From<ValidationReport> for Error {
    fn from(report: ValidationReport) -> Self {
        Error::Validation(report)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
