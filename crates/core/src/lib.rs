//! Innkeep Core Library
//!
//! Hotel and booking models, their validation rules, and the document
//! storage they are persisted through.

pub mod config;
pub mod error;
pub mod invariants;
pub mod models;
pub mod storage;
pub mod validation;

pub use config::{ConfigError, DatabaseConfig, InnkeepConfig, LoggingConfig};
pub use error::{Error, Result};
pub use models::*;
pub use storage::{Database, HotelRepository, HotelStore};
pub use validation::{FieldViolation, ValidationReport};
