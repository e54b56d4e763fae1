//! Database value parsing utilities
//!
//! Provides error-safe parsing of stored values.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Error as SqlError;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Parse a UUID from a database string column
pub fn parse_uuid(idx: usize, s: &str) -> Result<Uuid, SqlError> {
    Uuid::parse_str(s).map_err(|e| SqlError::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse a DateTime from an RFC3339 string
pub fn parse_datetime(idx: usize, s: &str) -> Result<DateTime<Utc>, SqlError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SqlError::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse a JSON array column (facilities, images, bookings)
pub fn parse_json<T: DeserializeOwned>(idx: usize, s: &str) -> Result<T, SqlError> {
    serde_json::from_str(s).map_err(|e| SqlError::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Extension trait for converting rusqlite Results to Option
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, SqlError>;
}

impl<T> OptionalExt<T> for Result<T, SqlError> {
    fn optional(self) -> Result<Option<T>, SqlError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
