//! Core error types for stepnote-core.
//!
//! This module defines the error hierarchy using thiserror for better
//! error handling and reporting across the library.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stepnote-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Step feed errors
    #[error("Step feed error: {0}")]
    Feed(#[from] FeedError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Step feed errors.
///
/// The milestone engine itself never observes these: availability probes
/// fail closed to "unavailable" and subscription failures only affect the
/// reported status, never tracker correctness.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The step sensor is not present or permission was denied
    #[error("Step sensor unavailable")]
    SensorUnavailable,

    /// A subscription is already active on this feed
    #[error("Feed already has an active subscription")]
    AlreadySubscribed,
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Milestone thresholds must be strictly ascending
    #[error("Milestone thresholds must be strictly ascending: {previous} precedes {current}")]
    NonAscendingThresholds { previous: u32, current: u32 },

    /// Milestone thresholds must be positive
    #[error("Milestone threshold must be greater than zero")]
    ZeroThreshold,

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rusqlite_errors_map_to_query_failed() {
        let mapped = DatabaseError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(mapped, DatabaseError::QueryFailed(_)));
    }

    #[test]
    fn core_error_wraps_domain_errors() {
        let err: CoreError = ValidationError::ZeroThreshold.into();
        assert!(err.to_string().starts_with("Validation error"));

        let err: CoreError = FeedError::SensorUnavailable.into();
        assert!(err.to_string().contains("unavailable"));

        let err: CoreError = DatabaseError::Locked.into();
        assert!(err.to_string().contains("locked"));
    }
}
