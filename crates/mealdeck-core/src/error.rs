//! Core error types for mealdeck-core.
//!
//! This module defines the error hierarchy using thiserror. Failure
//! categories mirror the boundaries of the system: storage, configuration,
//! input validation, and push delivery.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mealdeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Push subscription and delivery errors
    #[error("Push error: {0}")]
    Push(#[from] PushError),

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

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored record could not be decoded
    #[error("Corrupt record at '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// Store is locked by another writer
    #[error("Store is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors for user-supplied input.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Food name was empty after trimming
    #[error("Food name must not be empty")]
    EmptyFoodName,

    /// Food already exists in the catalog
    #[error("'{0}' is already in the catalog")]
    DuplicateFood(String),

    /// Food is not present where the operation requires it
    #[error("Unknown food: '{0}'")]
    UnknownFood(String),

    /// Subscription payload was malformed
    #[error("Invalid subscription data: {0}")]
    InvalidSubscription(String),
}

/// Push subscription and delivery errors.
#[derive(Error, Debug)]
pub enum PushError {
    /// Subscription updated too recently; retry after the given seconds
    #[error("Too many requests. Please wait {seconds_left} seconds.")]
    RateLimited { seconds_left: u64 },

    /// Another subscribe attempt is already in flight on this client
    #[error("A subscribe attempt is already in progress")]
    InProgress,

    /// Endpoint is permanently invalid (HTTP 404/410)
    #[error("Subscription endpoint is gone")]
    Gone,

    /// Transient delivery failure (network, timeout, 5xx)
    #[error("Push delivery failed: {0}")]
    Transport(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
