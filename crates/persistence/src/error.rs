//! Error types for the persistence layer.
//!
//! Errors are grouped by category: resource state, validation of the data
//! being written, and failures of the backend itself.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to resource state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested row was not found.
    #[error("resource not found: {resource_type}/{id}")]
    NotFound { resource_type: String, id: i64 },
}

/// Errors raised when the data being written is not acceptable.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A relation points at rows that do not exist.
    #[error("invalid reference from {field}: {} does not exist", format_ids(.missing))]
    InvalidReference { field: String, missing: Vec<i64> },
}

/// Backend-specific errors.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is not reachable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection establishment failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Generic internal backend failure.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Stored data could not be decoded.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

fn format_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl StorageError {
    /// Shorthand for a missing row.
    pub fn not_found(resource_type: &str, id: i64) -> Self {
        StorageError::Resource(ResourceError::NotFound {
            resource_type: resource_type.to_string(),
            id,
        })
    }

    /// Returns true if this error reports a missing row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Resource(ResourceError::NotFound { .. }))
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
