//! Backend abstraction for database drivers.
//!
//! This module defines the [`Backend`] trait, which covers the lifecycle of a
//! database driver (schema initialization and health checks) separately from
//! the data operations in [`storage`](super::storage).

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::BackendError;

/// Identifies the type of database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// SQLite database (file-based or in-memory).
    Sqlite,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Lifecycle operations shared by every database backend.
///
/// # Example
///
/// ```ignore
/// use campus_persistence::core::Backend;
///
/// async fn ensure_ready<B: Backend>(backend: &B) -> Result<(), BackendError> {
///     backend.initialize().await?;
///     backend.health_check().await
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Returns the kind of backend.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Checks if the backend is healthy and accepting connections.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Initializes the database schema if needed.
    async fn initialize(&self) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::Sqlite.to_string(), "sqlite");
    }
}
