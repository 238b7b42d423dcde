//! Application state for the Campus REST API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the storage backend and the server configuration.

use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (typically implements
///   [`CourseStorage`](campus_persistence::core::CourseStorage),
///   [`StudentStorage`](campus_persistence::core::StudentStorage) and
///   [`Backend`](campus_persistence::core::Backend))
///
/// # Example
///
/// ```rust,ignore
/// use campus_rest::{AppState, ServerConfig};
/// use campus_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// S sits behind an Arc, so it does not need to be Clone itself
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a clone of the storage Arc.
    pub fn storage_arc(&self) -> Arc<S> {
        Arc::clone(&self.storage)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the enrollment cap for a single course.
    pub fn max_students_per_course(&self) -> usize {
        self.config.max_students_per_course
    }

    /// Builds the absolute URL of a course.
    pub fn course_url(&self, id: i64) -> String {
        format!("{}/api/v1/courses/{}/", self.base_url(), id)
    }

    /// Builds the absolute URL of a student.
    pub fn student_url(&self, id: i64) -> String {
        format!("{}/api/v1/students/{}/", self.base_url(), id)
    }
}
