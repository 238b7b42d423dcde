//! REST API test harness.
//!
//! Provides a test server running the full middleware stack over an
//! in-memory SQLite backend. The harness keeps its own handle on the
//! backend so tests can seed and inspect rows directly.

use std::sync::Arc;

use axum_test::TestServer;
use campus_persistence::backends::sqlite::SqliteBackend;
use campus_persistence::core::{CourseStorage, StudentStorage};

use campus_rest::{AppState, ServerConfig, build_app};

use super::fixtures::{CourseFactory, StudentFactory};

/// Test harness for REST API testing.
///
/// # Example
///
/// ```rust,ignore
/// let app = TestApp::new();
/// let course = app.courses().make().await;
///
/// let response = app.server.get(&format!("/api/v1/courses/{}/", course.id)).await;
/// response.assert_status_ok();
/// ```
pub struct TestApp {
    /// The test server instance.
    pub server: TestServer,

    /// The storage backend shared with the server.
    pub backend: Arc<SqliteBackend>,
}

impl TestApp {
    /// Creates a harness with the testing configuration.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::for_testing())
    }

    /// Creates a harness with a custom configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
        backend.init_schema().expect("Failed to init schema");
        let backend = Arc::new(backend);

        let state = AppState::new(Arc::clone(&backend), config);
        let server = TestServer::new(build_app(state)).expect("Failed to create test server");

        Self { server, backend }
    }

    /// Returns a course factory over the shared backend.
    pub fn courses(&self) -> CourseFactory<'_> {
        CourseFactory::new(&self.backend)
    }

    /// Returns a student factory over the shared backend.
    pub fn students(&self) -> StudentFactory<'_> {
        StudentFactory::new(&self.backend)
    }

    /// Returns the number of stored courses.
    pub async fn course_count(&self) -> u64 {
        self.backend
            .count_courses()
            .await
            .expect("Failed to count courses")
    }

    /// Returns the number of stored students.
    pub async fn student_count(&self) -> u64 {
        self.backend
            .count_students()
            .await
            .expect("Failed to count students")
    }
}

/// Path of a single course.
pub fn course_path(id: i64) -> String {
    format!("/api/v1/courses/{}/", id)
}

/// Path of a single student.
pub fn student_path(id: i64) -> String {
    format!("/api/v1/students/{}/", id)
}

/// Path of the course collection.
pub const COURSES: &str = "/api/v1/courses/";

/// Path of the student collection.
pub const STUDENTS: &str = "/api/v1/students/";
