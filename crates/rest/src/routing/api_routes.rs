//! Campus API route configuration.
//!
//! Defines all routes for the course and student API.

use axum::{
    Router,
    http::{Method, Uri},
    routing::{MethodRouter, get},
};
use campus_persistence::core::{Backend, CourseStorage, StudentStorage};

use crate::error::RestError;
use crate::handlers;
use crate::state::AppState;

/// Version prefix for all resource routes.
pub const API_PREFIX: &str = "/api/v1";

/// Registers `path` both with and without a trailing slash.
fn route_both<S>(router: Router<S>, path: &str, method_router: MethodRouter<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let trimmed = path.trim_end_matches('/');
    router
        .route(trimmed, method_router.clone())
        .route(&format!("{}/", trimmed), method_router)
}

/// Answers unmatched paths with the JSON not-found body.
async fn fallback_handler(uri: Uri) -> RestError {
    RestError::NotFound {
        resource_type: "Route".to_string(),
        id: uri.path().to_string(),
    }
}

/// Answers a known path called with an unsupported method.
async fn method_not_allowed_handler(method: Method) -> RestError {
    RestError::MethodNotAllowed {
        method: method.to_string(),
    }
}

/// Creates all Campus API routes.
///
/// Every resource route answers with and without a trailing slash. Unknown
/// paths get a JSON 404 and unsupported methods a JSON 405.
///
/// # Routes
///
/// ## System-level
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Courses
/// - `GET /api/v1/courses/` - List (filters: `id`, `name`)
/// - `POST /api/v1/courses/` - Create
/// - `GET /api/v1/courses/{id}/` - Retrieve
/// - `PUT /api/v1/courses/{id}/` - Replace
/// - `PATCH /api/v1/courses/{id}/` - Partial update
/// - `DELETE /api/v1/courses/{id}/` - Delete
///
/// ## Students
/// - `GET /api/v1/students/` - List
/// - `POST /api/v1/students/` - Create
/// - `GET /api/v1/students/{id}/` - Retrieve
/// - `DELETE /api/v1/students/{id}/` - Delete
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: CourseStorage + StudentStorage + Backend + Send + Sync + 'static,
{
    let courses = format!("{}/courses", API_PREFIX);
    let course = format!("{}/courses/{{id}}", API_PREFIX);
    let students = format!("{}/students", API_PREFIX);
    let student = format!("{}/students/{{id}}", API_PREFIX);

    let router = Router::new()
        // System-level routes
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>));

    // Course routes
    let router = route_both(
        router,
        &courses,
        get(handlers::list_handler::<S>).post(handlers::create_handler::<S>),
    );
    let router = route_both(
        router,
        &course,
        get(handlers::read_handler::<S>)
            .put(handlers::update_handler::<S>)
            .patch(handlers::patch_handler::<S>)
            .delete(handlers::delete_handler::<S>),
    );

    // Student routes
    let router = route_both(
        router,
        &students,
        get(handlers::list_students_handler::<S>).post(handlers::create_student_handler::<S>),
    );
    let router = route_both(
        router,
        &student,
        get(handlers::read_student_handler::<S>).delete(handlers::delete_student_handler::<S>),
    );

    router
        .method_not_allowed_fallback(method_not_allowed_handler)
        .fallback(fallback_handler)
        .with_state(state)
}
