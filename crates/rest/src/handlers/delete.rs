//! Delete interaction handler.
//!
//! `DELETE [base]/api/v1/courses/[id]/`

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_persistence::core::CourseStorage;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::ResourceId;
use crate::state::AppState;

/// Handler for deleting a course.
///
/// The row and its enrollments are removed; enrolled students remain.
///
/// # HTTP Request
///
/// `DELETE [base]/api/v1/courses/[id]/`
///
/// # Response
///
/// - `204 No Content` - Course deleted, empty body
/// - `404 Not Found` - No course has this id
///
/// # Example
///
/// ```http
/// DELETE /api/v1/courses/3/ HTTP/1.1
/// Host: campus.example.com
/// ```
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(id = id, "Processing course delete request");

    state.storage().delete_course(id).await?;

    debug!(id = id, "Course deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
