//! Retrieve interaction handler.
//!
//! `GET [base]/api/v1/courses/[id]/`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_persistence::core::CourseStorage;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::ResourceId;
use crate::state::AppState;

/// Handler for retrieving one course.
///
/// # HTTP Request
///
/// `GET [base]/api/v1/courses/[id]/`
///
/// # Response
///
/// - `200 OK` - The course with its enrolled student ids
/// - `404 Not Found` - No course has this id
///
/// # Example
///
/// ```http
/// GET /api/v1/courses/3/ HTTP/1.1
/// Host: campus.example.com
/// ```
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    debug!(id = id, "Processing course read request");

    match state.storage().read_course(id).await? {
        Some(course) => Ok((StatusCode::OK, Json(course)).into_response()),
        None => {
            debug!(id = id, "Course not found");
            Err(RestError::NotFound {
                resource_type: "Course".to_string(),
                id: id.to_string(),
            })
        }
    }
}
