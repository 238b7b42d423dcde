//! Replace interaction handler.
//!
//! `PUT [base]/api/v1/courses/[id]/`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_persistence::core::{CourseStorage, StudentStorage};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::{RequestBody, ResourceId};
use crate::payload::CoursePayload;
use crate::state::AppState;

/// Handler for replacing a course.
///
/// `name` is required. Omitting `students` clears the enrollments. An `id`
/// in the body is ignored.
///
/// # HTTP Request
///
/// `PUT [base]/api/v1/courses/[id]/`
///
/// # Response
///
/// - `200 OK` - The updated course
/// - `400 Bad Request` - Validation failed
/// - `404 Not Found` - No course has this id
///
/// # Example
///
/// ```http
/// PUT /api/v1/courses/3/ HTTP/1.1
/// Host: campus.example.com
/// Content-Type: application/json
///
/// {"name": "New Course update"}
/// ```
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
    body: RequestBody,
) -> RestResult<Response>
where
    S: CourseStorage + StudentStorage + Send + Sync,
{
    debug!(id = id, "Processing course update request");

    // A missing course wins over a bad payload
    if !state.storage().course_exists(id).await? {
        return Err(RestError::NotFound {
            resource_type: "Course".to_string(),
            id: id.to_string(),
        });
    }

    let payload = CoursePayload::from_body(body)?;
    let mut draft = payload.validate(state.max_students_per_course());
    draft.check_enrollment(state.storage()).await?;
    let new_course = draft.into_new_course()?;
    let course = state.storage().update_course(id, new_course).await?;

    debug!(id = course.id, "Course updated");

    Ok((StatusCode::OK, Json(course)).into_response())
}
