//! Partial update handler.
//!
//! `PATCH [base]/api/v1/courses/[id]/`

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

/// Handler for partially updating a course.
///
/// Only the fields present in the body change; the rest keep their stored
/// values.
///
/// # HTTP Request
///
/// `PATCH [base]/api/v1/courses/[id]/`
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
/// PATCH /api/v1/courses/3/ HTTP/1.1
/// Host: campus.example.com
/// Content-Type: application/json
///
/// {"students": [2, 5]}
/// ```
pub async fn patch_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
    body: RequestBody,
) -> RestResult<Response>
where
    S: CourseStorage + StudentStorage + Send + Sync,
{
    debug!(id = id, "Processing course patch request");

    let current = state
        .storage()
        .read_course(id)
        .await?
        .ok_or_else(|| RestError::NotFound {
            resource_type: "Course".to_string(),
            id: id.to_string(),
        })?;

    let payload = CoursePayload::from_body(body)?;
    debug!(name = ?payload.name, students = ?payload.students, "Merging course patch");

    let mut draft = payload.validate_partial(state.max_students_per_course());
    draft.check_enrollment(state.storage()).await?;
    let merged = draft.merge_into(current)?;
    let course = state.storage().update_course(id, merged).await?;

    debug!(id = course.id, "Course patched");

    Ok((StatusCode::OK, Json(course)).into_response())
}
