//! Create interaction handler.
//!
//! `POST [base]/api/v1/courses/`

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use campus_persistence::core::{CourseStorage, StudentStorage};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::RequestBody;
use crate::payload::CoursePayload;
use crate::state::AppState;

/// Handler for creating a course.
///
/// The server assigns the id. `students` may be omitted. JSON, URL-encoded
/// and multipart form bodies are accepted; a form repeats the `students` key
/// once per id.
///
/// # HTTP Request
///
/// `POST [base]/api/v1/courses/`
///
/// # Response
///
/// - `201 Created` - Course created; `Location` points at the new course
/// - `400 Bad Request` - Missing or blank name, too many students, or an
///   unknown student id
/// - `415 Unsupported Media Type` - Body is neither JSON nor a form
///
/// # Example
///
/// ```http
/// POST /api/v1/courses/ HTTP/1.1
/// Host: campus.example.com
/// Content-Type: application/json
///
/// {"name": "Algebra", "students": [1, 4]}
/// ```
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    body: RequestBody,
) -> RestResult<Response>
where
    S: CourseStorage + StudentStorage + Send + Sync,
{
    let payload = CoursePayload::from_body(body)?;
    debug!(name = ?payload.name, "Processing course create request");

    let mut draft = payload.validate(state.max_students_per_course());
    draft.check_enrollment(state.storage()).await?;
    let new_course = draft.into_new_course()?;
    let course = state.storage().create_course(new_course).await?;

    debug!(id = course.id, students = course.students.len(), "Course created");

    let location = state.course_url(course.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(course),
    )
        .into_response())
}
