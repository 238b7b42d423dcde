//! Student handlers.
//!
//! Students exist so courses have something to enroll. They support list,
//! retrieve, create and delete at `[base]/api/v1/students/`.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use campus_persistence::core::StudentStorage;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::{RequestBody, ResourceId};
use crate::payload::StudentPayload;
use crate::state::AppState;

/// Handler for listing students, ordered by id.
///
/// # HTTP Request
///
/// `GET [base]/api/v1/students/`
pub async fn list_students_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: StudentStorage + Send + Sync,
{
    debug!("Processing student list request");

    let students = state.storage().list_students().await?;
    Ok((StatusCode::OK, Json(students)).into_response())
}

/// Handler for retrieving one student.
///
/// # HTTP Request
///
/// `GET [base]/api/v1/students/[id]/`
///
/// # Response
///
/// - `200 OK` - The student
/// - `404 Not Found` - No student has this id
pub async fn read_student_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
) -> RestResult<Response>
where
    S: StudentStorage + Send + Sync,
{
    debug!(id = id, "Processing student read request");

    state
        .storage()
        .read_student(id)
        .await?
        .map(|student| (StatusCode::OK, Json(student)).into_response())
        .ok_or_else(|| RestError::NotFound {
            resource_type: "Student".to_string(),
            id: id.to_string(),
        })
}

/// Handler for creating a student.
///
/// # HTTP Request
///
/// `POST [base]/api/v1/students/`
///
/// # Response
///
/// - `201 Created` - Student created; `Location` points at the new student
/// - `400 Bad Request` - Missing or blank name, or a malformed birth date
/// - `415 Unsupported Media Type` - Body is neither JSON nor a form
///
/// # Example
///
/// ```http
/// POST /api/v1/students/ HTTP/1.1
/// Host: campus.example.com
/// Content-Type: application/json
///
/// {"name": "Ada Lovelace", "birth_date": "2003-12-10"}
/// ```
pub async fn create_student_handler<S>(
    State(state): State<AppState<S>>,
    body: RequestBody,
) -> RestResult<Response>
where
    S: StudentStorage + Send + Sync,
{
    let payload = StudentPayload::from_body(body)?;
    debug!(name = ?payload.name, "Processing student create request");

    let student = state
        .storage()
        .create_student(payload.into_new_student()?)
        .await?;

    debug!(id = student.id, "Student created");

    let location = state.student_url(student.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(student),
    )
        .into_response())
}

/// Handler for deleting a student.
///
/// The student is also removed from every course.
///
/// # HTTP Request
///
/// `DELETE [base]/api/v1/students/[id]/`
///
/// # Response
///
/// - `204 No Content` - Student deleted
/// - `404 Not Found` - No student has this id
pub async fn delete_student_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
) -> RestResult<Response>
where
    S: StudentStorage + Send + Sync,
{
    debug!(id = id, "Processing student delete request");

    state.storage().delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
