//! List interaction handler.
//!
//! `GET [base]/api/v1/courses/`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_persistence::core::CourseStorage;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::CourseQuery;
use crate::state::AppState;

/// Handler for listing courses.
///
/// Returns every course matching the filters as a JSON array, ordered by id.
/// The result is not paginated.
///
/// # HTTP Request
///
/// `GET [base]/api/v1/courses/?id=[id]&name=[name]`
///
/// # Query Parameters
///
/// - `id` - Exact course id
/// - `name` - Exact, case-sensitive course name
///
/// Other parameters are ignored. Filters combine with AND.
///
/// # Response
///
/// - `200 OK` - Array of courses (possibly empty)
/// - `400 Bad Request` - `id` is not a whole number
///
/// # Example
///
/// ```http
/// GET /api/v1/courses/?name=Algebra HTTP/1.1
/// Host: campus.example.com
/// ```
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    query: CourseQuery,
) -> RestResult<Response>
where
    S: CourseStorage + Send + Sync,
{
    let filter = query.into_filter();
    debug!(
        id = ?filter.id,
        name = ?filter.name,
        "Processing course list request"
    );

    let courses = state.storage().list_courses(&filter).await?;

    debug!(count = courses.len(), "Returning courses");

    Ok((StatusCode::OK, Json(courses)).into_response())
}
