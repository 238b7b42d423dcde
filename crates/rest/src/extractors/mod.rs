//! Axum extractors for the Campus API.
//!
//! - [`RequestBody`] - Decode a JSON or form payload
//! - [`CourseQuery`] - Extract course list filters from the query string
//! - [`ResourceId`] - Extract the numeric id path segment

mod course_query;
mod request_body;
mod resource_id;

pub use course_query::CourseQuery;
pub use request_body::{RequestBody, RequestBodyRejection};
pub use resource_id::ResourceId;
