//! HTTP request handlers for the Campus API.
//!
//! Course interactions:
//!
//! - [`list`] - List courses, filtered by `id` and `name`
//! - [`read`] - Retrieve a course by id
//! - [`create`] - Create a course
//! - [`update`] - Replace a course
//! - [`patch`] - Partially update a course
//! - [`delete`] - Delete a course
//!
//! Supporting endpoints:
//!
//! - [`students`] - List, retrieve, create and delete students
//! - [`health`] - Health, liveness and readiness checks

pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod patch;
pub mod read;
pub mod students;
pub mod update;

// Re-export handlers for convenience
pub use create::create_handler;
pub use delete::delete_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use list::list_handler;
pub use patch::patch_handler;
pub use read::read_handler;
pub use students::{
    create_student_handler, delete_student_handler, list_students_handler, read_student_handler,
};
pub use update::update_handler;
