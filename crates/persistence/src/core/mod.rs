//! Core storage traits and abstractions.
//!
//! - [`Backend`] - Database driver lifecycle (schema, health)
//! - [`CourseStorage`] - Course CRUD with student enrollment
//! - [`StudentStorage`] - Student CRUD
//!
//! Backends implement all three; the REST layer is generic over the storage
//! traits so tests can substitute their own implementation.

pub mod backend;
pub mod storage;

pub use backend::{Backend, BackendKind};
pub use storage::{CourseStorage, StudentStorage};
