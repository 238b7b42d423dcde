//! Core types for the persistence layer.
//!
//! - [`Course`], [`NewCourse`] - Course rows and the content written to them
//! - [`Student`], [`NewStudent`] - Student rows
//! - [`CourseFilter`] - Exact-match filters for listing courses

mod course;
mod filter;
mod student;

pub use course::{Course, NewCourse};
pub use filter::CourseFilter;
pub use student::{NewStudent, Student};
