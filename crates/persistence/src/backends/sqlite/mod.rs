//! SQLite backend implementation.
//!
//! Supports both in-memory databases (used by the test suites) and
//! file-based databases (development and small deployments).
//!
//! # Example
//!
//! ```no_run
//! use campus_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE students (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name TEXT NOT NULL,
//!     birth_date TEXT              -- YYYY-MM-DD
//! );
//!
//! CREATE TABLE courses (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name TEXT NOT NULL
//! );
//!
//! CREATE TABLE course_students (
//!     course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
//!     student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
//!     PRIMARY KEY (course_id, student_id)
//! );
//! ```

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
