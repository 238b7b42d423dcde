//! Campus persistence layer.
//!
//! This crate stores courses, students, and the enrollments that link them.
//! Storage is reached through the [`CourseStorage`] and [`StudentStorage`]
//! traits so the HTTP layer stays independent of the database.
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Architecture
//!
//! - [`types`] - Course, student, and filter types
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits and abstractions
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use campus_persistence::backends::sqlite::SqliteBackend;
//! use campus_persistence::types::{CourseFilter, NewCourse, NewStudent};
//! use campus_persistence::{CourseStorage, StudentStorage};
//!
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let ada = backend.create_student(NewStudent::new("Ada Lovelace")).await?;
//! let course = backend
//!     .create_course(NewCourse::new("Analytical Engines").with_students([ada.id]))
//!     .await?;
//!
//! let found = backend
//!     .list_courses(&CourseFilter::new().with_name("Analytical Engines"))
//!     .await?;
//! assert_eq!(found, vec![course]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{Course, CourseFilter, NewCourse, NewStudent, Student};

// Re-export core traits
pub use core::{Backend, BackendKind, CourseStorage, StudentStorage};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
