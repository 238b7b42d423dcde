//! Common test utilities for REST API testing.
//!
//! - [`harness`] - Test server wired to an in-memory SQLite backend
//! - [`fixtures`] - Factories that seed courses and students

// Not every test binary uses every helper
#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
