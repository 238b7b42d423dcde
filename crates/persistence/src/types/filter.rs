//! Course list filtering.

use serde::{Deserialize, Serialize};

/// Exact-match filters for listing courses.
///
/// Set fields are combined with AND; an empty filter matches every course.
///
/// ```
/// use campus_persistence::types::CourseFilter;
///
/// let filter = CourseFilter::new().with_name("Chemistry");
/// assert!(!filter.is_empty());
/// assert!(CourseFilter::new().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFilter {
    /// Match on the course id.
    pub id: Option<i64>,

    /// Match on the exact course name.
    pub name: Option<String>,
}

impl CourseFilter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the result to one id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Restricts the result to one exact name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }
}
