//! Course records.

use serde::{Deserialize, Serialize};

/// A persisted course.
///
/// This is also the JSON shape returned by the API:
///
/// ```
/// use campus_persistence::types::Course;
///
/// let course = Course::new(3, "Rust Basics", vec![1, 2]);
/// let json = serde_json::to_value(&course).unwrap();
/// assert_eq!(json["id"], 3);
/// assert_eq!(json["students"], serde_json::json!([1, 2]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Server-assigned identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Ids of enrolled students, ascending.
    #[serde(default)]
    pub students: Vec<i64>,
}

impl Course {
    /// Creates a course value.
    pub fn new(id: i64, name: impl Into<String>, students: Vec<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            students,
        }
    }

    /// Returns true if the given student is enrolled.
    pub fn has_student(&self, student_id: i64) -> bool {
        self.students.binary_search(&student_id).is_ok()
    }
}

/// Content written on create and on full replace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourse {
    /// Display name.
    pub name: String,

    /// Ids of students to enroll.
    #[serde(default)]
    pub students: Vec<i64>,
}

impl NewCourse {
    /// Creates a course with no students.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            students: Vec::new(),
        }
    }

    /// Sets the enrolled students.
    pub fn with_students(mut self, students: impl IntoIterator<Item = i64>) -> Self {
        self.students = students.into_iter().collect();
        self
    }

    /// Returns the student ids sorted ascending with duplicates removed.
    pub fn normalized_students(&self) -> Vec<i64> {
        let mut ids = self.students.clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
