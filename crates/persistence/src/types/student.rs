//! Student records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A persisted student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Server-assigned identifier.
    pub id: i64,

    /// Full name.
    pub name: String,

    /// Date of birth, if known.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// Content written when a student is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    /// Full name.
    pub name: String,

    /// Date of birth, if known.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl NewStudent {
    /// Creates a student without a birth date.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            birth_date: None,
        }
    }

    /// Sets the birth date.
    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }
}
