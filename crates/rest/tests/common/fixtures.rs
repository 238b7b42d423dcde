//! Test data factories.
//!
//! Factories write straight to the backend so tests can arrange state
//! without going through the API under test. Names are random unless a
//! test asks for a specific one.

use campus_persistence::backends::sqlite::SqliteBackend;
use campus_persistence::core::{CourseStorage, StudentStorage};
use campus_persistence::types::{Course, NewCourse, NewStudent, Student};

/// Returns a unique name with a readable prefix.
pub fn random_name(prefix: &str) -> String {
    format!("{} {}", prefix, uuid::Uuid::new_v4().simple())
}

/// Seeds courses.
pub struct CourseFactory<'a> {
    backend: &'a SqliteBackend,
}

impl<'a> CourseFactory<'a> {
    /// Creates a factory over the given backend.
    pub fn new(backend: &'a SqliteBackend) -> Self {
        Self { backend }
    }

    /// Creates one course with a random name and no students.
    pub async fn make(&self) -> Course {
        self.make_named(&random_name("Course")).await
    }

    /// Creates a course with the given name.
    pub async fn make_named(&self, name: &str) -> Course {
        self.backend
            .create_course(NewCourse::new(name))
            .await
            .expect("Failed to seed course")
    }

    /// Creates a course enrolling the given students.
    pub async fn make_with_students(&self, students: &[i64]) -> Course {
        self.backend
            .create_course(NewCourse::new(random_name("Course")).with_students(students.to_vec()))
            .await
            .expect("Failed to seed course")
    }

    /// Creates `count` courses, in id order.
    pub async fn make_many(&self, count: usize) -> Vec<Course> {
        let mut courses = Vec::with_capacity(count);
        for _ in 0..count {
            courses.push(self.make().await);
        }
        courses
    }
}

/// Seeds students.
pub struct StudentFactory<'a> {
    backend: &'a SqliteBackend,
}

impl<'a> StudentFactory<'a> {
    /// Creates a factory over the given backend.
    pub fn new(backend: &'a SqliteBackend) -> Self {
        Self { backend }
    }

    /// Creates one student with a random name.
    pub async fn make(&self) -> Student {
        self.backend
            .create_student(NewStudent::new(random_name("Student")))
            .await
            .expect("Failed to seed student")
    }

    /// Creates `count` students and returns their ids.
    pub async fn make_many(&self, count: usize) -> Vec<i64> {
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(self.make().await.id);
        }
        ids
    }
}
