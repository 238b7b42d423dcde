//! Course and student storage traits.
//!
//! [`CourseStorage`] and [`StudentStorage`] are the data operations the REST
//! layer depends on. Backends implement both; handlers are generic over them.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{Course, CourseFilter, NewCourse, NewStudent, Student};

/// Storage for courses and their enrolled students.
///
/// Every write that touches a course row and its student relation is atomic:
/// either the whole change is visible or none of it is.
///
/// # Example
///
/// ```ignore
/// use campus_persistence::core::CourseStorage;
/// use campus_persistence::types::{CourseFilter, NewCourse};
///
/// async fn example<S: CourseStorage>(storage: &S) -> StorageResult<()> {
///     let course = storage.create_course(NewCourse::new("Geometry")).await?;
///
///     let found = storage
///         .list_courses(&CourseFilter::new().with_name("Geometry"))
///         .await?;
///     assert_eq!(found, vec![course.clone()]);
///
///     storage.delete_course(course.id).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait CourseStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Creates a new course and enrolls the given students.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation(InvalidReference)` - If a student does not exist
    async fn create_course(&self, course: NewCourse) -> StorageResult<Course>;

    /// Reads a course by id.
    ///
    /// Returns `None` if no course has that id.
    async fn read_course(&self, id: i64) -> StorageResult<Option<Course>>;

    /// Lists the courses matching `filter`, ordered by ascending id.
    async fn list_courses(&self, filter: &CourseFilter) -> StorageResult<Vec<Course>>;

    /// Replaces the name and the student set of an existing course.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If the course doesn't exist
    /// * `StorageError::Validation(InvalidReference)` - If a student does not exist
    async fn update_course(&self, id: i64, course: NewCourse) -> StorageResult<Course>;

    /// Deletes a course and its enrollments.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If the course doesn't exist
    async fn delete_course(&self, id: i64) -> StorageResult<()>;

    /// Counts all courses.
    async fn count_courses(&self) -> StorageResult<u64>;

    /// Checks if a course exists.
    async fn course_exists(&self, id: i64) -> StorageResult<bool> {
        Ok(self.read_course(id).await?.is_some())
    }
}

/// Storage for students.
#[async_trait]
pub trait StudentStorage: Send + Sync {
    /// Creates a new student.
    async fn create_student(&self, student: NewStudent) -> StorageResult<Student>;

    /// Reads a student by id.
    async fn read_student(&self, id: i64) -> StorageResult<Option<Student>>;

    /// Lists all students, ordered by ascending id.
    async fn list_students(&self) -> StorageResult<Vec<Student>>;

    /// Deletes a student and removes it from every course.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If the student doesn't exist
    async fn delete_student(&self, id: i64) -> StorageResult<()>;

    /// Counts all students.
    async fn count_students(&self) -> StorageResult<u64>;

    /// Returns the ids from `ids` that do not name an existing student.
    ///
    /// The result is sorted and free of duplicates.
    async fn missing_students(&self, ids: &[i64]) -> StorageResult<Vec<i64>>;
}
