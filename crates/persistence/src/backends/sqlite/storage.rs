//! CourseStorage and StudentStorage implementations for SQLite.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use tracing::debug;

use crate::core::{CourseStorage, StudentStorage};
use crate::error::{BackendError, StorageError, StorageResult, ValidationError};
use crate::types::{Course, CourseFilter, NewCourse, NewStudent, Student};

use super::SqliteBackend;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

fn serialization_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::SerializationError { message })
}

/// Builds `?, ?, ?` for an `IN` list of the given length.
fn placeholders(len: usize) -> String {
    vec!["?"; len].join(", ")
}

/// Translates a filter into a WHERE clause over `courses` and its parameters.
fn course_where_clause(filter: &CourseFilter) -> (String, Vec<SqlValue>) {
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    if let Some(id) = filter.id {
        conditions.push("id = ?");
        values.push(SqlValue::Integer(id));
    }
    if let Some(name) = &filter.name {
        conditions.push("name = ?");
        values.push(SqlValue::Text(name.clone()));
    }

    if conditions.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), values)
    }
}

/// Returns the ids from `ids` (sorted, deduplicated) with no student row.
fn find_missing_students(conn: &Connection, ids: &[i64]) -> StorageResult<Vec<i64>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut wanted = ids.to_vec();
    wanted.sort_unstable();
    wanted.dedup();

    let sql = format!(
        "SELECT id FROM students WHERE id IN ({})",
        placeholders(wanted.len())
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| internal_error(format!("Failed to prepare student lookup: {}", e)))?;
    let found = stmt
        .query_map(params_from_iter(wanted.iter()), |row| row.get::<_, i64>(0))
        .map_err(|e| internal_error(format!("Failed to look up students: {}", e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| internal_error(format!("Failed to read student ids: {}", e)))?;

    Ok(wanted.into_iter().filter(|id| !found.contains(id)).collect())
}

/// Fails with `InvalidReference` if any student in `ids` does not exist.
fn ensure_students_exist(conn: &Connection, ids: &[i64]) -> StorageResult<()> {
    let missing = find_missing_students(conn, ids)?;
    if missing.is_empty() {
        Ok(())
    } else {
        Err(StorageError::Validation(ValidationError::InvalidReference {
            field: "students".to_string(),
            missing,
        }))
    }
}

fn insert_enrollments(conn: &Connection, course_id: i64, students: &[i64]) -> StorageResult<()> {
    let mut stmt = conn
        .prepare("INSERT INTO course_students (course_id, student_id) VALUES (?1, ?2)")
        .map_err(|e| internal_error(format!("Failed to prepare enrollment insert: {}", e)))?;
    for student_id in students {
        stmt.execute(params![course_id, student_id])
            .map_err(|e| internal_error(format!("Failed to insert enrollment: {}", e)))?;
    }
    Ok(())
}

fn load_enrollments(conn: &Connection, course_id: i64) -> StorageResult<Vec<i64>> {
    let mut stmt = conn
        .prepare(
            "SELECT student_id FROM course_students
             WHERE course_id = ?1 ORDER BY student_id",
        )
        .map_err(|e| internal_error(format!("Failed to prepare enrollment query: {}", e)))?;
    let students = stmt
        .query_map(params![course_id], |row| row.get::<_, i64>(0))
        .map_err(|e| internal_error(format!("Failed to query enrollments: {}", e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| internal_error(format!("Failed to read enrollments: {}", e)))?;
    Ok(students)
}

fn course_row_exists(conn: &Connection, id: i64) -> StorageResult<bool> {
    conn.query_row("SELECT 1 FROM courses WHERE id = ?1", params![id], |_| Ok(()))
        .optional()
        .map(|row| row.is_some())
        .map_err(|e| internal_error(format!("Failed to check course: {}", e)))
}

fn parse_birth_date(raw: Option<String>) -> StorageResult<Option<NaiveDate>> {
    raw.map(|s| {
        NaiveDate::parse_from_str(&s, DATE_FORMAT)
            .map_err(|e| serialization_error(format!("Invalid birth_date '{}': {}", s, e)))
    })
    .transpose()
}

#[async_trait]
impl CourseStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create_course(&self, course: NewCourse) -> StorageResult<Course> {
        let mut conn = self.get_connection()?;
        let students = course.normalized_students();

        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        ensure_students_exist(&tx, &students)?;

        tx.execute("INSERT INTO courses (name) VALUES (?1)", params![course.name])
            .map_err(|e| internal_error(format!("Failed to insert course: {}", e)))?;
        let id = tx.last_insert_rowid();

        insert_enrollments(&tx, id, &students)?;

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit course: {}", e)))?;

        debug!(id, students = students.len(), "Inserted course");

        Ok(Course::new(id, course.name, students))
    }

    async fn read_course(&self, id: i64) -> StorageResult<Option<Course>> {
        let conn = self.get_connection()?;

        let name: Option<String> = conn
            .query_row(
                "SELECT name FROM courses WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read course: {}", e)))?;

        match name {
            Some(name) => {
                let students = load_enrollments(&conn, id)?;
                Ok(Some(Course::new(id, name, students)))
            }
            None => Ok(None),
        }
    }

    async fn list_courses(&self, filter: &CourseFilter) -> StorageResult<Vec<Course>> {
        let conn = self.get_connection()?;
        let (where_clause, values) = course_where_clause(filter);

        let sql = format!("SELECT id, name FROM courses{} ORDER BY id", where_clause);
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| internal_error(format!("Failed to prepare course query: {}", e)))?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| internal_error(format!("Failed to query courses: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| internal_error(format!("Failed to read courses: {}", e)))?;

        // Enrollments for every matched course in one pass
        let sql = format!(
            "SELECT course_id, student_id FROM course_students
             WHERE course_id IN (SELECT id FROM courses{})
             ORDER BY course_id, student_id",
            where_clause
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| internal_error(format!("Failed to prepare enrollment query: {}", e)))?;
        let pairs = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
            })
            .map_err(|e| internal_error(format!("Failed to query enrollments: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| internal_error(format!("Failed to read enrollments: {}", e)))?;

        let mut enrollments: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
        for (course_id, student_id) in pairs {
            enrollments.entry(course_id).or_default().push(student_id);
        }

        Ok(rows
            .into_iter()
            .map(|(id, name)| {
                let students = enrollments.remove(&id).unwrap_or_default();
                Course::new(id, name, students)
            })
            .collect())
    }

    async fn update_course(&self, id: i64, course: NewCourse) -> StorageResult<Course> {
        let mut conn = self.get_connection()?;
        let students = course.normalized_students();

        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        if !course_row_exists(&tx, id)? {
            return Err(StorageError::not_found("Course", id));
        }

        ensure_students_exist(&tx, &students)?;

        tx.execute(
            "UPDATE courses SET name = ?1 WHERE id = ?2",
            params![course.name, id],
        )
        .map_err(|e| internal_error(format!("Failed to update course: {}", e)))?;

        tx.execute(
            "DELETE FROM course_students WHERE course_id = ?1",
            params![id],
        )
        .map_err(|e| internal_error(format!("Failed to clear enrollments: {}", e)))?;

        insert_enrollments(&tx, id, &students)?;

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit course: {}", e)))?;

        debug!(id, students = students.len(), "Replaced course");

        Ok(Course::new(id, course.name, students))
    }

    async fn delete_course(&self, id: i64) -> StorageResult<()> {
        let mut conn = self.get_connection()?;

        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        tx.execute(
            "DELETE FROM course_students WHERE course_id = ?1",
            params![id],
        )
        .map_err(|e| internal_error(format!("Failed to delete enrollments: {}", e)))?;

        let deleted = tx
            .execute("DELETE FROM courses WHERE id = ?1", params![id])
            .map_err(|e| internal_error(format!("Failed to delete course: {}", e)))?;

        if deleted == 0 {
            return Err(StorageError::not_found("Course", id));
        }

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit delete: {}", e)))?;

        debug!(id, "Deleted course");

        Ok(())
    }

    async fn count_courses(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM courses", [], |row| row.get(0))
            .map_err(|e| internal_error(format!("Failed to count courses: {}", e)))?;
        Ok(count as u64)
    }
}

#[async_trait]
impl StudentStorage for SqliteBackend {
    async fn create_student(&self, student: NewStudent) -> StorageResult<Student> {
        let conn = self.get_connection()?;
        let birth_date = student
            .birth_date
            .map(|d| d.format(DATE_FORMAT).to_string());

        conn.execute(
            "INSERT INTO students (name, birth_date) VALUES (?1, ?2)",
            params![student.name, birth_date],
        )
        .map_err(|e| internal_error(format!("Failed to insert student: {}", e)))?;
        let id = conn.last_insert_rowid();

        debug!(id, "Inserted student");

        Ok(Student {
            id,
            name: student.name,
            birth_date: student.birth_date,
        })
    }

    async fn read_student(&self, id: i64) -> StorageResult<Option<Student>> {
        let conn = self.get_connection()?;

        let row: Option<(String, Option<String>)> = conn
            .query_row(
                "SELECT name, birth_date FROM students WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read student: {}", e)))?;

        row.map(|(name, birth_date)| {
            Ok(Student {
                id,
                name,
                birth_date: parse_birth_date(birth_date)?,
            })
        })
        .transpose()
    }

    async fn list_students(&self) -> StorageResult<Vec<Student>> {
        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare("SELECT id, name, birth_date FROM students ORDER BY id")
            .map_err(|e| internal_error(format!("Failed to prepare student query: {}", e)))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })
            .map_err(|e| internal_error(format!("Failed to query students: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| internal_error(format!("Failed to read students: {}", e)))?;

        rows.into_iter()
            .map(|(id, name, birth_date)| {
                Ok(Student {
                    id,
                    name,
                    birth_date: parse_birth_date(birth_date)?,
                })
            })
            .collect()
    }

    async fn delete_student(&self, id: i64) -> StorageResult<()> {
        let mut conn = self.get_connection()?;

        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        tx.execute(
            "DELETE FROM course_students WHERE student_id = ?1",
            params![id],
        )
        .map_err(|e| internal_error(format!("Failed to delete enrollments: {}", e)))?;

        let deleted = tx
            .execute("DELETE FROM students WHERE id = ?1", params![id])
            .map_err(|e| internal_error(format!("Failed to delete student: {}", e)))?;

        if deleted == 0 {
            return Err(StorageError::not_found("Student", id));
        }

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit delete: {}", e)))?;

        debug!(id, "Deleted student");

        Ok(())
    }

    async fn count_students(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))
            .map_err(|e| internal_error(format!("Failed to count students: {}", e)))?;
        Ok(count as u64)
    }

    async fn missing_students(&self, ids: &[i64]) -> StorageResult<Vec<i64>> {
        let conn = self.get_connection()?;
        find_missing_students(&conn, ids)
    }
}
