//! Request payloads and field validation.
//!
//! A payload keeps each field as the client sent it (absent, `null`, a JSON
//! value, or the form values under that key) and validates every field in
//! one pass, so a response names all the failing fields at once:
//! `{"name": ["This field is required."], "students": [...]}`. Unknown
//! fields, including a client-sent `id`, are ignored.

use std::collections::HashMap;

use campus_persistence::core::StudentStorage;
use campus_persistence::types::{Course, NewCourse, NewStudent};
use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{FieldErrors, RestError, RestResult, does_not_exist};
use crate::extractors::RequestBody;

/// Maximum length of a course or student name.
pub const MAX_NAME_LENGTH: usize = 255;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";
const DATE_FORMAT: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

/// One payload field as the client sent it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawField {
    /// Not present in the body.
    #[default]
    Absent,
    /// Present as JSON `null`.
    Null,
    /// A JSON value other than `null`.
    Json(Value),
    /// Every form value sent under this key, in order.
    Form(Vec<String>),
}

/// Splits a request body into its named fields.
fn into_fields(body: RequestBody) -> RestResult<HashMap<String, RawField>> {
    match body {
        RequestBody::Json(Value::Object(map)) => Ok(map
            .into_iter()
            .map(|(key, value)| {
                let field = match value {
                    Value::Null => RawField::Null,
                    other => RawField::Json(other),
                };
                (key, field)
            })
            .collect()),
        RequestBody::Json(other) => Err(RestError::invalid_field(
            "non_field_errors",
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(&other)
            ),
        )),
        RequestBody::Form(pairs) => {
            let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
            for (key, value) in pairs {
                grouped.entry(key).or_default().push(value);
            }
            Ok(grouped
                .into_iter()
                .map(|(key, values)| (key, RawField::Form(values)))
                .collect())
        }
    }
}

fn take(fields: &mut HashMap<String, RawField>, name: &str) -> RawField {
    fields.remove(name).unwrap_or_default()
}

/// Body of a course create, replace or partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePayload {
    /// Course name.
    pub name: RawField,

    /// Enrolled student ids.
    pub students: RawField,
}

impl CoursePayload {
    /// Picks the course fields out of a request body.
    pub fn from_body(body: RequestBody) -> RestResult<Self> {
        let mut fields = into_fields(body)?;
        Ok(Self {
            name: take(&mut fields, "name"),
            students: take(&mut fields, "students"),
        })
    }

    /// Validates a full representation (create and replace).
    ///
    /// `name` is required; omitted `students` means no enrollments.
    pub fn validate(self, max_students: usize) -> CourseDraft {
        self.check(max_students, false)
    }

    /// Validates a partial update. Absent fields keep their stored values.
    pub fn validate_partial(self, max_students: usize) -> CourseDraft {
        self.check(max_students, true)
    }

    fn check(self, max_students: usize, partial: bool) -> CourseDraft {
        let mut errors = FieldErrors::new();

        let name = match (&self.name, partial) {
            (RawField::Absent, true) => None,
            (field, _) => record(&mut errors, "name", validate_name(field)),
        };

        let students = match (&self.students, partial) {
            (RawField::Absent, true) => None,
            (field, _) => record(
                &mut errors,
                "students",
                validate_students(field, max_students),
            ),
        };

        CourseDraft {
            name,
            students,
            errors,
        }
    }
}

/// A course payload after shape checks, with the errors found so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDraft {
    name: Option<String>,
    students: Option<Vec<i64>>,
    errors: FieldErrors,
}

impl CourseDraft {
    /// Rejects any student id that names no student.
    pub async fn check_enrollment<S>(&mut self, storage: &S) -> RestResult<()>
    where
        S: StudentStorage + ?Sized,
    {
        let Some(students) = self.students.as_deref() else {
            return Ok(());
        };

        let missing = storage.missing_students(students).await?;
        if let Some(pk) = missing.first() {
            self.errors.add("students", does_not_exist(*pk));
        }

        Ok(())
    }

    /// Returns the content of a create or replace.
    pub fn into_new_course(self) -> RestResult<NewCourse> {
        self.errors.into_result()?;
        let name = self
            .name
            .ok_or_else(|| RestError::invalid_field("name", REQUIRED))?;
        Ok(NewCourse::new(name).with_students(self.students.unwrap_or_default()))
    }

    /// Merges a partial update onto the stored course.
    pub fn merge_into(self, current: Course) -> RestResult<NewCourse> {
        self.errors.into_result()?;
        Ok(NewCourse::new(self.name.unwrap_or(current.name))
            .with_students(self.students.unwrap_or(current.students)))
    }
}

/// Body of a student create.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPayload {
    /// Student name.
    pub name: RawField,

    /// Birth date as `YYYY-MM-DD`.
    pub birth_date: RawField,
}

impl StudentPayload {
    /// Picks the student fields out of a request body.
    pub fn from_body(body: RequestBody) -> RestResult<Self> {
        let mut fields = into_fields(body)?;
        Ok(Self {
            name: take(&mut fields, "name"),
            birth_date: take(&mut fields, "birth_date"),
        })
    }

    /// Validates the payload into a new student.
    pub fn into_new_student(self) -> RestResult<NewStudent> {
        let mut errors = FieldErrors::new();

        let name = record(&mut errors, "name", validate_name(&self.name));
        let birth_date = record(&mut errors, "birth_date", validate_birth_date(&self.birth_date));

        errors.into_result()?;
        let name = name.ok_or_else(|| RestError::invalid_field("name", REQUIRED))?;

        let student = NewStudent::new(name);
        Ok(match birth_date.flatten() {
            Some(date) => student.with_birth_date(date),
            None => student,
        })
    }
}

fn record<T>(errors: &mut FieldErrors, field: &str, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

/// Type names reported in type-mismatch messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Checks a name is present, a non-blank string and within length, and
/// trims it.
pub fn validate_name(field: &RawField) -> Result<String, String> {
    let raw = match field {
        RawField::Absent => return Err(REQUIRED.to_string()),
        RawField::Null => return Err(NOT_NULL.to_string()),
        RawField::Json(Value::String(s)) => s.clone(),
        RawField::Json(Value::Number(n)) => n.to_string(),
        RawField::Json(_) => return Err(NOT_A_STRING.to_string()),
        RawField::Form(values) => values.last().cloned().unwrap_or_default(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BLANK.to_string());
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            MAX_NAME_LENGTH
        ));
    }

    Ok(trimmed.to_string())
}

fn parse_pk(value: &Value) -> Result<i64, String> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Null => return Err(NOT_NULL.to_string()),
        _ => None,
    };
    parsed.ok_or_else(|| {
        format!(
            "Incorrect type. Expected pk value, received {}.",
            json_type_name(value)
        )
    })
}

/// Parses student ids, collapses duplicates and enforces the enrollment cap.
///
/// JSON ids may be numbers or numeric strings. A form may repeat the
/// `students` key; a single empty form value means no students.
pub fn validate_students(field: &RawField, max_students: usize) -> Result<Vec<i64>, String> {
    let mut students = match field {
        RawField::Absent => Vec::new(),
        RawField::Null => return Err(NOT_NULL.to_string()),
        RawField::Json(Value::Array(items)) => {
            items.iter().map(parse_pk).collect::<Result<Vec<_>, _>>()?
        }
        RawField::Json(other) => {
            return Err(format!(
                "Expected a list of items but got type \"{}\".",
                json_type_name(other)
            ));
        }
        RawField::Form(values) => values
            .iter()
            .filter(|v| !v.trim().is_empty())
            .map(|v| parse_pk(&Value::String(v.clone())))
            .collect::<Result<Vec<_>, _>>()?,
    };

    students.sort_unstable();
    students.dedup();

    if students.len() > max_students {
        return Err(format!(
            "Ensure this course has no more than {} students.",
            max_students
        ));
    }

    Ok(students)
}

/// Parses an optional `YYYY-MM-DD` birth date.
fn validate_birth_date(field: &RawField) -> Result<Option<NaiveDate>, String> {
    let raw = match field {
        RawField::Absent | RawField::Null => return Ok(None),
        RawField::Json(Value::String(s)) => s.as_str(),
        RawField::Json(_) => return Err(DATE_FORMAT.to_string()),
        RawField::Form(values) => match values.last().map(|v| v.trim()) {
            None | Some("") => return Ok(None),
            Some(value) => value,
        },
    };

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DATE_FORMAT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn course(body: Value) -> CoursePayload {
        CoursePayload::from_body(RequestBody::Json(body)).unwrap()
    }

    fn form(pairs: &[(&str, &str)]) -> RequestBody {
        RequestBody::Form(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_name_required() {
        let err = course(json!({})).validate(20).into_new_course().unwrap_err();
        assert_eq!(err.body(), json!({"name": ["This field is required."]}));
    }

    #[test]
    fn test_name_trimmed_and_not_blank() {
        let name = RawField::Json(json!("  Physics "));
        assert_eq!(validate_name(&name).unwrap(), "Physics");
        assert_eq!(
            validate_name(&RawField::Json(json!("   "))).unwrap_err(),
            BLANK
        );
    }

    #[test]
    fn test_name_null_and_wrong_type() {
        assert_eq!(validate_name(&RawField::Null).unwrap_err(), NOT_NULL);
        assert_eq!(
            validate_name(&RawField::Json(json!(["Physics"]))).unwrap_err(),
            NOT_A_STRING
        );
    }

    #[test]
    fn test_name_length_limit() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name(&RawField::Json(json!(long.clone()))).is_err());
        assert!(validate_name(&RawField::Json(json!(&long[1..]))).is_ok());
    }

    #[test]
    fn test_students_deduplicated_before_cap() {
        let students = validate_students(&RawField::Json(json!([3, 1, 3, 2, 1])), 3).unwrap();
        assert_eq!(students, vec![1, 2, 3]);
    }

    #[test]
    fn test_students_accept_numeric_strings() {
        let students = validate_students(&RawField::Json(json!(["4", 2])), 20).unwrap();
        assert_eq!(students, vec![2, 4]);
    }

    #[test]
    fn test_students_wrong_types() {
        assert_eq!(
            validate_students(&RawField::Json(json!(["abc"])), 20).unwrap_err(),
            "Incorrect type. Expected pk value, received str."
        );
        assert_eq!(
            validate_students(&RawField::Json(json!("all")), 20).unwrap_err(),
            "Expected a list of items but got type \"str\"."
        );
        assert_eq!(
            validate_students(&RawField::Null, 20).unwrap_err(),
            NOT_NULL
        );
    }

    #[test]
    fn test_students_over_cap() {
        let ids: Vec<i64> = (1..=21).collect();
        let err = course(json!({"name": "Crowded", "students": ids}))
            .validate(20)
            .into_new_course()
            .unwrap_err();
        assert_eq!(
            err.body(),
            json!({"students": ["Ensure this course has no more than 20 students."]})
        );
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let err = course(json!({"name": null, "students": [true]}))
            .validate(20)
            .into_new_course()
            .unwrap_err();
        assert_eq!(
            err.body(),
            json!({
                "name": ["This field may not be null."],
                "students": ["Incorrect type. Expected pk value, received bool."]
            })
        );
    }

    #[test]
    fn test_course_payload_defaults_students() {
        let new_course = course(json!({"name": "Physics"}))
            .validate(20)
            .into_new_course()
            .unwrap();
        assert_eq!(new_course.name, "Physics");
        assert!(new_course.students.is_empty());
    }

    #[test]
    fn test_course_payload_ignores_id() {
        let new_course = course(json!({"id": 99, "name": "Physics", "students": [2]}))
            .validate(20)
            .into_new_course()
            .unwrap();
        assert_eq!(new_course.students, vec![2]);
    }

    #[test]
    fn test_course_payload_from_form() {
        let payload = CoursePayload::from_body(form(&[
            ("name", "New Course"),
            ("students", "3"),
            ("students", "1"),
        ]))
        .unwrap();
        let new_course = payload.validate(20).into_new_course().unwrap();
        assert_eq!(new_course.name, "New Course");
        assert_eq!(new_course.students, vec![1, 3]);
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        let err = CoursePayload::from_body(RequestBody::Json(json!([1, 2]))).unwrap_err();
        assert_eq!(
            err.body(),
            json!({"non_field_errors": ["Invalid data. Expected a dictionary, but got list."]})
        );
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let current = Course::new(4, "Physics", vec![1, 2]);

        let renamed = course(json!({"name": "Physics II"}))
            .validate_partial(20)
            .merge_into(current.clone())
            .unwrap();
        assert_eq!(renamed.name, "Physics II");
        assert_eq!(renamed.students, vec![1, 2]);

        let reenrolled = course(json!({"students": [5]}))
            .validate_partial(20)
            .merge_into(current)
            .unwrap();
        assert_eq!(reenrolled.name, "Physics");
        assert_eq!(reenrolled.students, vec![5]);
    }

    #[test]
    fn test_student_payload() {
        let payload = StudentPayload::from_body(RequestBody::Json(
            json!({"name": "Ada", "birth_date": "2001-03-09"}),
        ))
        .unwrap();
        let student = payload.into_new_student().unwrap();
        assert_eq!(student.name, "Ada");
        assert_eq!(student.birth_date, NaiveDate::from_ymd_opt(2001, 3, 9));
    }

    #[test]
    fn test_student_bad_birth_date_is_a_field_error() {
        let payload = StudentPayload::from_body(RequestBody::Json(
            json!({"birth_date": "09/03/2001"}),
        ))
        .unwrap();
        let err = payload.into_new_student().unwrap_err();
        assert_eq!(
            err.body(),
            json!({
                "birth_date": [DATE_FORMAT],
                "name": ["This field is required."]
            })
        );
    }

    #[test]
    fn test_student_form_with_blank_birth_date() {
        let payload =
            StudentPayload::from_body(form(&[("name", "Ada"), ("birth_date", "")])).unwrap();
        let student = payload.into_new_student().unwrap();
        assert_eq!(student.birth_date, None);
    }
}
