//! Student API tests.

mod common;

use axum::http::StatusCode;
use campus_persistence::core::CourseStorage;
use serde_json::{Value, json};

use common::harness::{STUDENTS, TestApp, course_path, student_path};

#[tokio::test]
async fn test_create_student() {
    let app = TestApp::new();

    let response = app
        .server
        .post(STUDENTS)
        .json(&json!({"name": "Ada Lovelace", "birth_date": "2003-12-10"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let data: Value = response.json();
    assert_eq!(data["name"], "Ada Lovelace");
    assert_eq!(data["birth_date"], "2003-12-10");
    assert_eq!(app.student_count().await, 1);

    let id = data["id"].as_i64().unwrap();
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("http://localhost:0/api/v1/students/{}/", id)
    );
}

#[tokio::test]
async fn test_create_student_without_birth_date() {
    let app = TestApp::new();

    let response = app.server.post(STUDENTS).json(&json!({"name": "Alan"})).await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.json::<Value>()["birth_date"].is_null());
}

#[tokio::test]
async fn test_create_student_requires_name() {
    let app = TestApp::new();

    let response = app.server.post(STUDENTS).json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"name": ["This field is required."]})
    );
}

#[tokio::test]
async fn test_create_student_with_bad_date() {
    let app = TestApp::new();

    let response = app
        .server
        .post(STUDENTS)
        .json(&json!({"name": "Edsger", "birth_date": "13/05/1930"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"birth_date": ["Date has wrong format. Use one of these formats instead: YYYY-MM-DD."]})
    );
    assert_eq!(app.student_count().await, 0);
}

#[tokio::test]
async fn test_create_student_from_form() {
    let app = TestApp::new();

    let response = app
        .server
        .post(STUDENTS)
        .form(&[("name", "Grace Hopper"), ("birth_date", "1906-12-09")])
        .await;

    response.assert_status(StatusCode::CREATED);
    let data: Value = response.json();
    assert_eq!(data["name"], "Grace Hopper");
    assert_eq!(data["birth_date"], "1906-12-09");
}

#[tokio::test]
async fn test_list_and_retrieve_students() {
    let app = TestApp::new();
    let ids = app.students().make_many(3).await;

    let data: Vec<Value> = app.server.get("/api/v1/students").await.json();
    let listed: Vec<i64> = data.iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(listed, ids);

    let response = app.server.get(&student_path(ids[1])).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], ids[1]);
}

#[tokio::test]
async fn test_retrieve_missing_student() {
    let app = TestApp::new();

    let response = app.server.get(&student_path(77)).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({"detail": "Not found."}));
}

#[tokio::test]
async fn test_delete_student_unenrolls() {
    let app = TestApp::new();
    let ids = app.students().make_many(2).await;
    let course = app.courses().make_with_students(&ids).await;

    let response = app.server.delete(&student_path(ids[0])).await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.as_bytes().is_empty());

    let data: Value = app.server.get(&course_path(course.id)).await.json();
    assert_eq!(data["students"], json!([ids[1]]));

    let stored = app.backend.read_course(course.id).await.unwrap().unwrap();
    assert_eq!(stored.students, vec![ids[1]]);
}

#[tokio::test]
async fn test_delete_missing_student() {
    let app = TestApp::new();

    let response = app.server.delete(&student_path(5)).await;

    response.assert_status(StatusCode::NOT_FOUND);
}
