use axum::http::StatusCode;
use serde_json::json;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

mod common;

use common::{request, test_app};

#[tokio::test]
async fn create_returns_message_and_data() {
    let app = test_app().await;

    let (status, body) =
        request(&app, "POST", "/categories", Some(json!({"name": "Fiction"}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Fiction category has been created");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Fiction");
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"]["updated_at"].is_string());
}

#[tokio::test]
async fn create_rejects_missing_name_without_persisting() {
    let app = test_app().await;

    let (status, body) = request(&app, "POST", "/categories", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], json!(["This field is required."]));

    let (_, listed) = request(&app, "GET", "/categories", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn create_rejects_blank_and_overlong_names() {
    let app = test_app().await;

    let (status, body) = request(&app, "POST", "/categories", Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], json!(["This field may not be blank."]));

    let long = "x".repeat(256);
    let (status, body) = request(&app, "POST", "/categories", Some(json!({"name": long}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["name"],
        json!(["Ensure this field has no more than 255 characters."])
    );
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let app = test_app().await;

    let (status, body) = request(&app, "POST", "/categories", Some(json!(["Fiction"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["non_field_errors"],
        json!(["Invalid data. Expected a dictionary, but got list."])
    );
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let app = test_app().await;

    for name in ["Sci-Fi", "History", "Poetry"] {
        let (status, _) = request(&app, "POST", "/categories", Some(json!({"name": name}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = request(&app, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn retrieve_unknown_category_is_404() {
    let app = test_app().await;

    let (status, body) = request(&app, "GET", "/categories/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found.");
}

#[tokio::test]
async fn update_replaces_name_and_keeps_created_at() {
    let app = test_app().await;

    let (_, created) =
        request(&app, "POST", "/categories", Some(json!({"name": "Fiction"}))).await;
    let created_at = created["data"]["created_at"].as_str().unwrap().to_string();

    let (status, body) = request(
        &app,
        "PUT",
        "/categories/1",
        Some(json!({"name": "Literary Fiction"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Literary Fiction category has been updated");
    assert_eq!(body["data"]["name"], "Literary Fiction");
    assert_eq!(body["data"]["created_at"], json!(created_at));

    let created_at = OffsetDateTime::parse(&created_at, &Rfc3339).unwrap();
    let updated_at =
        OffsetDateTime::parse(body["data"]["updated_at"].as_str().unwrap(), &Rfc3339).unwrap();
    assert!(updated_at >= created_at);
}

#[tokio::test]
async fn partial_update_validates_present_fields_only() {
    let app = test_app().await;

    request(&app, "POST", "/categories", Some(json!({"name": "Fiction"}))).await;

    // Empty PATCH body is valid and leaves the name alone.
    let (status, body) = request(&app, "PATCH", "/categories/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Fiction");

    let (status, body) =
        request(&app, "PATCH", "/categories/1", Some(json!({"name": null}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], json!(["This field may not be null."]));
}

#[tokio::test]
async fn update_unknown_category_is_404() {
    let app = test_app().await;

    let (status, _) = request(&app, "PUT", "/categories/7", Some(json!({"name": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_message_and_removes_row() {
    let app = test_app().await;

    request(&app, "POST", "/categories", Some(json!({"name": "Fiction"}))).await;

    let (status, body) = request(&app, "DELETE", "/categories/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body["message"], "Fiction category has been deleted");

    let (status, _) = request(&app, "GET", "/categories/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_category_is_404() {
    let app = test_app().await;

    let (status, body) = request(&app, "DELETE", "/categories/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found.");
}
