mod common;

use axum::http::StatusCode;
use common::{TestApp, error_code, generate_unique_email};
use serde_json::json;

#[tokio::test]
async fn test_categories_read_anonymously_write_authenticated() {
    let app = TestApp::new();
    let alice = app.register(&generate_unique_email()).await;

    let (status, _) = app
        .post("/api/categories", None, json!({ "name": "Languages" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post(
            "/api/categories",
            Some(&alice.access_token),
            json!({ "name": "Languages" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Languages");

    let (status, body) = app.get("/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_tag_already_exists() {
    let app = TestApp::new();
    let alice = app.register(&generate_unique_email()).await;
    let bob = app.register(&generate_unique_email()).await;

    let (status, _) = app
        .post("/api/tags", Some(&alice.access_token), json!({ "name": "verbs" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post("/api/tags", Some(&bob.access_token), json!({ "name": "verbs" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "ALREADY_EXISTS");

    let (_, body) = app.get("/api/tags", None).await;
    assert_eq!(body["tags"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_label_name_validation() {
    let app = TestApp::new();
    let alice = app.register(&generate_unique_email()).await;

    let (status, _) = app
        .post("/api/tags", Some(&alice.access_token), json!({ "name": "" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_deck_with_existing_category() {
    let app = TestApp::new();
    let alice = app.register(&generate_unique_email()).await;

    let (_, category) = app
        .post(
            "/api/categories",
            Some(&alice.access_token),
            json!({ "name": "Geography" }),
        )
        .await;

    let (status, body) = app
        .post(
            "/api/decks",
            Some(&alice.access_token),
            json!({ "title": "Capitals", "category_id": category["id"] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["category_id"], category["id"]);
}
