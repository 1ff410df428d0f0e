mod common;

use axum::http::StatusCode;
use common::{TestApp, error_code, generate_unique_email};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_deck_access_scenario() {
    let app = TestApp::new();
    let alice = app.register(&generate_unique_email()).await;
    let bob = app.register(&generate_unique_email()).await;

    let deck_id = app.create_deck(&alice, "Spanish verbs", false).await;
    let deck_uri = format!("/api/decks/{deck_id}");

    let (status, body) = app.get(&deck_uri, Some(&bob.access_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "FORBIDDEN");

    let (status, body) = app
        .get(&format!("/api/decks/{}", Uuid::new_v4()), Some(&bob.access_token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");

    let (status, body) = app
        .put(&deck_uri, Some(&alice.access_token), json!({ "is_public": true }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_public"], true);
    assert_eq!(body["title"], "Spanish verbs");

    let (status, body) = app.get(&deck_uri, Some(&bob.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], deck_id.as_str());

    let (status, body) = app
        .put(&deck_uri, Some(&bob.access_token), json!({ "title": "Mine now" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "FORBIDDEN");

    let (status, _) = app.delete(&deck_uri, Some(&bob.access_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_crud() {
    let app = TestApp::new();
    let alice = app.register(&generate_unique_email()).await;

    let (status, body) = app
        .post(
            "/api/decks",
            Some(&alice.access_token),
            json!({ "title": "Capitals", "description": "Europe" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_public"], false);
    assert_eq!(body["user_id"], alice.id.as_str());
    let deck_uri = format!("/api/decks/{}", body["id"].as_str().unwrap());

    let (status, body) = app.get("/api/decks", Some(&alice.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decks"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .put(&deck_uri, Some(&alice.access_token), json!({ "title": "World capitals" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "World capitals");
    assert_eq!(body["description"], "Europe");

    let (status, _) = app.delete(&deck_uri, Some(&alice.access_token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&deck_uri, Some(&alice.access_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_is_scoped_to_owner() {
    let app = TestApp::new();
    let alice = app.register(&generate_unique_email()).await;
    let bob = app.register(&generate_unique_email()).await;

    app.create_deck(&alice, "Alice public", true).await;
    app.create_deck(&alice, "Alice private", false).await;

    let (status, body) = app.get("/api/decks", Some(&bob.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["decks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_deck_routes_require_bearer() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/decks", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "UNAUTHORIZED");

    let (status, _) = app.post("/api/decks", None, json!({ "title": "x" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new();
    let alice = app.register(&generate_unique_email()).await;

    let (status, body) = app
        .post("/api/decks", Some(&alice.access_token), json!({ "title": "" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");

    let (status, body) = app
        .post(
            "/api/decks",
            Some(&alice.access_token),
            json!({ "title": "Orphan", "category_id": Uuid::new_v4() }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn test_public_browse() {
    let app = TestApp::new();
    let alice = app.register(&generate_unique_email()).await;

    let public_id = app.create_deck(&alice, "Shared", true).await;
    let private_id = app.create_deck(&alice, "Hidden", false).await;

    let (status, _) = app
        .post(
            &format!("/api/decks/{public_id}/cards"),
            Some(&alice.access_token),
            json!({ "question": "2 + 2", "answer": "4" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/api/public/decks", None).await;
    assert_eq!(status, StatusCode::OK);
    let decks = body["decks"].as_array().unwrap();
    assert_eq!(decks.len(), 1);
    assert_eq!(decks[0]["id"], public_id.as_str());

    let (status, body) = app
        .get(&format!("/api/public/decks/{public_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Shared");
    assert_eq!(body["cards"].as_array().unwrap().len(), 1);

    // Private decks are not discoverable anonymously.
    let (status, _) = app
        .get(&format!("/api/public/decks/{private_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The owner still sees their own deck.
    let (status, _) = app
        .get(
            &format!("/api/public/decks/{private_id}"),
            Some(&alice.access_token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_public_browse_rejects_bad_token() {
    let app = TestApp::new();

    let uri = format!("/api/public/decks/{}", Uuid::new_v4());

    let (status, body) = app.get(&uri, Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_elevated_role_grants_nothing() {
    let app = TestApp::new();
    let alice = app.register(&generate_unique_email()).await;
    let deck_id = app.create_deck(&alice, "Private", false).await;

    let admin_email = generate_unique_email();
    flashdeck::cli::create_user(
        &app.store,
        &admin_email,
        common::PASSWORD,
        flashdeck_auth::Role::Admin,
        None,
    )
    .await
    .unwrap();

    let (_, login) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": admin_email, "password": common::PASSWORD }),
        )
        .await;
    assert_eq!(login["user"]["role"], "admin");
    let admin_token = login["access_token"].as_str().unwrap();

    let (status, _) = app
        .get(&format!("/api/decks/{deck_id}"), Some(admin_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deck_tags_and_public_author() {
    let app = TestApp::new();
    let alice = app.register(&generate_unique_email()).await;
    app.put(
        "/api/users/me",
        Some(&alice.access_token),
        json!({ "username": "alice" }),
    )
    .await;

    let (_, tag) = app
        .post("/api/tags", Some(&alice.access_token), json!({ "name": "verbs" }))
        .await;
    let tag_id = tag["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/api/decks",
            Some(&alice.access_token),
            json!({ "title": "Verbs", "is_public": true, "tag_ids": [tag_id] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["tags"][0]["name"], "verbs");
    let deck_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = app.get("/api/public/decks", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = &body["decks"][0];
    assert_eq!(listed["author"]["id"], alice.id.as_str());
    assert_eq!(listed["author"]["username"], "alice");
    assert_eq!(listed["cards_count"], 0);
    assert_eq!(listed["tags"].as_array().unwrap().len(), 1);
    assert!(listed.get("email").is_none());

    let (_, body) = app.get(&format!("/api/public/decks/{deck_id}"), None).await;
    assert_eq!(body["author"]["username"], "alice");

    let (status, body) = app
        .put(
            &format!("/api/decks/{deck_id}"),
            Some(&alice.access_token),
            json!({ "tag_ids": [] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["tags"].as_array().unwrap().is_empty());

    let (status, body) = app
        .put(
            &format!("/api/decks/{deck_id}"),
            Some(&alice.access_token),
            json!({ "tag_ids": [Uuid::new_v4()] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}
