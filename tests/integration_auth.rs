mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Duration;
use common::{PASSWORD, TestApp, error_code, generate_unique_email};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_register_returns_user_and_tokens() {
    let app = TestApp::new();
    let email = generate_unique_email();

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": email, "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"]["id"].is_string());
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    let email = generate_unique_email();
    app.register(&email).await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": email, "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "EMAIL_EXISTS");
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": generate_unique_email(), "password": "onlyletters" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = TestApp::new();

    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": "not-an-email", "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    let email = generate_unique_email();
    let registered = app.register(&email).await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"].get("username").is_some());
    assert!(body["user"].get("avatar_url").is_some());
    assert_ne!(body["refresh_token"], registered.refresh_token.as_str());
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let app = TestApp::new();
    let email = generate_unique_email();
    app.register(&email).await;

    let (wrong_status, wrong_body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": "password2" }),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": generate_unique_email(), "password": PASSWORD }),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&wrong_body), "INVALID_CREDENTIALS");
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_refresh_rotation() {
    let app = TestApp::new();
    let user = app.register(&generate_unique_email()).await;
    let r1 = user.refresh_token;

    let (status, body) = app
        .post("/api/auth/refresh", None, json!({ "refresh_token": r1 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let r2 = body["refresh_token"].as_str().unwrap().to_string();
    let a2 = body["access_token"].as_str().unwrap().to_string();
    assert_ne!(r1, r2);

    let (status, body) = app
        .post("/api/auth/refresh", None, json!({ "refresh_token": r1 }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "REFRESH_TOKEN_INVALID");

    let (status, _) = app
        .post("/api/auth/refresh", None, json!({ "refresh_token": r2 }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/api/users/me", Some(&a2)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_concurrent_refresh_single_winner() {
    let app = TestApp::new();
    let user = app.register(&generate_unique_email()).await;
    let body = json!({ "refresh_token": user.refresh_token });

    let (first, second) = tokio::join!(
        app.post("/api/auth/refresh", None, body.clone()),
        app.post("/api/auth/refresh", None, body.clone())
    );

    let winners = [first.0, second.0]
        .iter()
        .filter(|s| **s == StatusCode::OK)
        .count();
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_access_token_cannot_refresh() {
    let app = TestApp::new();
    let user = app.register(&generate_unique_email()).await;

    let (status, body) = app
        .post(
            "/api/auth/refresh",
            None,
            json!({ "refresh_token": user.access_token }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "REFRESH_TOKEN_INVALID");
}

#[tokio::test]
async fn test_refresh_token_is_not_a_bearer_credential() {
    let app = TestApp::new();
    let user = app.register(&generate_unique_email()).await;

    let (status, body) = app.get("/api/users/me", Some(&user.refresh_token)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_missing_and_garbage_bearer() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/users/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "UNAUTHORIZED");

    let (status, body) = app.get("/api/users/me", Some("not.a.jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let app = TestApp::new();
    let user = app.register(&generate_unique_email()).await;

    let request = Request::builder()
        .uri("/api/users/me")
        .header(header::AUTHORIZATION, format!("Token {}", user.access_token))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_access_token_expires() {
    let app = TestApp::new();
    let user = app.register(&generate_unique_email()).await;

    app.advance(Duration::minutes(14));
    let (status, _) = app.get("/api/users/me", Some(&user.access_token)).await;
    assert_eq!(status, StatusCode::OK);

    app.advance(Duration::minutes(2));
    let (status, body) = app.get("/api/users/me", Some(&user.access_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "INVALID_TOKEN");

    // The refresh token outlives the access token.
    let (status, _) = app
        .post(
            "/api/auth/refresh",
            None,
            json!({ "refresh_token": user.refresh_token }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_token_expires() {
    let app = TestApp::new();
    let user = app.register(&generate_unique_email()).await;

    app.advance(Duration::days(31));

    let (status, body) = app
        .post(
            "/api/auth/refresh",
            None,
            json!({ "refresh_token": user.refresh_token }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "REFRESH_TOKEN_INVALID");
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let app = TestApp::new();
    let user = app.register(&generate_unique_email()).await;

    let (status, _) = app
        .post(
            "/api/auth/logout",
            Some(&user.access_token),
            json!({ "refresh_token": user.refresh_token }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/auth/refresh",
            None,
            json!({ "refresh_token": user.refresh_token }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_body() {
    let app = TestApp::new();
    let user = app.register(&generate_unique_email()).await;

    let (status, body) = app
        .request(
            axum::http::Method::POST,
            "/api/auth/logout",
            Some(&user.access_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    assert_eq!(app.store.credential_count().await, 1);
}

#[tokio::test]
async fn test_logout_requires_bearer() {
    let app = TestApp::new();
    let user = app.register(&generate_unique_email()).await;

    let (status, _) = app
        .post(
            "/api/auth/logout",
            None,
            json!({ "refresh_token": user.refresh_token }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.credential_count().await, 1);
}

#[tokio::test]
async fn test_logout_all_revokes_every_session() {
    let app = TestApp::new();
    let email = generate_unique_email();
    let user = app.register(&email).await;

    let (_, login) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": PASSWORD }),
        )
        .await;
    let second_refresh = login["refresh_token"].as_str().unwrap().to_string();

    let (status, _) = app
        .request(
            axum::http::Method::POST,
            "/api/auth/logout-all",
            Some(&user.access_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    for token in [user.refresh_token, second_refresh] {
        let (status, _) = app
            .post("/api/auth/refresh", None, json!({ "refresh_token": token }))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
