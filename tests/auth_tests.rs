mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use common::{spawn_app, PASSWORD};
use fastzero_backend::auth::Claims;

#[tokio::test]
async fn test_get_access_token_successfully() {
    let app = spawn_app();
    let user = app.create_user("test1");

    let (status, body) = app.login(&user.email, PASSWORD).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
    assert_eq!(body["token_type"], "bearer");
}

#[tokio::test]
async fn test_issued_token_resolves_to_the_same_user() {
    let app = spawn_app();
    let user = app.create_user("test1");

    let token = app.token_for(&user).await;

    let claims = app.state.auth.jwt().decode(&token).unwrap();
    assert_eq!(claims.sub.as_deref(), Some(user.email.as_str()));

    let resolved = app.state.auth.resolve_current_user(&token).unwrap();
    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn test_get_access_token_with_invalid_email() {
    let app = spawn_app();
    app.create_user("test1");

    let (status, body) = app.login("invalid@email.com", PASSWORD).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, serde_json::json!({"detail": "Incorrect email or password"}));
}

#[tokio::test]
async fn test_get_access_token_with_invalid_password() {
    let app = spawn_app();
    let user = app.create_user("test1");

    let (status, body) = app.login(&user.email, "invalid_password").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, serde_json::json!({"detail": "Incorrect email or password"}));
}

#[tokio::test]
async fn test_token_expires_after_thirty_minutes() {
    let app = spawn_app();
    let user = app.create_user("test1");
    let token = app.token_for(&user).await;

    let (status, _) = app
        .request(Method::POST, "/auth/refresh_token", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    app.clock
        .set(Utc.with_ymd_and_hms(2023, 7, 14, 12, 31, 0).unwrap());

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/users/{}", user.id),
            Some(&token),
            Some(serde_json::json!({
                "username": "wrongwrong",
                "email": "wrong@wrong.com",
                "password": "wrong",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, serde_json::json!({"detail": "Could not validate credentials"}));
}

#[tokio::test]
async fn test_refresh_token() {
    let app = spawn_app();
    let user = app.create_user("test1");
    let token = app.token_for(&user).await;
    let original = app.state.auth.jwt().decode(&token).unwrap();

    app.clock.advance(Duration::minutes(5));

    let (status, body) = app
        .request(Method::POST, "/auth/refresh_token", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");

    let refreshed: Claims = app
        .state
        .auth
        .jwt()
        .decode(body["access_token"].as_str().unwrap())
        .unwrap();
    assert_eq!(refreshed.sub, original.sub);
    assert!(refreshed.exp > original.exp);
}

#[tokio::test]
async fn test_refresh_right_after_login_moves_expiry_forward() {
    let app = spawn_app();
    let user = app.create_user("test1");
    let token = app.token_for(&user).await;
    let original = app.state.auth.jwt().decode(&token).unwrap();

    let (status, body) = app
        .request(Method::POST, "/auth/refresh_token", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let refreshed = app
        .state
        .auth
        .jwt()
        .decode(body["access_token"].as_str().unwrap())
        .unwrap();
    assert_eq!(refreshed.sub, original.sub);
    assert!(refreshed.exp > original.exp);
}

#[tokio::test]
async fn test_token_expired_dont_refresh() {
    let app = spawn_app();
    let user = app.create_user("test1");
    let token = app.token_for(&user).await;

    app.clock.advance(Duration::minutes(31));

    let (status, body) = app
        .request(Method::POST, "/auth/refresh_token", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, serde_json::json!({"detail": "Could not validate credentials"}));
}

#[tokio::test]
async fn test_refresh_requires_bearer_header() {
    let app = spawn_app();

    let (status, body) = app
        .request(Method::POST, "/auth/refresh_token", None, None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, serde_json::json!({"detail": "Not authenticated"}));
}

#[tokio::test]
async fn test_jwt_invalid_token() {
    let app = spawn_app();

    let (status, body) = app
        .request(Method::DELETE, "/users/1", Some("token-invalido"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, serde_json::json!({"detail": "Could not validate credentials"}));
}

#[tokio::test]
async fn test_jwt_without_user_email() {
    let app = spawn_app();
    app.create_user("test1");
    let token = app
        .state
        .auth
        .jwt()
        .encode_claims(&Claims {
            sub: None,
            exp: (common::noon() + Duration::minutes(30)).timestamp(),
        })
        .unwrap();

    let (status, body) = app
        .request(Method::DELETE, "/users/1", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, serde_json::json!({"detail": "Could not validate credentials"}));
}

#[tokio::test]
async fn test_jwt_with_inexistent_user() {
    let app = spawn_app();
    app.create_user("test1");
    let token = app
        .state
        .auth
        .jwt()
        .encode("test@test", common::noon())
        .unwrap();

    let (status, body) = app
        .request(Method::DELETE, "/users/1", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, serde_json::json!({"detail": "Could not validate credentials"}));
}
