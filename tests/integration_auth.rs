mod common;

use axum::http::StatusCode;
use common::{create_test_user, lazy_app, send, set_confirmation_code, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use yamdb_auth::verify_token;
use yamdb_core::Role;

#[tokio::test]
async fn test_signup_rejects_invalid_fields() {
    let (status, body) = send(
        lazy_app(),
        "POST",
        "/api/v1/auth/signup/",
        None,
        Some(json!({ "username": "bad name", "email": "not-an-email" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["username"].is_array());
    assert!(body["fields"]["email"].is_array());
}

#[tokio::test]
async fn test_signup_rejects_reserved_username() {
    let (status, body) = send(
        lazy_app(),
        "POST",
        "/api/v1/auth/signup/",
        None,
        Some(json!({ "username": "me", "email": "me@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["username"].is_array());
}

#[tokio::test]
async fn test_signup_reports_missing_field() {
    let (status, body) = send(
        lazy_app(),
        "POST",
        "/api/v1/auth/signup/",
        None,
        Some(json!({ "username": "critic" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["email"][0], "This field is required");
}

#[tokio::test]
async fn test_token_requires_code() {
    let (status, _) = send(
        lazy_app(),
        "POST",
        "/api/v1/auth/token/",
        None,
        Some(json!({ "username": "critic", "confirmation_code": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_creates_user_with_code(pool: PgPool) {
    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/auth/signup/",
        None,
        Some(json!({ "username": "critic", "email": "critic@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "username": "critic", "email": "critic@example.com" }));

    let (role, hash): (Role, Option<String>) =
        sqlx::query_as("SELECT role, confirmation_code_hash FROM users WHERE username = 'critic'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(role, Role::User);
    assert!(hash.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_repeated_signup_reuses_user_and_replaces_code(pool: PgPool) {
    let payload = json!({ "username": "critic", "email": "critic@example.com" });

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/auth/signup/",
        None,
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let first_hash: String =
        sqlx::query_scalar("SELECT confirmation_code_hash FROM users WHERE username = 'critic'")
            .fetch_one(&pool)
            .await
            .unwrap();

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/auth/signup/",
        None,
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (count, second_hash): (i64, String) = sqlx::query_as(
        "SELECT COUNT(*) OVER (), confirmation_code_hash FROM users WHERE username = 'critic'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
    assert_ne!(first_hash, second_hash);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_conflicts_name_the_field(pool: PgPool) {
    let existing = create_test_user(&pool, Role::User).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/auth/signup/",
        None,
        Some(json!({ "username": existing.username, "email": "other@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["username"].is_array());

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/auth/signup/",
        None,
        Some(json!({ "username": "someone_else", "email": existing.email })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["email"].is_array());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_exchange_issues_jwt_once(pool: PgPool) {
    let user = create_test_user(&pool, Role::Moderator).await;
    set_confirmation_code(&pool, &user.username, "known-code").await;

    let payload = json!({ "username": user.username, "confirmation_code": "known-code" });
    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/auth/token/",
        None,
        Some(payload.clone()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let claims = verify_token(body["token"].as_str().unwrap(), &common::test_jwt_config()).unwrap();
    assert_eq!(claims.username, user.username);
    assert_eq!(claims.role, Role::Moderator);
    assert_eq!(claims.user_id(), Some(user.id));

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/auth/token/",
        None,
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("token").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_rejects_wrong_code(pool: PgPool) {
    let user = create_test_user(&pool, Role::User).await;
    set_confirmation_code(&pool, &user.username, "known-code").await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/auth/token/",
        None,
        Some(json!({ "username": user.username, "confirmation_code": "wrong-code" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("token").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_unknown_username_is_not_found(pool: PgPool) {
    let (status, _) = send(
        setup_test_app(pool),
        "POST",
        "/api/v1/auth/token/",
        None,
        Some(json!({ "username": "nobody", "confirmation_code": "anything" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_for_deleted_user_is_rejected(pool: PgPool) {
    let user = create_test_user(&pool, Role::User).await;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, _) = send(
        setup_test_app(pool),
        "GET",
        "/api/v1/users/me/",
        Some(&user.token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
