mod common;

use axum::http::StatusCode;
use common::{create_test_user, lazy_app, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use yamdb_core::Role;

#[tokio::test]
async fn test_me_requires_authentication() {
    let (status, _) = send(lazy_app(), "GET", "/api/v1/users/me/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_list_requires_authentication() {
    let (status, _) = send(lazy_app(), "GET", "/api/v1/users/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_me(pool: PgPool) {
    let user = create_test_user(&pool, Role::User).await;

    let (status, body) = send(
        setup_test_app(pool),
        "GET",
        "/api/v1/users/me/",
        Some(&user.token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], user.username.as_str());
    assert_eq!(body["email"], user.email.as_str());
    assert_eq!(body["role"], "user");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_me_ignores_role(pool: PgPool) {
    let user = create_test_user(&pool, Role::User).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "PATCH",
        "/api/v1/users/me/",
        Some(&user.token),
        Some(json!({ "bio": "Film buff", "role": "admin" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bio"], "Film buff");
    assert_eq!(body["role"], "user");

    let role: Role = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(role, Role::User);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_me_ignores_unassignable_role(pool: PgPool) {
    let user = create_test_user(&pool, Role::Moderator).await;

    let (status, body) = send(
        setup_test_app(pool),
        "PATCH",
        "/api/v1/users/me/",
        Some(&user.token),
        Some(json!({ "first_name": "Ann", "role": "anonymous" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Ann");
    assert_eq!(body["role"], "moderator");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_search_treats_wildcards_literally(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;
    sqlx::query(
        "INSERT INTO users (username, email) VALUES ('film_fan', 'a@example.com'), ('filmxfan', 'b@example.com')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let (status, body) = send(
        setup_test_app(pool),
        "GET",
        "/api/v1/users/?search=film_",
        Some(&admin.token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["username"], "film_fan");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_non_admins_cannot_manage_users(pool: PgPool) {
    for role in [Role::User, Role::Moderator] {
        let user = create_test_user(&pool, role).await;
        let (status, _) = send(
            setup_test_app(pool.clone()),
            "GET",
            "/api/v1/users/",
            Some(&user.token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", role);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_user_crud(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/users/",
        Some(&admin.token),
        Some(json!({ "username": "critic", "email": "critic@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "user");

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/users/",
        Some(&admin.token),
        Some(json!({ "username": "critic", "email": "other@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["username"].is_array());

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "GET",
        "/api/v1/users/?search=crit",
        Some(&admin.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "PATCH",
        "/api/v1/users/critic/",
        Some(&admin.token),
        Some(json!({ "role": "moderator" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "moderator");

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "DELETE",
        "/api/v1/users/critic/",
        Some(&admin.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        setup_test_app(pool),
        "GET",
        "/api/v1/users/critic/",
        Some(&admin.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reserved_username_is_rejected(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;

    let (status, body) = send(
        setup_test_app(pool),
        "POST",
        "/api/v1/users/",
        Some(&admin.token),
        Some(json!({ "username": "me", "email": "me@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["username"].is_array());
}
