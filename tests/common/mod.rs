#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use yamdb::router::init_router;
use yamdb::state::AppState;
use yamdb_auth::{create_access_token, hash_code};
use yamdb_config::{ConfirmationConfig, CorsConfig, EmailConfig, JwtConfig};
use yamdb_core::Role;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        email_config: EmailConfig::disabled(),
        cors_config: CorsConfig::from_list("http://localhost:3000"),
        confirmation_config: ConfirmationConfig::default(),
    };
    init_router(state)
}

/// App over a pool that never connects; for requests rejected before any query.
pub fn lazy_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/yamdb_test")
        .expect("lazy pool");
    setup_test_app(pool)
}

pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

pub async fn create_test_user(pool: &PgPool, role: Role) -> TestUser {
    let username = unique_username(role.as_str());
    let email = format!("{}@example.com", username);

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, email, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&username)
    .bind(&email)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    let token = create_access_token(id, &username, role, &test_jwt_config()).unwrap();

    TestUser {
        id,
        username,
        email,
        role,
        token,
    }
}

/// Stores `code` as the user's outstanding confirmation code.
pub async fn set_confirmation_code(pool: &PgPool, username: &str, code: &str) {
    sqlx::query(
        "UPDATE users
         SET confirmation_code_hash = $1, confirmation_code_expires_at = NOW() + INTERVAL '1 hour'
         WHERE username = $2",
    )
    .bind(hash_code(code))
    .bind(username)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_category(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name, slug) VALUES ($1, $1) RETURNING id")
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_genre(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO genres (name, slug) VALUES ($1, $1) RETURNING id")
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_title(pool: &PgPool, name: &str, category_id: i64) -> i64 {
    sqlx::query_scalar("INSERT INTO titles (name, year, category_id) VALUES ($1, 2000, $2) RETURNING id")
        .bind(name)
        .bind(category_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_review(pool: &PgPool, title_id: i64, author_id: i64, score: i16) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO reviews (title_id, author_id, text, score) VALUES ($1, $2, 'Review', $3) RETURNING id",
    )
    .bind(title_id)
    .bind(author_id)
    .bind(score)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_comment(pool: &PgPool, review_id: i64, author_id: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO comments (review_id, author_id, text) VALUES ($1, $2, 'Comment') RETURNING id",
    )
    .bind(review_id)
    .bind(author_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Sends a request and returns the status with the JSON body (`Null` when empty).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}
