mod common;

use axum::http::StatusCode;
use common::{
    create_category, create_genre, create_review, create_test_user, create_title, lazy_app, send,
    setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use yamdb_core::Role;

#[tokio::test]
async fn test_catalog_writes_require_authentication() {
    for (method, uri) in [
        ("POST", "/api/v1/categories/"),
        ("DELETE", "/api/v1/categories/films/"),
        ("POST", "/api/v1/genres/"),
        ("DELETE", "/api/v1/genres/drama/"),
        ("POST", "/api/v1/titles/"),
        ("PATCH", "/api/v1/titles/1/"),
        ("DELETE", "/api/v1/titles/1/"),
    ] {
        let (status, _) = send(
            lazy_app(),
            method,
            uri,
            None,
            Some(json!({ "name": "Films", "slug": "films" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let (status, body) = send(
        lazy_app(),
        "POST",
        "/api/v1/categories/",
        Some("not-a-jwt"),
        Some(json!({ "name": "Films", "slug": "films" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_non_admins_cannot_write_catalog(pool: PgPool) {
    for role in [Role::User, Role::Moderator] {
        let user = create_test_user(&pool, role).await;
        let (status, _) = send(
            setup_test_app(pool.clone()),
            "POST",
            "/api/v1/categories/",
            Some(&user.token),
            Some(json!({ "name": "Films", "slug": "films" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", role);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_manages_categories(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/categories/",
        Some(&admin.token),
        Some(json!({ "name": "Films", "slug": "films" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "name": "Films", "slug": "films" }));

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/categories/",
        Some(&admin.token),
        Some(json!({ "name": "Movies", "slug": "films" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["slug"].is_array());

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "GET",
        "/api/v1/categories/?search=fil",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["slug"], "films");

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "DELETE",
        "/api/v1/categories/films/",
        Some(&admin.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "DELETE",
        "/api/v1/categories/films/",
        Some(&admin.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_huge_page_returns_empty_list(pool: PgPool) {
    create_category(&pool, "films").await;

    for query in ["page=9223372036854775807&limit=100", "offset=9223372036854775807"] {
        let (status, body) = send(
            setup_test_app(pool.clone()),
            "GET",
            &format!("/api/v1/categories/?{}", query),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", query);
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["meta"]["has_more"], false);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_title_name_filter_escapes_wildcards(pool: PgPool) {
    let films = create_category(&pool, "films").await;
    create_title(&pool, "100% Wolf", films).await;
    create_title(&pool, "1000 Wolves", films).await;

    let (status, body) = send(
        setup_test_app(pool),
        "GET",
        "/api/v1/titles/?name=100%25",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["name"], "100% Wolf");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_category_in_use_cannot_be_deleted(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;
    let category_id = create_category(&pool, "books").await;
    create_title(&pool, "Dune", category_id).await;

    let (status, _) = send(
        setup_test_app(pool),
        "DELETE",
        "/api/v1/categories/books/",
        Some(&admin.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_title_expands_relations(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;
    create_category(&pool, "films").await;
    create_genre(&pool, "crime").await;
    create_genre(&pool, "drama").await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/titles/",
        Some(&admin.token),
        Some(json!({
            "name": "Pulp Fiction",
            "year": 1994,
            "genre": ["crime", "drama"],
            "category": "films"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Pulp Fiction");
    assert!(body["rating"].is_null());
    assert_eq!(body["category"], json!({ "name": "films", "slug": "films" }));
    assert_eq!(body["genre"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_title_with_unknown_slugs(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;
    create_category(&pool, "films").await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/titles/",
        Some(&admin.token),
        Some(json!({ "name": "Heat", "genre": ["nope"], "category": "films" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["genre"].is_array());

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/v1/titles/",
        Some(&admin.token),
        Some(json!({ "name": "Heat", "genre": [], "category": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["category"].is_array());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM titles")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rating_is_mean_of_scores(pool: PgPool) {
    let category_id = create_category(&pool, "films").await;
    let title_id = create_title(&pool, "Heat", category_id).await;
    let first = create_test_user(&pool, Role::User).await;
    let second = create_test_user(&pool, Role::User).await;

    let uri = format!("/api/v1/titles/{}/", title_id);
    let (_, body) = send(setup_test_app(pool.clone()), "GET", &uri, None, None).await;
    assert!(body["rating"].is_null());

    create_review(&pool, title_id, first.id, 3).await;
    create_review(&pool, title_id, second.id, 5).await;

    let (status, body) = send(setup_test_app(pool.clone()), "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"].as_f64(), Some(4.0));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_title_filters_and_ordering(pool: PgPool) {
    let films = create_category(&pool, "films").await;
    let books = create_category(&pool, "books").await;
    let drama = create_genre(&pool, "drama").await;
    let alien = create_title(&pool, "Alien", films).await;
    create_title(&pool, "Blade Runner", films).await;
    create_title(&pool, "Contact", books).await;
    sqlx::query("INSERT INTO title_genres (title_id, genre_id) VALUES ($1, $2)")
        .bind(alien)
        .bind(drama)
        .execute(&pool)
        .await
        .unwrap();

    let (_, body) = send(
        setup_test_app(pool.clone()),
        "GET",
        "/api/v1/titles/?category=films&ordering=-name",
        None,
        None,
    )
    .await;
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["data"][0]["name"], "Blade Runner");
    assert_eq!(body["data"][1]["name"], "Alien");

    let (_, body) = send(
        setup_test_app(pool.clone()),
        "GET",
        "/api/v1/titles/?genre=drama",
        None,
        None,
    )
    .await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["name"], "Alien");

    let (_, body) = send(
        setup_test_app(pool.clone()),
        "GET",
        "/api/v1/titles/?name=con&limit=1",
        None,
        None,
    )
    .await;
    assert_eq!(body["data"][0]["name"], "Contact");
    assert_eq!(body["meta"]["has_more"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_patch_title_replaces_genres(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;
    let films = create_category(&pool, "films").await;
    create_genre(&pool, "drama").await;
    create_genre(&pool, "comedy").await;
    let title_id = create_title(&pool, "Heat", films).await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "PATCH",
        &format!("/api/v1/titles/{}/", title_id),
        Some(&admin.token),
        Some(json!({ "genre": ["comedy"] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Heat");
    assert_eq!(body["genre"], json!([{ "name": "comedy", "slug": "comedy" }]));
}
