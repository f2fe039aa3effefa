use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use yamdb_core::AppError;
use yamdb_models::{CatalogFilterParams, CreateGenreDto, Genre, PaginatedGenresResponse};

use crate::middleware::role::RequireGenreWrite;
use crate::modules::genres::service::GenreService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/genres/",
    params(
        ("search" = Option<String>, Query, description = "Substring of the genre name"),
        ("limit" = Option<i64>, Query, description = "Page size (1-100, default 10)"),
        ("offset" = Option<i64>, Query, description = "Items to skip"),
        ("page" = Option<i64>, Query, description = "Page number, 1-indexed")
    ),
    responses(
        (status = 200, description = "List of genres", body = PaginatedGenresResponse)
    ),
    tag = "Genres"
)]
#[instrument(skip(state))]
pub async fn get_genres(
    State(state): State<AppState>,
    Query(filters): Query<CatalogFilterParams>,
) -> Result<Json<PaginatedGenresResponse>, AppError> {
    let genres = GenreService::get_genres(&state.db, filters).await?;
    Ok(Json(genres))
}

#[utoipa::path(
    post,
    path = "/api/v1/genres/",
    request_body = CreateGenreDto,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid input or slug taken"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Genres",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_genre(
    State(state): State<AppState>,
    _admin: RequireGenreWrite,
    ValidatedJson(dto): ValidatedJson<CreateGenreDto>,
) -> Result<(StatusCode, Json<Genre>), AppError> {
    let genre = GenreService::create_genre(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/genres/{slug}/",
    params(("slug" = String, Path, description = "Genre slug")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Genre not found")
    ),
    tag = "Genres",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_genre(
    State(state): State<AppState>,
    _admin: RequireGenreWrite,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    GenreService::delete_genre(&state.db, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
