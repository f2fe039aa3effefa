use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use yamdb_core::AppError;
use yamdb_models::{
    CreateTitleDto, PaginatedTitlesResponse, TitleFilterParams, TitleId, TitleResponse,
    UpdateTitleDto,
};

use crate::middleware::role::RequireTitleWrite;
use crate::modules::titles::service::TitleService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/titles/",
    params(
        ("category" = Option<String>, Query, description = "Category slug"),
        ("genre" = Option<String>, Query, description = "Genre slug"),
        ("name" = Option<String>, Query, description = "Substring of the title name"),
        ("year" = Option<i32>, Query, description = "Release year"),
        ("ordering" = Option<String>, Query, description = "`name` (default), `-name`, `year` or `-year`"),
        ("limit" = Option<i64>, Query, description = "Page size (1-100, default 10)"),
        ("offset" = Option<i64>, Query, description = "Items to skip"),
        ("page" = Option<i64>, Query, description = "Page number, 1-indexed")
    ),
    responses(
        (status = 200, description = "List of titles", body = PaginatedTitlesResponse),
        (status = 400, description = "Invalid filter value")
    ),
    tag = "Titles"
)]
#[instrument(skip(state))]
pub async fn get_titles(
    State(state): State<AppState>,
    Query(filters): Query<TitleFilterParams>,
) -> Result<Json<PaginatedTitlesResponse>, AppError> {
    let titles = TitleService::get_titles(&state.db, filters).await?;
    Ok(Json(titles))
}

#[utoipa::path(
    post,
    path = "/api/v1/titles/",
    request_body = CreateTitleDto,
    responses(
        (status = 201, description = "Title created", body = TitleResponse),
        (status = 400, description = "Invalid input or unknown category/genre"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Titles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_title(
    State(state): State<AppState>,
    _admin: RequireTitleWrite,
    ValidatedJson(dto): ValidatedJson<CreateTitleDto>,
) -> Result<(StatusCode, Json<TitleResponse>), AppError> {
    let title = TitleService::create_title(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(title)))
}

#[utoipa::path(
    get,
    path = "/api/v1/titles/{title_id}/",
    params(("title_id" = i64, Path, description = "Title ID")),
    responses(
        (status = 200, description = "Title details", body = TitleResponse),
        (status = 404, description = "Title not found")
    ),
    tag = "Titles"
)]
#[instrument(skip(state))]
pub async fn get_title(
    State(state): State<AppState>,
    Path(title_id): Path<TitleId>,
) -> Result<Json<TitleResponse>, AppError> {
    let title = TitleService::get_title(&state.db, title_id).await?;
    Ok(Json(title))
}

#[utoipa::path(
    patch,
    path = "/api/v1/titles/{title_id}/",
    params(("title_id" = i64, Path, description = "Title ID")),
    request_body = UpdateTitleDto,
    responses(
        (status = 200, description = "Title updated", body = TitleResponse),
        (status = 400, description = "Invalid input or unknown category/genre"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Title not found")
    ),
    tag = "Titles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_title(
    State(state): State<AppState>,
    _admin: RequireTitleWrite,
    Path(title_id): Path<TitleId>,
    ValidatedJson(dto): ValidatedJson<UpdateTitleDto>,
) -> Result<Json<TitleResponse>, AppError> {
    let title = TitleService::update_title(&state.db, title_id, dto).await?;
    Ok(Json(title))
}

#[utoipa::path(
    delete,
    path = "/api/v1/titles/{title_id}/",
    params(("title_id" = i64, Path, description = "Title ID")),
    responses(
        (status = 204, description = "Title deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Title not found")
    ),
    tag = "Titles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_title(
    State(state): State<AppState>,
    _admin: RequireTitleWrite,
    Path(title_id): Path<TitleId>,
) -> Result<StatusCode, AppError> {
    TitleService::delete_title(&state.db, title_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
