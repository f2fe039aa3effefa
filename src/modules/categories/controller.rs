use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use yamdb_core::AppError;
use yamdb_models::{CatalogFilterParams, Category, CreateCategoryDto, PaginatedCategoriesResponse};

use crate::middleware::role::RequireCategoryWrite;
use crate::modules::categories::service::CategoryService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/categories/",
    params(
        ("search" = Option<String>, Query, description = "Substring of the category name"),
        ("limit" = Option<i64>, Query, description = "Page size (1-100, default 10)"),
        ("offset" = Option<i64>, Query, description = "Items to skip"),
        ("page" = Option<i64>, Query, description = "Page number, 1-indexed")
    ),
    responses(
        (status = 200, description = "List of categories", body = PaginatedCategoriesResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
    Query(filters): Query<CatalogFilterParams>,
) -> Result<Json<PaginatedCategoriesResponse>, AppError> {
    let categories = CategoryService::get_categories(&state.db, filters).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories/",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid input or slug taken"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    _admin: RequireCategoryWrite,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = CategoryService::create_category(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{slug}/",
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Category is still used by titles"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Category not found")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    _admin: RequireCategoryWrite,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    CategoryService::delete_category(&state.db, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
