use axum::{
    Json,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
};
use tracing::instrument;

use yamdb_core::{AppError, PaginationParams, Resource};
use yamdb_models::{
    CreateReviewDto, PaginatedReviewsResponse, Review, ReviewId, TitleId, UpdateReviewDto,
};

use crate::middleware::role::{RequireReviewWrite, authorize_object};
use crate::modules::reviews::service::ReviewService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/titles/{title_id}/reviews/",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("limit" = Option<i64>, Query, description = "Page size (1-100, default 10)"),
        ("offset" = Option<i64>, Query, description = "Items to skip"),
        ("page" = Option<i64>, Query, description = "Page number, 1-indexed")
    ),
    responses(
        (status = 200, description = "Reviews of the title", body = PaginatedReviewsResponse),
        (status = 404, description = "Title not found")
    ),
    tag = "Reviews"
)]
#[instrument(skip(state))]
pub async fn get_reviews(
    State(state): State<AppState>,
    Path(title_id): Path<TitleId>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedReviewsResponse>, AppError> {
    let reviews = ReviewService::get_reviews(&state.db, title_id, pagination).await?;
    Ok(Json(reviews))
}

/// Review a title
///
/// The author is the caller; a title can be reviewed once per user.
#[utoipa::path(
    post,
    path = "/api/v1/titles/{title_id}/reviews/",
    params(("title_id" = i64, Path, description = "Title ID")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Invalid input or title already reviewed by the caller"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Title not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_review(
    State(state): State<AppState>,
    RequireReviewWrite(auth_user): RequireReviewWrite,
    Path(title_id): Path<TitleId>,
    ValidatedJson(dto): ValidatedJson<CreateReviewDto>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = ReviewService::create_review(&state.db, title_id, auth_user.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    get,
    path = "/api/v1/titles/{title_id}/reviews/{review_id}/",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review details", body = Review),
        (status = 404, description = "Review not found under this title")
    ),
    tag = "Reviews"
)]
#[instrument(skip(state))]
pub async fn get_review(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(TitleId, ReviewId)>,
) -> Result<Json<Review>, AppError> {
    let review = ReviewService::get_review(&state.db, title_id, review_id).await?;
    Ok(Json(review))
}

#[utoipa::path(
    patch,
    path = "/api/v1/titles/{title_id}/reviews/{review_id}/",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID")
    ),
    request_body = UpdateReviewDto,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - author, moderator or admin only"),
        (status = 404, description = "Review not found under this title")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_review(
    State(state): State<AppState>,
    RequireReviewWrite(auth_user): RequireReviewWrite,
    Path((title_id, review_id)): Path<(TitleId, ReviewId)>,
    ValidatedJson(dto): ValidatedJson<UpdateReviewDto>,
) -> Result<Json<Review>, AppError> {
    let review = ReviewService::get_review(&state.db, title_id, review_id).await?;
    authorize_object(&auth_user, Resource::Review, review.author_id, &Method::PATCH)?;

    let review = ReviewService::update_review(&state.db, review, dto).await?;
    Ok(Json(review))
}

#[utoipa::path(
    delete,
    path = "/api/v1/titles/{title_id}/reviews/{review_id}/",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - author, moderator or admin only"),
        (status = 404, description = "Review not found under this title")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_review(
    State(state): State<AppState>,
    RequireReviewWrite(auth_user): RequireReviewWrite,
    Path((title_id, review_id)): Path<(TitleId, ReviewId)>,
) -> Result<StatusCode, AppError> {
    let review = ReviewService::get_review(&state.db, title_id, review_id).await?;
    authorize_object(&auth_user, Resource::Review, review.author_id, &Method::DELETE)?;

    ReviewService::delete_review(&state.db, review.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
