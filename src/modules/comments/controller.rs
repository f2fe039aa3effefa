use axum::{
    Json,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
};
use tracing::instrument;

use yamdb_core::{AppError, PaginationParams, Resource};
use yamdb_models::{
    Comment, CommentId, CreateCommentDto, PaginatedCommentsResponse, ReviewId, TitleId,
    UpdateCommentDto,
};

use crate::middleware::role::{RequireCommentWrite, authorize_object};
use crate::modules::comments::service::CommentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/titles/{title_id}/reviews/{review_id}/comments/",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID"),
        ("limit" = Option<i64>, Query, description = "Page size (1-100, default 10)"),
        ("offset" = Option<i64>, Query, description = "Items to skip"),
        ("page" = Option<i64>, Query, description = "Page number, 1-indexed")
    ),
    responses(
        (status = 200, description = "Comments on the review", body = PaginatedCommentsResponse),
        (status = 404, description = "Review not found under this title")
    ),
    tag = "Comments"
)]
#[instrument(skip(state))]
pub async fn get_comments(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(TitleId, ReviewId)>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedCommentsResponse>, AppError> {
    let comments =
        CommentService::get_comments(&state.db, title_id, review_id, pagination).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/api/v1/titles/{title_id}/reviews/{review_id}/comments/",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Review not found under this title")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_comment(
    State(state): State<AppState>,
    RequireCommentWrite(auth_user): RequireCommentWrite,
    Path((title_id, review_id)): Path<(TitleId, ReviewId)>,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment =
        CommentService::create_comment(&state.db, title_id, review_id, auth_user.id(), dto)
            .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}/",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment details", body = Comment),
        (status = 404, description = "Comment not found under this review")
    ),
    tag = "Comments"
)]
#[instrument(skip(state))]
pub async fn get_comment(
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(TitleId, ReviewId, CommentId)>,
) -> Result<Json<Comment>, AppError> {
    let comment = CommentService::get_comment(&state.db, title_id, review_id, comment_id).await?;
    Ok(Json(comment))
}

#[utoipa::path(
    patch,
    path = "/api/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}/",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - author, moderator or admin only"),
        (status = 404, description = "Comment not found under this review")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_comment(
    State(state): State<AppState>,
    RequireCommentWrite(auth_user): RequireCommentWrite,
    Path((title_id, review_id, comment_id)): Path<(TitleId, ReviewId, CommentId)>,
    ValidatedJson(dto): ValidatedJson<UpdateCommentDto>,
) -> Result<Json<Comment>, AppError> {
    let comment = CommentService::get_comment(&state.db, title_id, review_id, comment_id).await?;
    authorize_object(&auth_user, Resource::Comment, comment.author_id, &Method::PATCH)?;

    let comment = CommentService::update_comment(&state.db, title_id, comment, dto).await?;
    Ok(Json(comment))
}

#[utoipa::path(
    delete,
    path = "/api/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}/",
    params(
        ("title_id" = i64, Path, description = "Title ID"),
        ("review_id" = i64, Path, description = "Review ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - author, moderator or admin only"),
        (status = 404, description = "Comment not found under this review")
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<AppState>,
    RequireCommentWrite(auth_user): RequireCommentWrite,
    Path((title_id, review_id, comment_id)): Path<(TitleId, ReviewId, CommentId)>,
) -> Result<StatusCode, AppError> {
    let comment = CommentService::get_comment(&state.db, title_id, review_id, comment_id).await?;
    authorize_object(&auth_user, Resource::Comment, comment.author_id, &Method::DELETE)?;

    CommentService::delete_comment(&state.db, comment.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
