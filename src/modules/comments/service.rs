use sqlx::PgPool;
use tracing::instrument;

use yamdb_core::{AppError, PaginationMeta, PaginationParams};
use yamdb_models::{
    Comment, CommentId, CreateCommentDto, PaginatedCommentsResponse, ReviewId, TitleId,
    UpdateCommentDto, UserId,
};

use crate::metrics::track_content_created;
use crate::modules::reviews::service::ReviewService;

const COMMENT_SELECT: &str = "SELECT c.id, c.review_id, c.author_id, c.text, u.username AS author,
        c.pub_date
    FROM comments c
    JOIN users u ON u.id = c.author_id";

pub struct CommentService;

impl CommentService {
    #[instrument(skip(db))]
    pub async fn get_comments(
        db: &PgPool,
        title_id: TitleId,
        review_id: ReviewId,
        pagination: PaginationParams,
    ) -> Result<PaginatedCommentsResponse, AppError> {
        ReviewService::get_review(db, title_id, review_id).await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE review_id = $1")
                .bind(review_id)
                .fetch_one(db)
                .await?;

        let comments = sqlx::query_as::<_, Comment>(&format!(
            "{COMMENT_SELECT} WHERE c.review_id = $1 ORDER BY c.pub_date, c.id LIMIT $2 OFFSET $3"
        ))
        .bind(review_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedCommentsResponse {
            data: comments,
            meta: PaginationMeta::new(total, &pagination),
        })
    }

    /// Resolves the whole title/review/comment chain; any break is a 404.
    #[instrument(skip(db))]
    pub async fn get_comment(
        db: &PgPool,
        title_id: TitleId,
        review_id: ReviewId,
        comment_id: CommentId,
    ) -> Result<Comment, AppError> {
        sqlx::query_as::<_, Comment>(&format!(
            "{COMMENT_SELECT}
             JOIN reviews r ON r.id = c.review_id
             WHERE c.id = $1 AND c.review_id = $2 AND r.title_id = $3"
        ))
        .bind(comment_id)
        .bind(review_id)
        .bind(title_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Comment not found")))
    }

    #[instrument(skip(db))]
    pub async fn create_comment(
        db: &PgPool,
        title_id: TitleId,
        review_id: ReviewId,
        author_id: UserId,
        dto: CreateCommentDto,
    ) -> Result<Comment, AppError> {
        ReviewService::get_review(db, title_id, review_id).await?;

        let comment_id = sqlx::query_scalar::<_, CommentId>(
            "INSERT INTO comments (review_id, author_id, text) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(review_id)
        .bind(author_id)
        .bind(&dto.text)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if yamdb_db::is_foreign_key_violation(&e) {
                return AppError::not_found(anyhow::anyhow!("Review not found"));
            }
            AppError::from(e)
        })?;

        track_content_created("comment");

        Self::get_comment(db, title_id, review_id, comment_id).await
    }

    #[instrument(skip(db))]
    pub async fn update_comment(
        db: &PgPool,
        title_id: TitleId,
        comment: Comment,
        dto: UpdateCommentDto,
    ) -> Result<Comment, AppError> {
        if let Some(text) = &dto.text {
            sqlx::query("UPDATE comments SET text = $1 WHERE id = $2")
                .bind(text)
                .bind(comment.id)
                .execute(db)
                .await?;
        }

        Self::get_comment(db, title_id, comment.review_id, comment.id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_comment(db: &PgPool, comment_id: CommentId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Comment not found")));
        }

        Ok(())
    }
}
