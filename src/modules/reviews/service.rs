use sqlx::PgPool;
use tracing::instrument;

use yamdb_core::{AppError, PaginationMeta, PaginationParams};
use yamdb_models::{
    CreateReviewDto, PaginatedReviewsResponse, Review, ReviewId, TitleId, UpdateReviewDto, UserId,
};

use crate::metrics::track_content_created;
use crate::modules::titles::service::TitleService;

const REVIEW_SELECT: &str = "SELECT r.id, r.title_id, r.author_id, r.text, u.username AS author,
        r.score, r.pub_date
    FROM reviews r
    JOIN users u ON u.id = r.author_id";

pub struct ReviewService;

impl ReviewService {
    #[instrument(skip(db))]
    pub async fn get_reviews(
        db: &PgPool,
        title_id: TitleId,
        pagination: PaginationParams,
    ) -> Result<PaginatedReviewsResponse, AppError> {
        TitleService::ensure_exists(db, title_id).await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE title_id = $1")
                .bind(title_id)
                .fetch_one(db)
                .await?;

        let reviews = sqlx::query_as::<_, Review>(&format!(
            "{REVIEW_SELECT} WHERE r.title_id = $1 ORDER BY r.pub_date DESC, r.id DESC LIMIT $2 OFFSET $3"
        ))
        .bind(title_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedReviewsResponse {
            data: reviews,
            meta: PaginationMeta::new(total, &pagination),
        })
    }

    /// Loads a review only if it belongs to `title_id`.
    #[instrument(skip(db))]
    pub async fn get_review(
        db: &PgPool,
        title_id: TitleId,
        review_id: ReviewId,
    ) -> Result<Review, AppError> {
        sqlx::query_as::<_, Review>(&format!(
            "{REVIEW_SELECT} WHERE r.id = $1 AND r.title_id = $2"
        ))
        .bind(review_id)
        .bind(title_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Review not found")))
    }

    #[instrument(skip(db))]
    pub async fn create_review(
        db: &PgPool,
        title_id: TitleId,
        author_id: UserId,
        dto: CreateReviewDto,
    ) -> Result<Review, AppError> {
        TitleService::ensure_exists(db, title_id).await?;

        let review_id = sqlx::query_scalar::<_, ReviewId>(
            "INSERT INTO reviews (title_id, author_id, text, score)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(title_id)
        .bind(author_id)
        .bind(&dto.text)
        .bind(dto.score)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if yamdb_db::is_unique_violation(&e) {
                return AppError::bad_request(anyhow::anyhow!(
                    "You have already reviewed this title"
                ));
            }
            if yamdb_db::is_foreign_key_violation(&e) {
                return AppError::not_found(anyhow::anyhow!("Title not found"));
            }
            AppError::from(e)
        })?;

        track_content_created("review");

        Self::get_review(db, title_id, review_id).await
    }

    #[instrument(skip(db))]
    pub async fn update_review(
        db: &PgPool,
        review: Review,
        dto: UpdateReviewDto,
    ) -> Result<Review, AppError> {
        sqlx::query("UPDATE reviews SET text = $1, score = $2 WHERE id = $3")
            .bind(dto.text.unwrap_or(review.text))
            .bind(dto.score.unwrap_or(review.score))
            .bind(review.id)
            .execute(db)
            .await?;

        Self::get_review(db, review.title_id, review.id).await
    }

    /// Comments on the review are removed with it.
    #[instrument(skip(db))]
    pub async fn delete_review(db: &PgPool, review_id: ReviewId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Review not found")));
        }

        Ok(())
    }
}
