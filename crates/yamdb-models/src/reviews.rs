use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;
use yamdb_core::PaginationMeta;

use crate::ids::{ReviewId, TitleId, UserId};

/// A review as returned to clients; `author` is the author's username.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Review {
    pub id: ReviewId,
    #[serde(skip_serializing)]
    pub title_id: TitleId,
    #[serde(skip_serializing)]
    pub author_id: UserId,
    pub text: String,
    pub author: String,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

/// Author and parent are taken from the request context, never from the body.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewDto {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,
    #[validate(range(min = 1, max = 10, message = "Score must be between 1 and 10"))]
    pub score: i16,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewDto {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: Option<String>,
    #[validate(range(min = 1, max = 10, message = "Score must be between 1 and 10"))]
    pub score: Option<i16>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedReviewsResponse {
    pub data: Vec<Review>,
    pub meta: PaginationMeta,
}
