use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;
use yamdb_core::PaginationMeta;

use crate::ids::{CommentId, ReviewId, UserId};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Comment {
    pub id: CommentId,
    #[serde(skip_serializing)]
    pub review_id: ReviewId,
    #[serde(skip_serializing)]
    pub author_id: UserId,
    pub text: String,
    pub author: String,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentDto {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCommentsResponse {
    pub data: Vec<Comment>,
    pub meta: PaginationMeta,
}
