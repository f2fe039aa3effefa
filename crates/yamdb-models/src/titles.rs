//! Titles: the works being reviewed.
//!
//! Reads and writes use different shapes. [`TitleResponse`] expands the
//! category and genres and carries the computed rating; the write DTOs take
//! category and genre slugs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;
use yamdb_core::{PaginationMeta, PaginationParams};

use crate::categories::Category;
use crate::genres::Genre;
use crate::ids::{CategoryId, TitleId};
use crate::validators::{validate_slug, validate_year};

/// Title row joined with its category and the aggregated rating.
#[derive(Debug, Clone, FromRow)]
pub struct TitleRow {
    pub id: TitleId,
    pub name: String,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub category_id: CategoryId,
    pub category_name: String,
    pub category_slug: String,
}

/// Genre attached to a title, as returned by the link-table join.
#[derive(Debug, Clone, FromRow)]
pub struct TitleGenreRow {
    pub title_id: TitleId,
    #[sqlx(flatten)]
    pub genre: Genre,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TitleResponse {
    pub id: TitleId,
    pub name: String,
    pub year: Option<i32>,
    /// Mean review score, `null` until the title has a review
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub genre: Vec<Genre>,
    pub category: Category,
}

impl TitleResponse {
    pub fn from_row(row: TitleRow, genre: Vec<Genre>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            year: row.year,
            rating: row.rating,
            description: row.description,
            genre,
            category: Category {
                id: row.category_id,
                name: row.category_name,
                slug: row.category_slug,
            },
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTitleDto {
    #[validate(length(min = 1, max = 256, message = "Name must be 1-256 characters"))]
    pub name: String,
    #[validate(custom(function = "validate_year"))]
    pub year: Option<i32>,
    pub description: Option<String>,
    /// Genre slugs
    #[serde(default)]
    #[validate(custom(function = "validate_slugs"))]
    pub genre: Vec<String>,
    /// Category slug
    #[validate(custom(function = "validate_slug"))]
    pub category: String,
}

/// Partial update. A present `genre` list replaces the current genres.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTitleDto {
    #[validate(length(min = 1, max = 256, message = "Name must be 1-256 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_year"))]
    pub year: Option<i32>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_slugs"))]
    pub genre: Option<Vec<String>>,
    #[validate(custom(function = "validate_slug"))]
    pub category: Option<String>,
}

fn validate_slugs(slugs: &Vec<String>) -> Result<(), validator::ValidationError> {
    slugs.iter().try_for_each(|slug| validate_slug(slug))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum TitleOrdering {
    #[default]
    #[serde(rename = "name")]
    NameAsc,
    #[serde(rename = "-name")]
    NameDesc,
    #[serde(rename = "year")]
    YearAsc,
    #[serde(rename = "-year")]
    YearDesc,
}

impl TitleOrdering {
    pub fn sql(&self) -> &'static str {
        match self {
            TitleOrdering::NameAsc => "t.name ASC, t.id ASC",
            TitleOrdering::NameDesc => "t.name DESC, t.id DESC",
            TitleOrdering::YearAsc => "t.year ASC NULLS LAST, t.id ASC",
            TitleOrdering::YearDesc => "t.year DESC NULLS LAST, t.id DESC",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TitleFilterParams {
    /// Category slug
    #[serde(default, deserialize_with = "yamdb_core::serde::deserialize_optional_trimmed")]
    pub category: Option<String>,
    /// Genre slug
    #[serde(default, deserialize_with = "yamdb_core::serde::deserialize_optional_trimmed")]
    pub genre: Option<String>,
    /// Case-insensitive substring of the name
    #[serde(default, deserialize_with = "yamdb_core::serde::deserialize_optional_trimmed")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "yamdb_core::serde::deserialize_optional_number")]
    pub year: Option<i32>,
    #[serde(default)]
    pub ordering: TitleOrdering,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedTitlesResponse {
    pub data: Vec<TitleResponse>,
    pub meta: PaginationMeta,
}
