use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;
use yamdb_core::PaginationMeta;

use crate::ids::GenreId;
use crate::validators::validate_slug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Genre {
    #[serde(skip_serializing)]
    pub id: GenreId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGenreDto {
    #[validate(length(min = 1, max = 256, message = "Name must be 1-256 characters"))]
    pub name: String,
    #[validate(
        length(min = 1, max = 50, message = "Slug must be 1-50 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedGenresResponse {
    pub data: Vec<Genre>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_genre_validation() {
        let valid = CreateGenreDto {
            name: "Drama".to_string(),
            slug: "drama".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateGenreDto {
            name: String::new(),
            slug: "drama".to_string(),
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_genre_serializes_name_and_slug() {
        let genre = Genre {
            id: GenreId(3),
            name: "Drama".to_string(),
            slug: "drama".to_string(),
        };
        let value = serde_json::to_value(&genre).unwrap();
        assert_eq!(value, serde_json::json!({"name": "Drama", "slug": "drama"}));
    }
}
