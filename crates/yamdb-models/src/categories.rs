use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;
use yamdb_core::{PaginationMeta, PaginationParams};

use crate::ids::CategoryId;
use crate::validators::validate_slug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Category {
    #[serde(skip_serializing)]
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 256, message = "Name must be 1-256 characters"))]
    pub name: String,
    #[validate(
        length(min = 1, max = 50, message = "Slug must be 1-50 characters"),
        custom(function = "validate_slug")
    )]
    pub slug: String,
}

/// `?search=` matches the name, case-insensitively.
#[derive(Debug, Deserialize)]
pub struct CatalogFilterParams {
    #[serde(default, deserialize_with = "yamdb_core::serde::deserialize_optional_trimmed")]
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCategoriesResponse {
    pub data: Vec<Category>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_category_validation() {
        let valid = CreateCategoryDto {
            name: "Films".to_string(),
            slug: "films".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_slug = CreateCategoryDto {
            name: "Films".to_string(),
            slug: "feature films".to_string(),
        };
        assert!(bad_slug.validate().is_err());

        let long_slug = CreateCategoryDto {
            name: "Films".to_string(),
            slug: "f".repeat(51),
        };
        assert!(long_slug.validate().is_err());
    }

    #[test]
    fn test_search_param_blank_is_none() {
        let params: CatalogFilterParams = serde_json::from_str(r#"{"search":"  "}"#).unwrap();
        assert_eq!(params.search, None);
    }
}
