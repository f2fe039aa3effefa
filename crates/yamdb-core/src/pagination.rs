//! Pagination for list endpoints.
//!
//! Lists accept either `limit` + `offset` or `limit` + `page` (1-based).
//! When `page` is present it wins over `offset`. Responses carry a
//! [`PaginationMeta`] next to the `data` array:
//!
//! ```json
//! { "data": [...], "meta": { "total": 42, "limit": 10, "page": 2, "has_more": true } }
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::serde::deserialize_optional_number;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items matching the query
    pub total: i64,
    /// Page size that was applied
    pub limit: i64,
    /// Items skipped (offset-based requests only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Current page (page-based requests only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Whether more items follow this page
    pub has_more: bool,
}

impl PaginationMeta {
    /// Builds the metadata for a page fetched with `params` out of `total` rows.
    pub fn new(total: i64, params: &PaginationParams) -> Self {
        let limit = params.limit();
        let offset = params.offset();
        let page = params.page();

        Self {
            total,
            limit,
            offset: if page.is_some() { None } else { Some(offset) },
            page,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

/// Query parameters for pagination.
///
/// `limit` is clamped to `1..=100`, `offset` to `>= 0` and `page` to `>= 1`.
/// Offsets derived from huge pages saturate at `i64::MAX` instead of overflowing.
#[derive(Debug, Clone, Default, Hash, Deserialize, ToSchema)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub limit: Option<i64>,
    /// Number of items to skip (ignored if `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub offset: Option<i64>,
    /// Page number, 1-indexed
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub page: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        match self.page() {
            Some(page) => (page - 1).saturating_mul(self.limit()),
            None => self.offset.unwrap_or(0).max(0),
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>, page: Option<i64>) -> PaginationParams {
        PaginationParams {
            limit,
            offset,
            page,
        }
    }

    #[test]
    fn test_defaults_when_nothing_given() {
        let p = PaginationParams::default();
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.page(), None);
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(params(Some(0), None, None).limit(), 1);
        assert_eq!(params(Some(-3), None, None).limit(), 1);
        assert_eq!(params(Some(250), None, None).limit(), 100);
        assert_eq!(params(Some(25), None, None).limit(), 25);
    }

    #[test]
    fn test_negative_offset_is_zero() {
        assert_eq!(params(None, Some(-5), None).offset(), 0);
    }

    #[test]
    fn test_page_takes_precedence_over_offset() {
        let p = params(Some(20), Some(7), Some(3));
        assert_eq!(p.offset(), 40);
        assert_eq!(p.page(), Some(3));
    }

    #[test]
    fn test_page_below_one_is_first_page() {
        let p = params(Some(10), None, Some(0));
        assert_eq!(p.page(), Some(1));
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_meta_for_offset_request() {
        let meta = PaginationMeta::new(25, &params(Some(10), Some(10), None));
        assert_eq!(meta.offset, Some(10));
        assert_eq!(meta.page, None);
        assert!(meta.has_more);
    }

    #[test]
    fn test_meta_for_last_page() {
        let meta = PaginationMeta::new(25, &params(Some(10), None, Some(3)));
        assert_eq!(meta.page, Some(3));
        assert_eq!(meta.offset, None);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_meta_serialization_skips_absent_fields() {
        let meta = PaginationMeta::new(0, &params(None, None, Some(1)));
        let value = serde_json::to_value(&meta).unwrap();
        assert!(value.get("offset").is_none());
        assert_eq!(value["page"], 1);
        assert_eq!(value["has_more"], false);
    }

    #[test]
    fn test_huge_page_saturates() {
        let p: PaginationParams =
            serde_json::from_str(r#"{"page":"9223372036854775807","limit":"100"}"#).unwrap();
        assert_eq!(p.offset(), i64::MAX);

        let meta = PaginationMeta::new(0, &p);
        assert_eq!(meta.page, Some(i64::MAX));
        assert!(!meta.has_more);
    }

    #[test]
    fn test_huge_offset_saturates() {
        let p: PaginationParams =
            serde_json::from_str(r#"{"offset":"9223372036854775807"}"#).unwrap();
        let meta = PaginationMeta::new(5, &p);
        assert_eq!(meta.offset, Some(i64::MAX));
        assert!(!meta.has_more);
    }

    #[test]
    fn test_params_from_query_strings() {
        let p: PaginationParams =
            serde_json::from_str(r#"{"limit":"5","page":"","offset":"15"}"#).unwrap();
        assert_eq!(p.limit(), 5);
        assert_eq!(p.page(), None);
        assert_eq!(p.offset(), 15);
    }
}
