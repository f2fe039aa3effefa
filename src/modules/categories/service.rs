use sqlx::PgPool;
use tracing::instrument;

use yamdb_core::search::contains_pattern;
use yamdb_core::{AppError, PaginationMeta};
use yamdb_models::{CatalogFilterParams, Category, CreateCategoryDto, PaginatedCategoriesResponse};

pub struct CategoryService;

impl CategoryService {
    #[instrument(skip(db))]
    pub async fn get_categories(
        db: &PgPool,
        filters: CatalogFilterParams,
    ) -> Result<PaginatedCategoriesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let pattern = filters.search.as_deref().map(contains_pattern);

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM categories WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\\')",
        )
        .bind(&pattern)
        .fetch_one(db)
        .await?;

        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug FROM categories
             WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\\')
             ORDER BY name, id
             LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(PaginatedCategoriesResponse {
            data: categories,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn create_category(
        db: &PgPool,
        dto: CreateCategoryDto,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING id, name, slug",
        )
        .bind(&dto.name)
        .bind(&dto.slug)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if yamdb_db::is_unique_violation(&e) {
                return AppError::field("slug", "A category with this slug already exists");
            }
            AppError::from(e)
        })?;

        Ok(category)
    }

    /// Fails with 400 while titles still reference the category.
    #[instrument(skip(db))]
    pub async fn delete_category(db: &PgPool, slug: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE slug = $1")
            .bind(slug)
            .execute(db)
            .await
            .map_err(|e| {
                if yamdb_db::is_foreign_key_violation(&e) {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Category is used by titles and cannot be deleted"
                    ));
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Category not found")));
        }

        Ok(())
    }
}
