use sqlx::PgPool;
use tracing::instrument;

use yamdb_core::search::contains_pattern;
use yamdb_core::{AppError, PaginationMeta};
use yamdb_models::{CatalogFilterParams, CreateGenreDto, Genre, PaginatedGenresResponse};

pub struct GenreService;

impl GenreService {
    #[instrument(skip(db))]
    pub async fn get_genres(
        db: &PgPool,
        filters: CatalogFilterParams,
    ) -> Result<PaginatedGenresResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let pattern = filters.search.as_deref().map(contains_pattern);

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM genres WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\\')",
        )
        .bind(&pattern)
        .fetch_one(db)
        .await?;

        let genres = sqlx::query_as::<_, Genre>(
            "SELECT id, name, slug FROM genres
             WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\\')
             ORDER BY name, id
             LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(PaginatedGenresResponse {
            data: genres,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn create_genre(db: &PgPool, dto: CreateGenreDto) -> Result<Genre, AppError> {
        let genre = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (name, slug) VALUES ($1, $2) RETURNING id, name, slug",
        )
        .bind(&dto.name)
        .bind(&dto.slug)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if yamdb_db::is_unique_violation(&e) {
                return AppError::field("slug", "A genre with this slug already exists");
            }
            AppError::from(e)
        })?;

        Ok(genre)
    }

    /// Titles keep existing; only their link to the genre goes away.
    #[instrument(skip(db))]
    pub async fn delete_genre(db: &PgPool, slug: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM genres WHERE slug = $1")
            .bind(slug)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Genre not found")));
        }

        Ok(())
    }
}
