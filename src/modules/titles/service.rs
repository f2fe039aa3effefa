use std::collections::{BTreeSet, HashMap};

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use yamdb_core::search::contains_pattern;
use yamdb_core::{AppError, PaginationMeta};
use yamdb_models::titles::{TitleGenreRow, TitleRow};
use yamdb_models::{
    CategoryId, CreateTitleDto, Genre, GenreId, PaginatedTitlesResponse, TitleFilterParams,
    TitleId, TitleResponse, UpdateTitleDto,
};

/// Title joined with its category; `rating` is the mean score of its reviews.
const TITLE_SELECT: &str = "SELECT t.id, t.name, t.year, t.description,
        (SELECT AVG(r.score)::float8 FROM reviews r WHERE r.title_id = t.id) AS rating,
        c.id AS category_id, c.name AS category_name, c.slug AS category_slug
    FROM titles t
    JOIN categories c ON c.id = t.category_id";

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &TitleFilterParams) {
    builder.push(" WHERE TRUE");

    if let Some(category) = &filters.category {
        builder.push(" AND c.slug = ").push_bind(category.clone());
    }
    if let Some(genre) = &filters.genre {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM title_genres tg JOIN genres g ON g.id = tg.genre_id \
                 WHERE tg.title_id = t.id AND g.slug = ",
            )
            .push_bind(genre.clone())
            .push(")");
    }
    if let Some(name) = &filters.name {
        builder
            .push(" AND t.name ILIKE ")
            .push_bind(contains_pattern(name))
            .push(" ESCAPE '\\'");
    }
    if let Some(year) = filters.year {
        builder.push(" AND t.year = ").push_bind(year);
    }
}

pub struct TitleService;

impl TitleService {
    #[instrument(skip(db))]
    pub async fn get_titles(
        db: &PgPool,
        filters: TitleFilterParams,
    ) -> Result<PaginatedTitlesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut count_query = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM titles t JOIN categories c ON c.id = t.category_id",
        );
        push_filters(&mut count_query, &filters);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(db)
            .await?;

        let mut data_query = QueryBuilder::<Postgres>::new(TITLE_SELECT);
        push_filters(&mut data_query, &filters);
        data_query
            .push(" ORDER BY ")
            .push(filters.ordering.sql())
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let rows = data_query
            .build_query_as::<TitleRow>()
            .fetch_all(db)
            .await?;

        let ids: Vec<TitleId> = rows.iter().map(|row| row.id).collect();
        let mut genres = Self::load_genres(db, &ids).await?;

        let data = rows
            .into_iter()
            .map(|row| {
                let genre = genres.remove(&row.id).unwrap_or_default();
                TitleResponse::from_row(row, genre)
            })
            .collect();

        Ok(PaginatedTitlesResponse {
            data,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_title(db: &PgPool, id: TitleId) -> Result<TitleResponse, AppError> {
        let row = sqlx::query_as::<_, TitleRow>(&format!("{TITLE_SELECT} WHERE t.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Title not found")))?;

        let genre = Self::load_genres(db, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();

        Ok(TitleResponse::from_row(row, genre))
    }

    /// 404 unless the title exists.
    #[instrument(skip(db))]
    pub async fn ensure_exists(db: &PgPool, id: TitleId) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM titles WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Title not found")));
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn create_title(db: &PgPool, dto: CreateTitleDto) -> Result<TitleResponse, AppError> {
        let mut tx = db.begin().await?;

        let category_id = resolve_category(&mut tx, &dto.category).await?;
        let genre_ids = resolve_genres(&mut tx, &dto.genre).await?;

        let id = sqlx::query_scalar::<_, TitleId>(
            "INSERT INTO titles (name, year, description, category_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&dto.name)
        .bind(dto.year)
        .bind(&dto.description)
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await?;

        link_genres(&mut tx, id, &genre_ids).await?;

        tx.commit().await?;

        Self::get_title(db, id).await
    }

    /// Partial update. A present genre list replaces the title's genres.
    #[instrument(skip(db))]
    pub async fn update_title(
        db: &PgPool,
        id: TitleId,
        dto: UpdateTitleDto,
    ) -> Result<TitleResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct Existing {
            name: String,
            year: Option<i32>,
            description: Option<String>,
            category_id: CategoryId,
        }

        let mut tx = db.begin().await?;

        let existing = sqlx::query_as::<_, Existing>(
            "SELECT name, year, description, category_id FROM titles WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Title not found")))?;

        let category_id = match &dto.category {
            Some(slug) => resolve_category(&mut tx, slug).await?,
            None => existing.category_id,
        };

        sqlx::query(
            "UPDATE titles
             SET name = $1, year = $2, description = $3, category_id = $4
             WHERE id = $5",
        )
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.year.or(existing.year))
        .bind(dto.description.or(existing.description))
        .bind(category_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(slugs) = &dto.genre {
            let genre_ids = resolve_genres(&mut tx, slugs).await?;
            sqlx::query("DELETE FROM title_genres WHERE title_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            link_genres(&mut tx, id, &genre_ids).await?;
        }

        tx.commit().await?;

        Self::get_title(db, id).await
    }

    /// Reviews and their comments go with the title.
    #[instrument(skip(db))]
    pub async fn delete_title(db: &PgPool, id: TitleId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Title not found")));
        }

        Ok(())
    }

    async fn load_genres(
        db: &PgPool,
        ids: &[TitleId],
    ) -> Result<HashMap<TitleId, Vec<Genre>>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        let rows = sqlx::query_as::<_, TitleGenreRow>(
            "SELECT tg.title_id, g.id, g.name, g.slug
             FROM title_genres tg
             JOIN genres g ON g.id = tg.genre_id
             WHERE tg.title_id = ANY($1)
             ORDER BY g.name, g.id",
        )
        .bind(raw_ids)
        .fetch_all(db)
        .await?;

        let mut genres: HashMap<TitleId, Vec<Genre>> = HashMap::new();
        for row in rows {
            genres.entry(row.title_id).or_default().push(row.genre);
        }
        Ok(genres)
    }
}

async fn resolve_category(conn: &mut PgConnection, slug: &str) -> Result<CategoryId, AppError> {
    sqlx::query_scalar::<_, CategoryId>("SELECT id FROM categories WHERE slug = $1")
        .bind(slug)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::field("category", format!("Category '{}' does not exist", slug)))
}

/// Maps genre slugs to ids; every slug must exist.
async fn resolve_genres(conn: &mut PgConnection, slugs: &[String]) -> Result<Vec<GenreId>, AppError> {
    let requested: BTreeSet<&str> = slugs.iter().map(String::as_str).collect();
    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let found = sqlx::query_as::<_, Genre>("SELECT id, name, slug FROM genres WHERE slug = ANY($1)")
        .bind(requested.iter().map(|s| s.to_string()).collect::<Vec<_>>())
        .fetch_all(conn)
        .await?;

    if found.len() < requested.len() {
        let missing = requested
            .iter()
            .filter(|slug| !found.iter().any(|g| g.slug == **slug))
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::field(
            "genre",
            format!("Genre does not exist: {}", missing),
        ));
    }

    Ok(found.into_iter().map(|g| g.id).collect())
}

async fn link_genres(
    conn: &mut PgConnection,
    title_id: TitleId,
    genre_ids: &[GenreId],
) -> Result<(), AppError> {
    if genre_ids.is_empty() {
        return Ok(());
    }

    let raw_ids: Vec<i64> = genre_ids.iter().map(|id| id.into_inner()).collect();
    sqlx::query(
        "INSERT INTO title_genres (title_id, genre_id)
         SELECT $1, UNNEST($2::bigint[])
         ON CONFLICT DO NOTHING",
    )
    .bind(title_id)
    .bind(raw_ids)
    .execute(conn)
    .await?;

    Ok(())
}
