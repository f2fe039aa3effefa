//! Category, genre and title seeding.

use chrono::{Datelike, Utc};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Words};
use rand::Rng;
use rand::seq::SliceRandom;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;
use yamdb_models::{CategoryId, GenreId, TitleId};

use super::models::{CatalogSeed, SEED_SLUG_PREFIX, TitleSeed};

const CATEGORY_NAMES: &[&str] = &["Films", "Books", "Music", "Series", "Games", "Podcasts"];

const GENRE_NAMES: &[&str] = &[
    "Drama", "Comedy", "Thriller", "Fantasy", "Documentary", "Rock", "Jazz", "Classic",
    "Horror", "Romance", "Detective", "Sci-Fi",
];

/// Names cycle through `names`; repeats get a numeric suffix so slugs stay unique.
pub fn generate_catalog(names: &[&str], count: usize) -> Vec<CatalogSeed> {
    (0..count)
        .map(|idx| {
            let base = names[idx % names.len()];
            let round = idx / names.len();
            let name = if round == 0 {
                base.to_string()
            } else {
                format!("{} {}", base, round + 1)
            };
            let slug = format!(
                "{}{}",
                SEED_SLUG_PREFIX,
                name.to_lowercase().replace(' ', "-")
            );
            CatalogSeed { name, slug }
        })
        .collect()
}

pub fn generate_titles(
    count: usize,
    category_ids: &[CategoryId],
    genre_ids: &[GenreId],
) -> Vec<TitleSeed> {
    let mut rng = rand::thread_rng();
    let current_year = Utc::now().year();

    (0..count)
        .filter_map(|_| {
            let category_id = *category_ids.choose(&mut rng)?;
            let words: Vec<String> = Words(1..4).fake();
            let genre_count = rng.gen_range(1..=3).min(genre_ids.len());

            Some(TitleSeed {
                name: capitalize(&words.join(" ")),
                year: rng.gen_range(1920..=current_year),
                description: Paragraph(1..3).fake(),
                category_id,
                genre_ids: genre_ids
                    .choose_multiple(&mut rng, genre_count)
                    .copied()
                    .collect(),
            })
        })
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Inserts seed categories and returns the ids of every seeded category.
pub async fn seed_categories(
    db: &PgPool,
    count: usize,
) -> Result<Vec<CategoryId>, Box<dyn std::error::Error>> {
    println!("🗂  Seeding {} categories...", count);
    let seeds = generate_catalog(CATEGORY_NAMES, count);
    insert_catalog(db, "categories", &seeds).await?;

    let ids = sqlx::query_scalar::<_, CategoryId>("SELECT id FROM categories WHERE slug LIKE $1")
        .bind(format!("{}%", SEED_SLUG_PREFIX))
        .fetch_all(db)
        .await?;
    Ok(ids)
}

pub async fn seed_genres(
    db: &PgPool,
    count: usize,
) -> Result<Vec<GenreId>, Box<dyn std::error::Error>> {
    println!("🏷  Seeding {} genres...", count);
    let seeds = generate_catalog(GENRE_NAMES, count);
    insert_catalog(db, "genres", &seeds).await?;

    let ids = sqlx::query_scalar::<_, GenreId>("SELECT id FROM genres WHERE slug LIKE $1")
        .bind(format!("{}%", SEED_SLUG_PREFIX))
        .fetch_all(db)
        .await?;
    Ok(ids)
}

async fn insert_catalog(
    db: &PgPool,
    table: &'static str,
    seeds: &[CatalogSeed],
) -> Result<(), Box<dyn std::error::Error>> {
    if seeds.is_empty() {
        return Ok(());
    }

    let mut query = QueryBuilder::<Postgres>::new(format!("INSERT INTO {} (name, slug) ", table));
    query.push_values(seeds, |mut row, seed| {
        row.push_bind(&seed.name).push_bind(&seed.slug);
    });
    query.push(" ON CONFLICT (slug) DO NOTHING");
    query.build().execute(db).await?;

    Ok(())
}

pub async fn seed_titles(
    db: &PgPool,
    count: usize,
    category_ids: &[CategoryId],
    genre_ids: &[GenreId],
) -> Result<Vec<TitleId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🎬 Seeding {} titles...", count);

    let titles = generate_titles(count, category_ids, genre_ids);
    let mut tx = db.begin().await?;
    let mut all_ids = Vec::with_capacity(titles.len());

    // 4 params per title
    const BATCH_SIZE: usize = 1000;

    for chunk in titles.chunks(BATCH_SIZE) {
        let mut query =
            QueryBuilder::<Postgres>::new("INSERT INTO titles (name, year, description, category_id) ");
        query.push_values(chunk, |mut row, title| {
            row.push_bind(&title.name)
                .push_bind(title.year)
                .push_bind(&title.description)
                .push_bind(title.category_id);
        });
        query.push(" RETURNING id");
        let ids: Vec<TitleId> = query.build_query_scalar().fetch_all(&mut *tx).await?;

        let links: Vec<(TitleId, GenreId)> = ids
            .iter()
            .zip(chunk)
            .flat_map(|(id, title)| title.genre_ids.iter().map(move |genre| (*id, *genre)))
            .collect();
        if !links.is_empty() {
            let mut link_query =
                QueryBuilder::<Postgres>::new("INSERT INTO title_genres (title_id, genre_id) ");
            link_query.push_values(&links, |mut row, (title_id, genre_id)| {
                row.push_bind(*title_id).push_bind(*genre_id);
            });
            link_query.push(" ON CONFLICT DO NOTHING");
            link_query.build().execute(&mut *tx).await?;
        }

        all_ids.extend(ids);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} titles in {:?}",
        all_ids.len(),
        start_time.elapsed()
    );

    Ok(all_ids)
}

/// Deletes titles in seeded categories, then the seeded categories and genres.
pub async fn clear_catalog(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let pattern = format!("{}%", SEED_SLUG_PREFIX);
    let mut tx = db.begin().await?;

    let titles = sqlx::query(
        "DELETE FROM titles WHERE category_id IN (SELECT id FROM categories WHERE slug LIKE $1)",
    )
    .bind(&pattern)
    .execute(&mut *tx)
    .await?;
    let categories = sqlx::query("DELETE FROM categories WHERE slug LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?;
    let genres = sqlx::query("DELETE FROM genres WHERE slug LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(titles.rows_affected() + categories.rows_affected() + genres.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_slugs_are_unique_and_prefixed() {
        let seeds = generate_catalog(&["Films", "Sci Fi"], 5);
        let slugs: Vec<&str> = seeds.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec![
                "seed-films",
                "seed-sci-fi",
                "seed-films-2",
                "seed-sci-fi-2",
                "seed-films-3"
            ]
        );
        for seed in &seeds {
            assert!(yamdb_models::validators::validate_slug(&seed.slug).is_ok());
        }
    }

    #[test]
    fn test_titles_need_a_category() {
        assert!(generate_titles(3, &[], &[GenreId(1)]).is_empty());

        let titles = generate_titles(3, &[CategoryId(1)], &[GenreId(1), GenreId(2)]);
        assert_eq!(titles.len(), 3);
        for title in &titles {
            assert!(!title.genre_ids.is_empty() && title.genre_ids.len() <= 2);
            assert!(title.year <= Utc::now().year());
        }
    }
}
