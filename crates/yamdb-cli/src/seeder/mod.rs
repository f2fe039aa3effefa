//! Fake data for local development.
//!
//! Seeded rows are marked (see [`models::SEED_EMAIL_DOMAIN`] and
//! [`models::SEED_SLUG_PREFIX`]) so [`clear_seed`] removes only them.

pub mod catalog;
pub mod content;
pub mod models;
pub mod users;

use sqlx::PgPool;
use std::time::Instant;

pub use models::SeedConfig;

/// Seeds users, categories, genres, titles, reviews and comments.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Seeding database with {:?}\n", config);

    let user_ids = users::seed_users(db, config.users).await?;
    let category_ids = catalog::seed_categories(db, config.categories).await?;
    let genre_ids = catalog::seed_genres(db, config.genres).await?;
    let title_ids = catalog::seed_titles(db, config.titles, &category_ids, &genre_ids).await?;
    let review_ids =
        content::seed_reviews(db, &title_ids, &user_ids, config.reviews_per_title).await?;
    content::seed_comments(db, &review_ids, &user_ids, config.comments_per_review).await?;

    println!("\n✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(())
}

/// Removes seeded accounts and catalog entries along with everything under them.
pub async fn clear_seed(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    println!("🧹 Clearing seeded data...");

    let catalog_rows = catalog::clear_catalog(db).await?;
    let user_rows = users::clear_users(db).await?;

    println!(
        "   ✓ Removed {} catalog rows and {} users",
        catalog_rows, user_rows
    );
    Ok(())
}
