//! Seed records and seeding configuration.

use yamdb_core::Role;
use yamdb_models::{CategoryId, GenreId};

/// Seeded accounts use this email domain so they can be cleared later.
pub const SEED_EMAIL_DOMAIN: &str = "seed.yamdb.local";

/// Seeded categories and genres carry this slug prefix.
pub const SEED_SLUG_PREFIX: &str = "seed-";

pub struct UserSeed {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: Role,
}

/// A category or genre.
pub struct CatalogSeed {
    pub name: String,
    pub slug: String,
}

pub struct TitleSeed {
    pub name: String,
    pub year: i32,
    pub description: String,
    pub category_id: CategoryId,
    pub genre_ids: Vec<GenreId>,
}

/// How much data a full seed run generates.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub users: usize,
    pub categories: usize,
    pub genres: usize,
    pub titles: usize,
    pub reviews_per_title: usize,
    pub comments_per_review: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 50,
            categories: 3,
            genres: 8,
            titles: 40,
            reviews_per_title: 5,
            comments_per_review: 2,
        }
    }
}
