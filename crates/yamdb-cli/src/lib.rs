//! # YaMDb CLI
//!
//! Administration and database seeding utilities for YaMDb development.
//!
//! ## Usage
//!
//! ```ignore
//! use yamdb_cli::seeder::{seed_all, SeedConfig};
//!
//! seed_all(&pool, SeedConfig::default()).await?;
//! ```

pub mod admin;
pub mod seeder;
