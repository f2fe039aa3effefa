//! Account seeding.

use fake::Fake;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;
use yamdb_core::Role;
use yamdb_models::UserId;

use super::models::{SEED_EMAIL_DOMAIN, UserSeed};

/// Every tenth seeded account is a moderator.
const MODERATOR_EVERY: usize = 10;

pub fn generate_users(count: usize) -> Vec<UserSeed> {
    let mut rng = rand::thread_rng();

    (0..count)
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let handle: String = format!("{}.{}", first_name, last_name)
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
                .collect::<String>()
                .to_lowercase();
            let username = format!("{}{}", handle, rng.gen_range(100..100_000));

            UserSeed {
                email: format!("{}@{}", username, SEED_EMAIL_DOMAIN),
                username,
                first_name,
                last_name,
                bio: Sentence(4..10).fake(),
                role: if (idx + 1) % MODERATOR_EVERY == 0 {
                    Role::Moderator
                } else {
                    Role::User
                },
            }
        })
        .collect()
}

pub async fn seed_users(
    db: &PgPool,
    count: usize,
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", count);

    let users = generate_users(count);
    let ids = insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts users in batches; name collisions are skipped.
pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    // 6 params per user
    const BATCH_SIZE: usize = 1000;

    let mut tx = db.begin().await?;
    let mut all_ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO users (username, email, first_name, last_name, bio, role) ",
        );
        query.push_values(chunk, |mut row, user| {
            row.push_bind(&user.username)
                .push_bind(&user.email)
                .push_bind(&user.first_name)
                .push_bind(&user.last_name)
                .push_bind(&user.bio)
                .push_bind(user.role);
        });
        query.push(" ON CONFLICT DO NOTHING RETURNING id");

        let ids: Vec<UserId> = query.build_query_scalar().fetch_all(&mut *tx).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;
    Ok(all_ids)
}

/// Deletes seeded accounts; their reviews and comments cascade.
pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}
