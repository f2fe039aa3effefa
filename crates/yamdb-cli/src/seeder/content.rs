//! Review and comment seeding.

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use rand::Rng;
use rand::seq::SliceRandom;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;
use yamdb_models::{ReviewId, TitleId, UserId};

/// Each title gets up to `per_title` reviews from distinct authors.
pub async fn seed_reviews(
    db: &PgPool,
    title_ids: &[TitleId],
    author_ids: &[UserId],
    per_title: usize,
) -> Result<Vec<ReviewId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("⭐ Seeding up to {} reviews per title...", per_title);

    let reviews: Vec<(TitleId, UserId, String, i16)> = {
        let mut rng = rand::thread_rng();
        let pairs: Vec<(TitleId, UserId)> = title_ids
            .iter()
            .flat_map(|title_id| {
                author_ids
                    .choose_multiple(&mut rng, per_title)
                    .map(|author_id| (*title_id, *author_id))
                    .collect::<Vec<_>>()
            })
            .collect();

        pairs
            .into_iter()
            .map(|(title_id, author_id)| {
                let text: String = Paragraph(1..4).fake();
                (title_id, author_id, text, rng.gen_range(1..=10))
            })
            .collect()
    };

    let mut tx = db.begin().await?;
    let mut all_ids = Vec::with_capacity(reviews.len());

    // 4 params per review
    const BATCH_SIZE: usize = 1000;

    for chunk in reviews.chunks(BATCH_SIZE) {
        let mut query =
            QueryBuilder::<Postgres>::new("INSERT INTO reviews (title_id, author_id, text, score) ");
        query.push_values(chunk, |mut row, (title_id, author_id, text, score)| {
            row.push_bind(*title_id)
                .push_bind(*author_id)
                .push_bind(text)
                .push_bind(*score);
        });
        query.push(" ON CONFLICT (title_id, author_id) DO NOTHING RETURNING id");

        let ids: Vec<ReviewId> = query.build_query_scalar().fetch_all(&mut *tx).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} reviews in {:?}",
        all_ids.len(),
        start_time.elapsed()
    );

    Ok(all_ids)
}

pub async fn seed_comments(
    db: &PgPool,
    review_ids: &[ReviewId],
    author_ids: &[UserId],
    per_review: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("💬 Seeding {} comments per review...", per_review);

    let comments: Vec<(ReviewId, UserId, String)> = {
        let mut rng = rand::thread_rng();
        review_ids
            .iter()
            .flat_map(|review_id| std::iter::repeat_n(*review_id, per_review))
            .filter_map(|review_id| {
                let author_id = *author_ids.choose(&mut rng)?;
                Some((review_id, author_id, Sentence(3..12).fake::<String>()))
            })
            .collect()
    };

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    // 3 params per comment
    const BATCH_SIZE: usize = 1000;

    for chunk in comments.chunks(BATCH_SIZE) {
        let mut query =
            QueryBuilder::<Postgres>::new("INSERT INTO comments (review_id, author_id, text) ");
        query.push_values(chunk, |mut row, (review_id, author_id, text)| {
            row.push_bind(*review_id)
                .push_bind(*author_id)
                .push_bind(text);
        });
        inserted += query.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} comments in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}
