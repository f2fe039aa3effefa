use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_review, delete_review, get_review, get_reviews, update_review};

pub fn init_reviews_router() -> Router<AppState> {
    Router::new()
        .route(
            "/titles/{title_id}/reviews/",
            get(get_reviews).post(create_review),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}/",
            get(get_review).patch(update_review).delete(delete_review),
        )
}
