use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{create_category, delete_category, get_categories};

pub fn init_categories_router() -> Router<AppState> {
    Router::new()
        .route("/categories/", get(get_categories).post(create_category))
        .route("/categories/{slug}/", delete(delete_category))
}
