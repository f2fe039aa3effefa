use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{create_genre, delete_genre, get_genres};

pub fn init_genres_router() -> Router<AppState> {
    Router::new()
        .route("/genres/", get(get_genres).post(create_genre))
        .route("/genres/{slug}/", delete(delete_genre))
}
