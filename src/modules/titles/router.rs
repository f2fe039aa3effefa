use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_title, delete_title, get_title, get_titles, update_title};

pub fn init_titles_router() -> Router<AppState> {
    Router::new()
        .route("/titles/", get(get_titles).post(create_title))
        .route(
            "/titles/{title_id}/",
            get(get_title).patch(update_title).delete(delete_title),
        )
}
