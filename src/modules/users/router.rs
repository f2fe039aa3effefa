use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_user, delete_user, get_me, get_user, get_users, update_me, update_user};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/users/", get(get_users).post(create_user))
        .route("/users/me/", get(get_me).patch(update_me))
        .route(
            "/users/{username}/",
            get(get_user).patch(update_user).delete(delete_user),
        )
}
