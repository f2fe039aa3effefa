use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{obtain_token, signup};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup/", post(signup))
        .route("/auth/token/", post(obtain_token))
}
