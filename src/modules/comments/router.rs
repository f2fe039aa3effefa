use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_comment, delete_comment, get_comment, get_comments, update_comment,
};

pub fn init_comments_router() -> Router<AppState> {
    Router::new()
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments/",
            get(get_comments).post(create_comment),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments/{comment_id}/",
            get(get_comment).patch(update_comment).delete(delete_comment),
        )
}
