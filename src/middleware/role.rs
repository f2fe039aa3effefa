//! Role-based authorization on top of [`AuthUser`].
//!
//! Collection-level rules are enforced by extractors generated with
//! [`require_access!`]; object-level rules (author or moderator) are checked
//! in handlers with [`authorize_object`] once the object has been loaded.

use axum::http::Method;
use yamdb_core::permissions::{self, Access, Resource};
use yamdb_core::AppError;
use yamdb_models::UserId;

use crate::middleware::auth::AuthUser;

/// Defines an extractor that authenticates the caller and applies the
/// collection rule for `$resource` to the request method.
#[macro_export]
macro_rules! require_access {
    ($name:ident, $resource:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = yamdb_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::middleware::role::authorize_collection(
                    &auth_user,
                    $resource,
                    &parts.method,
                )?;

                Ok($name(auth_user))
            }
        }
    };
}

require_access!(RequireCategoryWrite, Resource::Category);
require_access!(RequireGenreWrite, Resource::Genre);
require_access!(RequireTitleWrite, Resource::Title);
require_access!(RequireReviewWrite, Resource::Review);
require_access!(RequireCommentWrite, Resource::Comment);
require_access!(RequireAdmin, Resource::User);

pub fn authorize_collection(
    auth_user: &AuthUser,
    resource: Resource,
    method: &Method,
) -> Result<(), AppError> {
    let decision =
        permissions::authorize_collection(auth_user.role(), resource, Access::from_method(method));
    if !decision.is_allowed() {
        tracing::warn!(
            user = %auth_user.username(),
            role = %auth_user.role(),
            resource = resource.name(),
            %method,
            "Access denied"
        );
    }
    decision.into_result(resource)
}

/// Object-level check for an existing object written by `author_id`.
pub fn authorize_object(
    auth_user: &AuthUser,
    resource: Resource,
    author_id: UserId,
    method: &Method,
) -> Result<(), AppError> {
    let decision = permissions::authorize_object(
        auth_user.role(),
        auth_user.id() == author_id,
        resource,
        Access::from_method(method),
    );
    if !decision.is_allowed() {
        tracing::warn!(
            user = %auth_user.username(),
            role = %auth_user.role(),
            resource = resource.name(),
            %method,
            "Access denied"
        );
    }
    decision.into_result(resource)
}
