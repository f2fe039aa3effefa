use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use yamdb_auth::verify_token;
use yamdb_core::{AppError, Role};
use yamdb_models::{CurrentUser, UserId};

use crate::modules::users::service::UserService;
use crate::state::AppState;

/// The authenticated caller.
///
/// Extraction verifies the bearer token and then reloads the account, so a
/// deleted user is rejected and a changed role takes effect immediately.
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentUser);

impl AuthUser {
    pub fn id(&self) -> UserId {
        self.0.id
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                AppError::unauthorized("Authentication credentials were not provided")
            })?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;
        let user_id = claims
            .user_id()
            .map(UserId)
            .ok_or_else(|| AppError::unauthorized("Invalid user ID in token"))?;

        let user = UserService::find_current_user(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found"))?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let auth_user = AuthUser(CurrentUser {
            id: UserId(7),
            username: "critic".to_string(),
            role: Role::Moderator,
        });

        assert_eq!(auth_user.id(), UserId(7));
        assert_eq!(auth_user.username(), "critic");
        assert_eq!(auth_user.role(), Role::Moderator);
    }
}
