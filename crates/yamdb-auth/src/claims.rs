use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use yamdb_core::Role;

/// JWT claims for access tokens.
///
/// The role is informational only: request authorization always reloads the
/// user record, so a demoted user loses privileges before the token expires.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub username: String,
    pub role: Role,
    /// Expiration timestamp
    pub exp: usize,
    /// Issued-at timestamp
    pub iat: usize,
}

impl Claims {
    /// Numeric user id carried in `sub`.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
