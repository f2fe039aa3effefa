//! Request extractors for authentication and authorization.
//!
//! - [`auth`]: [`auth::AuthUser`] validates the bearer token and loads the
//!   caller's account, so the role used for decisions is always the stored one
//! - [`role`]: extractors and helpers that apply the access policy from
//!   `yamdb_core::permissions`
//!
//! ```ignore
//! use crate::middleware::role::RequireTitleWrite;
//!
//! // 401 without a token, 403 for non-admins
//! async fn create_title(RequireTitleWrite(auth_user): RequireTitleWrite) { /* ... */ }
//! ```

pub mod auth;
pub mod role;
