//! Admin account bootstrap.
//!
//! The API never grants the admin role to self-registered accounts, so the
//! first admin is created (or an existing account promoted) from here.

use sqlx::PgPool;
use validator::Validate;
use yamdb_models::{SignupRequest, UserId};

/// Creates `username` as an admin, or promotes the existing account.
///
/// Fails if the email already belongs to a different username.
pub async fn create_or_promote_admin(
    db: &PgPool,
    username: &str,
    email: &str,
) -> Result<UserId, Box<dyn std::error::Error>> {
    SignupRequest {
        username: username.to_string(),
        email: email.to_string(),
    }
    .validate()?;

    let id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (username, email, role)
         VALUES ($1, $2, 'admin')
         ON CONFLICT (username) DO UPDATE SET role = 'admin', updated_at = NOW()
         RETURNING id",
    )
    .bind(username)
    .bind(email)
    .fetch_one(db)
    .await
    .map_err(|e| -> Box<dyn std::error::Error> {
        if yamdb_db::unique_violation(&e) == Some("users_email_key") {
            return format!("email {} is already used by another account", email).into();
        }
        e.into()
    })?;

    Ok(id)
}
