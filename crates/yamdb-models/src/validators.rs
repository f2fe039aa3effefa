//! Field validators shared by the request DTOs.

use std::borrow::Cow;

use chrono::{Datelike, Utc};
use validator::ValidationError;
use yamdb_core::Role;

/// Username reserved for the `/users/me/` route.
pub const RESERVED_USERNAME: &str = "me";

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Letters, digits and `@ . + - _`, and not the reserved name `me`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.eq_ignore_ascii_case(RESERVED_USERNAME) {
        return Err(error("reserved_username", "Username 'me' is reserved"));
    }

    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if username.is_empty() || !username.chars().all(allowed) {
        return Err(error(
            "invalid_username",
            "Username may contain only letters, digits and @/./+/-/_",
        ));
    }

    Ok(())
}

/// `[-a-zA-Z0-9_]+`
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    if slug.is_empty() || !slug.chars().all(allowed) {
        return Err(error(
            "invalid_slug",
            "Slug may contain only latin letters, digits, hyphens and underscores",
        ));
    }
    Ok(())
}

/// Release year cannot be in the future.
pub fn validate_year(year: i32) -> Result<(), ValidationError> {
    if year > Utc::now().year() {
        return Err(error("future_year", "Year cannot be in the future"));
    }
    Ok(())
}

/// Only persisted roles may be assigned to accounts.
pub fn validate_assignable_role(role: &Role) -> Result<(), ValidationError> {
    if !role.is_assignable() {
        return Err(error("invalid_role", "Role must be user, moderator or admin"));
    }
    Ok(())
}
