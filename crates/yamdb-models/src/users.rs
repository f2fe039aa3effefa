//! User accounts and the admin/profile DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;
use yamdb_core::{PaginationMeta, PaginationParams, Role};

use crate::ids::UserId;
use crate::validators::{validate_assignable_role, validate_username};

/// Public view of an account.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    #[serde(skip_serializing)]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: Role,
}

/// Identity resolved for an authenticated request.
#[derive(Debug, Clone, FromRow)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

/// Account row with the outstanding confirmation code, used by token exchange.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub confirmation_code_hash: Option<String>,
    pub confirmation_code_expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
    #[serde(default)]
    pub bio: String,
    #[validate(custom(function = "validate_assignable_role"))]
    pub role: Option<Role>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters"),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    pub bio: Option<String>,
    #[validate(custom(function = "validate_assignable_role"))]
    pub role: Option<Role>,
}

/// Self-service profile edit. Has no `role`, so a role in the body is
/// dropped during deserialization and never reaches validation.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters"),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    pub email: Option<String>,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

impl From<UpdateProfileDto> for UpdateUserDto {
    fn from(dto: UpdateProfileDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            bio: dto.bio,
            role: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserFilterParams {
    /// Substring match on username
    #[serde(default, deserialize_with = "yamdb_core::serde::deserialize_optional_trimmed")]
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}
