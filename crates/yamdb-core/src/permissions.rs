//! Role hierarchy and access policy.
//!
//! Every authorization decision in the API goes through the pure functions in
//! this module. Handlers pass in the requester's role (loaded from the stored
//! user record, never from the request body), the kind of resource and
//! whether the request reads or writes. Object-level checks additionally
//! take whether the requester authored the object.
//!
//! | Resource                 | Read   | Write                      |
//! |--------------------------|--------|----------------------------|
//! | Category, Genre, Title   | anyone | admin                      |
//! | Review, Comment (create) | anyone | any authenticated user     |
//! | Review, Comment (object) | anyone | author, moderator or admin |
//! | User accounts            | admin  | admin                      |

use std::fmt;

use axum::http::Method;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;

/// Requester role, ordered by privilege.
///
/// `Anonymous` is never persisted; it is the role of a request without a
/// valid token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
    sqlx::Type,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Anonymous,
    User,
    Moderator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "anonymous",
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    /// Whether this role may be stored on a user record.
    pub fn is_assignable(&self) -> bool {
        *self != Role::Anonymous
    }

    pub fn at_least(&self, minimum: Role) -> bool {
        *self >= minimum
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anonymous" => Ok(Role::Anonymous),
            "user" => Ok(Role::User),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    pub fn from_method(method: &Method) -> Self {
        if *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS {
            Access::Read
        } else {
            Access::Write
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Category,
    Genre,
    Title,
    Review,
    Comment,
    User,
}

impl Resource {
    /// Lowest role allowed to read this resource.
    pub fn minimum_read_role(&self) -> Role {
        match self {
            Resource::User => Role::Admin,
            _ => Role::Anonymous,
        }
    }

    /// Lowest role allowed to create this resource.
    pub fn minimum_write_role(&self) -> Role {
        match self {
            Resource::Review | Resource::Comment => Role::User,
            _ => Role::Admin,
        }
    }

    /// Whether authors may edit and delete their own objects.
    pub fn is_authored(&self) -> bool {
        matches!(self, Resource::Review | Resource::Comment)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Category => "category",
            Resource::Genre => "genre",
            Resource::Title => "title",
            Resource::Review => "review",
            Resource::Comment => "comment",
            Resource::User => "user",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Unauthenticated,
    Forbidden,
}

impl Decision {
    fn require(role: Role, minimum: Role) -> Self {
        if role.at_least(minimum) {
            Decision::Allow
        } else if role == Role::Anonymous {
            Decision::Unauthenticated
        } else {
            Decision::Forbidden
        }
    }

    pub fn is_allowed(&self) -> bool {
        *self == Decision::Allow
    }

    /// Converts a denial into the matching 401/403 error.
    pub fn into_result(self, resource: Resource) -> Result<(), AppError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Unauthenticated => Err(AppError::unauthorized(
                "Authentication credentials were not provided",
            )),
            Decision::Forbidden => Err(AppError::forbidden(format!(
                "You do not have permission to modify this {}",
                resource.name()
            ))),
        }
    }
}

/// Decides a collection-level request (list or create).
pub fn authorize_collection(role: Role, resource: Resource, access: Access) -> Decision {
    let minimum = match access {
        Access::Read => resource.minimum_read_role(),
        Access::Write => resource.minimum_write_role(),
    };
    Decision::require(role, minimum)
}

/// Decides a request against a single existing object.
///
/// Authored resources can be changed by their author or by a moderator or
/// admin; everything else follows the collection rule.
pub fn authorize_object(
    role: Role,
    is_author: bool,
    resource: Resource,
    access: Access,
) -> Decision {
    if access == Access::Read || !resource.is_authored() {
        return authorize_collection(role, resource, access);
    }

    if role == Role::Anonymous {
        Decision::Unauthenticated
    } else if is_author || role.at_least(Role::Moderator) {
        Decision::Allow
    } else {
        Decision::Forbidden
    }
}
