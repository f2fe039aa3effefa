//! # YaMDb Core
//!
//! Foundational types shared by every crate in the workspace:
//!
//! - [`errors`]: [`AppError`] and its HTTP response conversion
//! - [`pagination`]: limit/offset/page query parameters and response metadata
//! - [`permissions`]: the [`Role`] hierarchy and the access policy
//! - [`search`]: escaped `ILIKE` patterns
//! - [`serde`]: query-string friendly deserializers
//!
//! ```ignore
//! use yamdb_core::permissions::{Access, Resource, authorize_collection};
//! use yamdb_core::Role;
//!
//! authorize_collection(Role::User, Resource::Title, Access::Write)
//!     .into_result(Resource::Title)?; // 403
//! ```

pub mod errors;
pub mod pagination;
pub mod permissions;
pub mod search;
pub mod serde;

pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use permissions::{Access, Decision, Resource, Role};
