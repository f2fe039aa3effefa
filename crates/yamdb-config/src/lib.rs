//! # YaMDb Config
//!
//! Configuration structures loaded from environment variables (a `.env` file
//! is read by the binaries through `dotenvy` before any of these run):
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`email`]: SMTP transport and sender identity
//! - [`cors`]: allowed browser origins
//! - [`confirmation`]: signup confirmation code lifetime
//! - [`server`]: listen address
//!
//! ```ignore
//! use yamdb_config::{JwtConfig, EmailConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let email_config = EmailConfig::from_env();
//! ```

pub mod confirmation;
pub mod cors;
pub mod email;
pub mod jwt;
pub mod server;

pub use confirmation::ConfirmationConfig;
pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
