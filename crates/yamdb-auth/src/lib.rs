//! # YaMDb Auth
//!
//! Credentials for the passwordless signup flow:
//!
//! - [`confirmation`]: one-time confirmation codes (generation, hashing, checking)
//! - [`jwt`]: bearer token minting and verification
//! - [`claims`]: the payload carried by bearer tokens
//!
//! A user requests a code by email, then trades `(username, code)` for a
//! bearer token. Codes are single use and only their SHA-256 digest is stored.

pub mod claims;
pub mod confirmation;
pub mod jwt;

pub use claims::Claims;
pub use confirmation::{CodeCheck, IssuedCode, check_code, hash_code, issue_code};
pub use jwt::{create_access_token, verify_token};
