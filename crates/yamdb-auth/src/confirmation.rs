//! One-time confirmation codes for the signup flow.
//!
//! A code is 32 random alphanumeric characters mailed to the user. Only the
//! SHA-256 hex digest is stored, together with an expiry. Issuing a new code
//! overwrites the previous digest, so at most one code is ever outstanding
//! per user.

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distributions::Alphanumeric};
use sha2::{Digest, Sha256};

use yamdb_config::ConfirmationConfig;

pub const CODE_LENGTH: usize = 32;

/// A freshly generated code: `code` goes into the email, the rest into the store.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    pub code: String,
    pub hash: String,
    pub expires_at: DateTime<Utc>,
}

pub fn issue_code(config: &ConfirmationConfig) -> IssuedCode {
    let code = generate_code();
    let hash = hash_code(&code);

    IssuedCode {
        code,
        hash,
        expires_at: Utc::now() + Duration::seconds(config.code_ttl_seconds),
    }
}

pub fn generate_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

pub fn hash_code(code: &str) -> String {
    hex::encode(Sha256::digest(code.as_bytes()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    Valid,
    /// No code is outstanding (never issued, or already used).
    Missing,
    Expired,
    Mismatch,
}

/// Compares a submitted code against the stored digest.
pub fn check_code(
    supplied: &str,
    stored_hash: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> CodeCheck {
    let Some(stored_hash) = stored_hash else {
        return CodeCheck::Missing;
    };

    if !constant_time_eq(hash_code(supplied).as_bytes(), stored_hash.as_bytes()) {
        return CodeCheck::Mismatch;
    }

    match expires_at {
        Some(expires_at) if expires_at > now => CodeCheck::Valid,
        _ => CodeCheck::Expired,
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
