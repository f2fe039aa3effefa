use std::env;

#[derive(Clone, Debug)]
pub struct ConfirmationConfig {
    /// Seconds a confirmation code stays valid after it is issued.
    pub code_ttl_seconds: i64,
}

impl ConfirmationConfig {
    pub fn from_env() -> Self {
        Self {
            code_ttl_seconds: env::var("CONFIRMATION_CODE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|ttl: &i64| *ttl > 0)
                .unwrap_or(86400),
        }
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: 86400,
        }
    }
}
