use sqlx::PgPool;
use yamdb_config::{ConfirmationConfig, CorsConfig, EmailConfig, JwtConfig};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
    pub confirmation_config: ConfirmationConfig,
}

impl AppState {
    /// Builds the state around an existing pool, reading the rest from the environment.
    pub fn from_env(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            email_config: EmailConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            confirmation_config: ConfirmationConfig::from_env(),
        }
    }
}
