use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use yamdb_auth::{CodeCheck, check_code, create_access_token, issue_code};
use yamdb_config::{ConfirmationConfig, JwtConfig};
use yamdb_core::AppError;
use yamdb_models::{
    SignupRequest, SignupResponse, TokenRequest, TokenResponse, UserCredentials, UserId,
};

use crate::metrics::{track_signup, track_token_failure, track_token_issued};
use crate::modules::users::service::user_conflict;
use crate::utils::email::EmailService;

pub struct AuthService;

impl AuthService {
    /// Creates the account on first use, then replaces its confirmation code
    /// and mails it. Nothing is committed unless the mail goes out.
    #[instrument(skip(db, confirmation_config, email_service))]
    pub async fn signup(
        db: &PgPool,
        dto: SignupRequest,
        confirmation_config: &ConfirmationConfig,
        email_service: &EmailService,
    ) -> Result<SignupResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct Account {
            id: UserId,
            username: String,
            email: String,
        }

        let mut tx = db.begin().await?;

        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, username, email FROM users WHERE username = $1 OR email = $2 FOR UPDATE",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .fetch_all(&mut *tx)
        .await?;

        let existing = accounts
            .iter()
            .find(|a| a.username == dto.username && a.email == dto.email)
            .map(|a| a.id);

        let user_id = match existing {
            Some(id) => id,
            None if !accounts.is_empty() => {
                let mut error: Option<AppError> = None;
                for account in &accounts {
                    let (field, message) = if account.username == dto.username {
                        ("username", "This username is registered with a different email")
                    } else {
                        ("email", "This email is registered with a different username")
                    };
                    error = Some(match error {
                        Some(e) => e.with_field(field, message),
                        None => AppError::field(field, message),
                    });
                }
                return Err(error
                    .unwrap_or_else(|| AppError::bad_request(anyhow::anyhow!("User already exists"))));
            }
            None => sqlx::query_scalar::<_, UserId>(
                "INSERT INTO users (username, email) VALUES ($1, $2) RETURNING id",
            )
            .bind(&dto.username)
            .bind(&dto.email)
            .fetch_one(&mut *tx)
            .await
            .map_err(user_conflict)?,
        };

        let issued = issue_code(confirmation_config);
        sqlx::query(
            "UPDATE users
             SET confirmation_code_hash = $1, confirmation_code_expires_at = $2, updated_at = NOW()
             WHERE id = $3",
        )
        .bind(&issued.hash)
        .bind(issued.expires_at)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        email_service
            .send_confirmation_code(&dto.email, &dto.username, &issued.code)
            .await?;

        tx.commit().await?;

        track_signup(existing.is_none());
        info!(user_id = %user_id, new_account = existing.is_none(), "Confirmation code issued");

        Ok(SignupResponse {
            username: dto.username,
            email: dto.email,
        })
    }

    /// Exchanges a confirmation code for an access token. The code is consumed.
    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn obtain_token(
        db: &PgPool,
        dto: TokenRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, role, confirmation_code_hash, confirmation_code_expires_at
             FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        let check = check_code(
            &dto.confirmation_code,
            credentials.confirmation_code_hash.as_deref(),
            credentials.confirmation_code_expires_at,
            Utc::now(),
        );

        let reason = match check {
            CodeCheck::Valid => None,
            CodeCheck::Missing => Some("missing"),
            CodeCheck::Expired => Some("expired"),
            CodeCheck::Mismatch => Some("mismatch"),
        };
        if let Some(reason) = reason {
            track_token_failure(reason);
            warn!(reason, "Confirmation code rejected");
            return Err(AppError::field(
                "confirmation_code",
                "Invalid confirmation code",
            ));
        }

        // Only the request that clears the digest it checked may mint a token.
        let consumed = sqlx::query(
            "UPDATE users
             SET confirmation_code_hash = NULL, confirmation_code_expires_at = NULL
             WHERE id = $1 AND confirmation_code_hash = $2",
        )
        .bind(credentials.id)
        .bind(&credentials.confirmation_code_hash)
        .execute(db)
        .await?;

        if consumed.rows_affected() == 0 {
            track_token_failure("replayed");
            return Err(AppError::field(
                "confirmation_code",
                "Invalid confirmation code",
            ));
        }

        let token = create_access_token(
            credentials.id.0,
            &credentials.username,
            credentials.role,
            jwt_config,
        )?;

        track_token_issued();

        Ok(TokenResponse { token })
    }
}
