use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use tracing::instrument;
use utoipa::ToSchema;

use yamdb_core::AppError;
use yamdb_models::{SignupRequest, SignupResponse, TokenRequest, TokenResponse};

use super::service::AuthService;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::validator::ValidatedJson;

/// Body of every error response.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Messages per offending field, for field-level validation failures
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

/// Request a confirmation code
///
/// Creates the account on first use. Repeating the request with the same
/// username and email sends a new code and invalidates the previous one.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup/",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Confirmation code sent", body = SignupResponse),
        (status = 400, description = "Invalid input, or username/email taken by another account", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    let email_service = EmailService::new(state.email_config.clone());
    let response =
        AuthService::signup(&state.db, dto, &state.confirmation_config, &email_service).await?;
    Ok(Json(response))
}

/// Exchange a confirmation code for an access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/token/",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "Invalid, expired or used confirmation code", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn obtain_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::obtain_token(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}
