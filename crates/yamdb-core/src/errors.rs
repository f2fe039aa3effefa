//! Application error type with HTTP response conversion.
//!
//! Every handler and service returns `Result<T, AppError>`. The status code
//! is chosen where the error is raised; the body is always
//! `{"error": "...", "fields": {...}}` where `fields` is present only for
//! field-level validation failures.

use std::collections::BTreeMap;

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

/// Field name to the list of messages reported for it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub fields: Option<FieldErrors>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            fields: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::internal(anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::new(StatusCode::FORBIDDEN, anyhow!(message))
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// A 400 naming a single offending field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.clone()]);

        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow!(message),
            fields: Some(fields),
        }
    }

    /// A 400 carrying every failure reported by `validator`.
    pub fn validation(errors: &ValidationErrors) -> Self {
        let fields = field_errors(errors);
        let summary = fields
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow!(if summary.is_empty() {
                "Validation failed".to_string()
            } else {
                summary
            }),
            fields: Some(fields),
        }
    }

    /// Appends another field failure to this error, turning it into a 400.
    pub fn with_field(mut self, field: &str, message: impl Into<String>) -> Self {
        self.status = StatusCode::BAD_REQUEST;
        self.fields
            .get_or_insert_with(FieldErrors::new)
            .entry(field.to_string())
            .or_default()
            .push(message.into());
        self
    }
}

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                error = %format!("{:#}", self.error),
                "Request failed"
            );
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = match self.fields {
            Some(fields) => json!({ "error": message, "fields": fields }),
            None => json!({ "error": message }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_json(AppError::not_found(anyhow!("Title not found"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Title not found");
        assert!(body.get("fields").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let (status, body) = body_json(AppError::internal_error("connection refused")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_field_error_names_field() {
        let (status, body) =
            body_json(AppError::field("username", "This username is already taken")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"]["username"][0], "This username is already taken");
    }

    #[tokio::test]
    async fn test_validation_errors_collected() {
        let errors = Sample {
            name: "ab".to_string(),
        }
        .validate()
        .unwrap_err();

        let (status, body) = body_json(AppError::validation(&errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"]["name"][0], "too short");
        assert_eq!(body["error"], "name: too short");
    }

    #[test]
    fn test_with_field_accumulates() {
        let error = AppError::field("username", "taken").with_field("email", "taken");
        let fields = error.fields.unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unauthorized_and_forbidden_status() {
        assert_eq!(
            AppError::unauthorized("Missing token").status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::forbidden("No").status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_from_anyhow_is_internal() {
        let error: AppError = anyhow!("boom").into();
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
