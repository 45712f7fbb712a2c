use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing or invalid token")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Token encoding error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(e.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::PasswordHash(_)
            | AppError::Token(_)
            | AppError::MalformedBody(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation(msg) => ApiErrorBody::new("VALIDATION_ERROR", msg),
            AppError::InvalidCredentials => ApiErrorBody::new("INVALID_CREDENTIALS", "Invalid credentials"),
            AppError::Unauthorized => ApiErrorBody::new("UNAUTHORIZED", "Missing or invalid token"),
            AppError::NotFound(msg) => ApiErrorBody::new("NOT_FOUND", msg),
            AppError::DatabaseError(_)
            | AppError::PasswordHash(_)
            | AppError::Token(_)
            | AppError::MalformedBody(_)
            | AppError::Config(_) => {
                error!(error = %self, "request failed");
                ApiErrorBody::new("INTERNAL_ERROR", "An internal server error occurred.")
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Error payload. `message` is the key existing clients read.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiErrorBody {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_message() {
        let (status, body) = body_of(AppError::Validation("Name is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Name is required");
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_detail() {
        let (status, body) =
            body_of(AppError::DatabaseError(SqlxError::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("pool"));

        let (status, _) = body_of(AppError::MalformedBody("EOF while parsing".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_failures_are_401() {
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound("Admin not found".into()).status(), StatusCode::NOT_FOUND);
    }
}
