use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_)
            | ApiError::Migrate(_)
            | ApiError::Io(_)
            | ApiError::Config(_)
            | ApiError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable code reported alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "ERR-REQ-001",
            ApiError::Validation(_) => "ERR-REQ-002",
            ApiError::Unauthorized => "ERR-AUTH-001",
            ApiError::NotFound(_) => "ERR-JOB-001",
            ApiError::Database(_) => "ERR-DB-000",
            ApiError::Migrate(_) => "ERR-DB-001",
            ApiError::Io(_) => "ERR-IO-000",
            ApiError::Config(_) => "ERR-CONF-000",
            ApiError::Token(_) => "ERR-AUTH-002",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        // internals stay in the log, the client gets a generic message
        let message = if status.is_server_error() {
            tracing::error!("request failed: {}", &self);
            "internal server error".to_string()
        } else {
            tracing::warn!("request rejected ({}): {}", status.as_u16(), &self);
            self.to_string()
        };
        let body = json!({
            "error": {
                "code": code,
                "message": message,
                "status": status.as_u16(),
            }
        });
        (status, Json(body)).into_response()
    }
}
