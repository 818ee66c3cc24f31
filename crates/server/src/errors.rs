use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorDetail;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// HTTP error rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorDetail { detail: self.detail })).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => ApiError::new(StatusCode::NOT_FOUND, msg),
            // 历史行为：越权访问返回 400 而非 403，客户端依赖此状态码
            ServiceError::Forbidden(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::Model(models::errors::ModelError::Validation(msg)) => ApiError::unprocessable(msg),
            other => {
                error!(err = %other, "request failed");
                ApiError::internal()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken | AuthError::InvalidToken(_) => {
                ApiError::new(StatusCode::FORBIDDEN, "Could not validate credentials")
            }
            AuthError::UserNotFound => ApiError::new(StatusCode::NOT_FOUND, "User not found"),
            AuthError::InactiveUser => ApiError::new(StatusCode::BAD_REQUEST, "Inactive user"),
            other => {
                error!(err = %other, code = other.code(), "authentication backend failed");
                ApiError::internal()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
