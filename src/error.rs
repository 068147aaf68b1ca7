//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("database: {0}")]
    Connect(String),
}

/// Handler-facing error. `Display` is the exact text sent to the client.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn order_not_found() -> Self {
        AppError::NotFound("Order not found".into())
    }

    pub fn invalid_order_id() -> Self {
        AppError::BadRequest("Invalid order ID".into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Db(e) = &self {
            tracing::error!(error = %e, "database error");
        }
        (status, self.to_string()).into_response()
    }
}
