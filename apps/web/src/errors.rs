use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::render::page::{render_error_panel, render_page, APP_TITLE};

/// Application-level error type.
/// Implements `IntoResponse` so the JSON routes can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(_) => AppError::NotFound(e.to_string()),
            CatalogError::Http(_) | CatalogError::Status { .. } | CatalogError::Decode { .. } => {
                AppError::Upstream(e.to_string())
            }
            CatalogError::InvalidCatalog(_) | CatalogError::Io(_) => {
                AppError::Internal(anyhow::Error::new(e))
            }
        }
    }
}

impl AppError {
    /// Status, machine code and user-facing message. Logs server-side failures.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The competency matrix service is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// The same failures, rendered as an HTML panel for the browsing views.
#[derive(Debug)]
pub struct ViewError {
    error: AppError,
    full_page: bool,
}

impl ViewError {
    /// Error for a request that expects a whole document.
    pub fn page(error: impl Into<AppError>) -> Self {
        Self {
            error: error.into(),
            full_page: true,
        }
    }

    /// Error for an HTMX fragment request.
    pub fn fragment(error: impl Into<AppError>) -> Self {
        Self {
            error: error.into(),
            full_page: false,
        }
    }
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        let (status, _, message) = self.error.parts();
        let panel = render_error_panel(&message);
        let body = if self.full_page {
            render_page(APP_TITLE, &panel)
        } else {
            panel
        };
        (status, Html(body)).into_response()
    }
}
