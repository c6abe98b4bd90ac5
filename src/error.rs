//! # error
//!
//! Two error layers:
//!
//! * [`ApiError`] — everything that can go wrong talking to the trading API
//!   or to the token store.
//! * [`AppError`] — what a dashboard handler returns.  Axum's `IntoResponse`
//!   impl turns an expired session into a redirect to the login page and
//!   everything else into a plain error page.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::dashboard::escape;
use crate::views::ViewError;

/// Convenience alias for trading API results.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401 from the trading API, or a call attempted on a session that
    /// already saw one.
    #[error("Unauthorized: bearer credential rejected")]
    Unauthorized,

    /// Any other non-success HTTP status.
    #[error("Trading API returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request never completed (DNS, connect, timeout) or the body could
    /// not be read/decoded.
    #[error("Trading API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Token storage could not be read or written.
    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Token storage held something that is not the expected JSON document.
    #[error("Token storage is corrupt: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

// ─── AppError ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AppError {
    /// Send the browser to the credential entry page.
    #[error("Session expired — redirecting to {login_path}")]
    LoginRequired { login_path: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Map a view failure, sending 401s to `login_path`.
    pub fn from_view(err: ViewError, login_path: &str) -> Self {
        match err {
            ViewError::Api(ApiError::Unauthorized) => AppError::LoginRequired {
                login_path: login_path.to_string(),
            },
            ViewError::NoSuchRow(_)
            | ViewError::NotEditing(_)
            | ViewError::RowMoved { .. }
            | ViewError::NoSuchPosition(_)
            | ViewError::PositionChanged(_) => {
                AppError::NotFound(err.to_string())
            }
            ViewError::Api(api) => AppError::Internal(api.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::LoginRequired { login_path } => {
                return (StatusCode::SEE_OTHER, [(header::LOCATION, login_path)]).into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {err}"))
            }
        };

        let body = Html(format!(
            "<!DOCTYPE html><html><body><h1>{}</h1><p>{}</p></body></html>",
            status,
            escape(&message)
        ));

        (status, body).into_response()
    }
}
