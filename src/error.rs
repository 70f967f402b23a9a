use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::handlers::helpers::plain_html;

/// Request-level failures of the billing login flow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingLoginError {
    #[error("This login link is invalid or has already been used.")]
    UnknownToken,

    #[error("This login link has expired. Please start the login again from your server.")]
    ExpiredToken,

    #[error("Invalid or missing CSRF token")]
    CsrfMismatch,

    #[error("You need to log in to manage plans.")]
    NotLoggedIn,
}

impl BillingLoginError {
    pub fn status(&self) -> StatusCode {
        match self {
            BillingLoginError::UnknownToken => StatusCode::NOT_FOUND,
            BillingLoginError::ExpiredToken => StatusCode::GONE,
            BillingLoginError::CsrfMismatch => StatusCode::FORBIDDEN,
            BillingLoginError::NotLoggedIn => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for BillingLoginError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "Billing login request rejected");
        (status, plain_html(self.to_string())).into_response()
    }
}

/// Failures of the JSON login-request API. Rendered as `{"error": ...}`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Missing or invalid API token")]
    Unauthorized,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Could not compute the login request expiry")]
    ExpiryOutOfRange,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ExpiryOutOfRange => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(%status, error = %self, "Login request API call rejected");
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
