use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::BillingLoginError;
use crate::models::AppState;
use crate::services::billing_user_from_jar;

/// Only sessions that went through the confirmation page get past this layer.
pub async fn require_billing_session(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if billing_user_from_jar(&state, &jar).is_some() {
        next.run(request).await
    } else {
        BillingLoginError::NotLoggedIn.into_response()
    }
}
