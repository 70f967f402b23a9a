use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::error::ApiError;
use crate::models::{AppState, LoginRequest, LoginRequestCreated};
use crate::services::csrf_service::constant_time_eq;
use crate::services::{confirm_path, issue_login};

use super::helpers::absolute_url_from_state;

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    if !state.requires_api_token() {
        return Ok(());
    }
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    match presented {
        Some(token) if constant_time_eq(token, &state.api_token) => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}

pub async fn create_login_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&state, &headers)?;
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    let login = issue_login(&state, request)?;
    let created = LoginRequestCreated {
        confirm_url: absolute_url_from_state(&state, &confirm_path(&login.token)),
        token: login.token,
        expires_at: login.expires_at,
    };
    Ok((StatusCode::CREATED, Json(created)))
}
