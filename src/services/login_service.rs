use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::{ApiError, BillingLoginError};
use crate::models::{AppState, BillingUser, ConfirmLoginForm, FormError, LoginRequest, PendingLogin};
use crate::services::session_service::random_token;

/// Outcome of a confirmation attempt for a token that is still valid.
#[derive(Debug)]
pub enum Confirmation {
    LoggedIn { user: BillingUser, next_page: Option<String> },
    Rejected { login: PendingLogin, error: FormError },
}

/// Path of the confirmation page for a login token.
pub fn confirm_path(token: &str) -> String {
    format!("/billing/login/{}/confirm", urlencoding::encode(token))
}

pub fn issue_login(state: &AppState, request: LoginRequest) -> Result<PendingLogin, ApiError> {
    issue_login_at(state, request, Utc::now())
}

pub fn issue_login_at(state: &AppState, request: LoginRequest, now: DateTime<Utc>) -> Result<PendingLogin, ApiError> {
    let host = request.host.trim();
    if host.is_empty() {
        return Err(ApiError::InvalidRequest("host is required".into()));
    }
    let user_email = request.user_email.trim();
    if user_email.is_empty() || !user_email.contains('@') {
        return Err(ApiError::InvalidRequest("user_email must be an email address".into()));
    }
    let next_page = match request.next_page.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(p) if p.starts_with('/') && !p.starts_with("//") => Some(p.to_string()),
        Some(_) => return Err(ApiError::InvalidRequest("next_page must be a relative path".into())),
    };
    let user_full_name = request
        .user_full_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    purge_expired_at(state, now);

    let expires_at = now.checked_add_signed(state.login_ttl).ok_or(ApiError::ExpiryOutOfRange)?;
    let login = PendingLogin {
        token: random_token(),
        host: host.to_string(),
        user_email: user_email.to_string(),
        user_full_name,
        tos_consent_needed: request.tos_consent_needed,
        next_page,
        expires_at,
    };
    state.pending_logins().insert(login.token.clone(), login.clone());
    tracing::info!(host = %login.host, expires_at = %login.expires_at, "Issued billing login request");
    Ok(login)
}

pub fn lookup_login(state: &AppState, token: &str) -> Result<PendingLogin, BillingLoginError> {
    lookup_login_at(state, token, Utc::now())
}

pub fn lookup_login_at(state: &AppState, token: &str, now: DateTime<Utc>) -> Result<PendingLogin, BillingLoginError> {
    live_login(&mut state.pending_logins(), token, now)
}

fn live_login(
    pending: &mut HashMap<String, PendingLogin>,
    token: &str,
    now: DateTime<Utc>,
) -> Result<PendingLogin, BillingLoginError> {
    let login = pending.get(token).cloned().ok_or(BillingLoginError::UnknownToken)?;
    if login.is_expired_at(now) {
        pending.remove(token);
        return Err(BillingLoginError::ExpiredToken);
    }
    Ok(login)
}

/// Validates the submitted form against the pending login. On success the
/// token is consumed and cannot be confirmed again.
pub fn complete_login(state: &AppState, token: &str, form: &ConfirmLoginForm) -> Result<Confirmation, BillingLoginError> {
    complete_login_at(state, token, form, Utc::now())
}

pub fn complete_login_at(
    state: &AppState,
    token: &str,
    form: &ConfirmLoginForm,
    now: DateTime<Utc>,
) -> Result<Confirmation, BillingLoginError> {
    // Check and consume under one lock so concurrent submissions of the
    // same token cannot both succeed.
    let mut pending = state.pending_logins();
    let login = live_login(&mut pending, token, now)?;
    let full_name = match form.validate(login.tos_consent_needed) {
        Ok(name) => name,
        Err(error) => return Ok(Confirmation::Rejected { login, error }),
    };
    let login = pending.remove(token).ok_or(BillingLoginError::UnknownToken)?;
    drop(pending);

    let user = BillingUser {
        host: login.host,
        email: login.user_email,
        full_name,
        tos_accepted_at: form.tos_accepted().then_some(now),
    };
    tracing::info!(host = %user.host, "Billing login confirmed");
    Ok(Confirmation::LoggedIn { user, next_page: login.next_page })
}

/// Drops expired pending logins and expired browser sessions. Returns how
/// many entries were removed in total.
pub fn purge_expired(state: &AppState) -> usize {
    purge_expired_at(state, Utc::now())
}

pub fn purge_expired_at(state: &AppState, now: DateTime<Utc>) -> usize {
    let logins = {
        let mut pending = state.pending_logins();
        let before = pending.len();
        pending.retain(|_, login| !login.is_expired_at(now));
        before - pending.len()
    };
    let sessions = {
        let mut sessions = state.sessions();
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired_at(now));
        before - sessions.len()
    };
    if logins + sessions > 0 {
        tracing::debug!(logins, sessions, "Purged expired billing login state");
    }
    logins + sessions
}
