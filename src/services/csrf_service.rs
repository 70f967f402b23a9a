use chrono::Utc;
use subtle::ConstantTimeEq;

use crate::error::BillingLoginError;
use crate::models::AppState;

/// Form field carrying the anti-forgery token.
pub const CSRF_FIELD_NAME: &str = "csrfmiddlewaretoken";

/// Hidden input markup that the confirmation form embeds verbatim.
pub fn csrf_input(token: &str) -> String {
    format!(r#"<input type="hidden" name="{CSRF_FIELD_NAME}" value="{token}">"#)
}

/// Check a submitted token against the one stored for the session.
pub fn verify_csrf(state: &AppState, session_id: Option<&str>, submitted: &str) -> Result<(), BillingLoginError> {
    let sid = session_id.ok_or(BillingLoginError::CsrfMismatch)?;
    let sessions = state.sessions();
    let now = Utc::now();
    let stored = sessions
        .get(sid)
        .filter(|record| !record.is_expired_at(now))
        .map(|record| record.csrf_token.as_str())
        .unwrap_or_default();
    if stored.is_empty() || !constant_time_eq(stored, submitted) {
        return Err(BillingLoginError::CsrfMismatch);
    }
    Ok(())
}

/// Constant-time string comparison for secrets (CSRF and API tokens).
pub(crate) fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
