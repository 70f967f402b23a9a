use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use rand::RngCore;

use crate::models::{AppState, BillingUser, SessionRecord};

pub const SESSION_COOKIE: &str = "billing_session";

/// 32 random bytes, hex encoded.
pub fn random_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn session_id_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

fn session_cookie(sid: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, sid);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Returns the session id and CSRF token for this browser, creating a
/// session (and the cookie carrying it) when the jar has none we know of.
pub fn ensure_session(state: &AppState, jar: CookieJar) -> (CookieJar, String, String) {
    let now = Utc::now();
    let mut sessions = state.sessions();
    if let Some(sid) = session_id_from_jar(&jar) {
        match sessions.get(&sid) {
            Some(record) if !record.is_expired_at(now) => {
                let token = record.csrf_token.clone();
                return (jar, sid, token);
            }
            Some(_) => {
                sessions.remove(&sid);
            }
            None => {}
        }
    }
    let sid = random_token();
    let csrf_token = random_token();
    sessions.insert(sid.clone(), SessionRecord::new(csrf_token.clone(), now + state.session_ttl));
    (jar.add(session_cookie(sid.clone())), sid, csrf_token)
}

/// Replaces the current session with a fresh one carrying `user`.
pub fn login_session(state: &AppState, jar: CookieJar, user: BillingUser) -> CookieJar {
    let mut sessions = state.sessions();
    if let Some(old) = session_id_from_jar(&jar) {
        sessions.remove(&old);
    }
    let sid = random_token();
    let welcome = format!("Logged in to plan management for {}.", user.host);
    sessions.insert(
        sid.clone(),
        SessionRecord {
            csrf_token: random_token(),
            billing_user: Some(user),
            flash_messages: vec![welcome],
            expires_at: Utc::now() + state.session_ttl,
        },
    );
    jar.add(session_cookie(sid))
}

pub fn logout_session(state: &AppState, jar: CookieJar) -> CookieJar {
    if let Some(sid) = session_id_from_jar(&jar) {
        state.sessions().remove(&sid);
    }
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

pub fn billing_user_from_jar(state: &AppState, jar: &CookieJar) -> Option<BillingUser> {
    let sid = session_id_from_jar(jar)?;
    let sessions = state.sessions();
    let record = sessions.get(&sid)?;
    if record.is_expired_at(Utc::now()) {
        return None;
    }
    record.billing_user.clone()
}

pub fn take_flash_messages(state: &AppState, jar: &CookieJar) -> Vec<String> {
    let Some(sid) = session_id_from_jar(jar) else {
        return vec![];
    };
    state
        .sessions()
        .get_mut(&sid)
        .map(|record| std::mem::take(&mut record.flash_messages))
        .unwrap_or_default()
}
