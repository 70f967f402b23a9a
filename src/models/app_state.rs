use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Duration;

use crate::config::{Config, DEFAULT_LOGIN_TOKEN_TTL_SECS, DEFAULT_SESSION_TTL_SECS};
use crate::models::pending_login::PendingLogin;
use crate::models::session_record::SessionRecord;

#[derive(Clone)]
pub struct AppState {
    /// Login requests waiting for confirmation, keyed by token.
    pub pending_logins: Arc<Mutex<HashMap<String, PendingLogin>>>,
    /// Browser sessions keyed by the `billing_session` cookie value.
    pub sessions: Arc<Mutex<HashMap<String, SessionRecord>>>,
    pub public_base_url: String,
    pub root_domain_url: String,
    pub api_token: String,
    pub login_ttl: Duration,
    /// Lifetime of a browser session, counted from its creation.
    pub session_ttl: Duration,
    pub plan_management_path: String,
    pub custom_css: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            pending_logins: Arc::new(Mutex::new(HashMap::new())),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            public_base_url: config.public_base_url,
            root_domain_url: config.root_domain_url,
            api_token: config.api_token,
            login_ttl: Duration::try_seconds(config.login_token_ttl_secs)
                .unwrap_or_else(|| Duration::seconds(DEFAULT_LOGIN_TOKEN_TTL_SECS)),
            session_ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            plan_management_path: config.plan_management_path,
            custom_css: None,
        }
    }

    pub fn pending_logins(&self) -> MutexGuard<'_, HashMap<String, PendingLogin>> {
        self.pending_logins.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn sessions(&self) -> MutexGuard<'_, HashMap<String, SessionRecord>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Issuing login requests is open when no API token is configured.
    pub fn requires_api_token(&self) -> bool {
        !self.api_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(ttl: i64) -> Config {
        Config {
            public_base_url: "http://localhost:8080".into(),
            root_domain_url: "https://zulip.com".into(),
            api_token: String::new(),
            login_token_ttl_secs: ttl,
            plan_management_path: "/plans/".into(),
        }
    }

    #[test]
    fn login_ttl_comes_from_config() {
        assert_eq!(AppState::new(config(90)).login_ttl, Duration::seconds(90));
    }

    #[test]
    fn out_of_range_ttl_falls_back_to_the_default() {
        let state = AppState::new(config(i64::MAX));
        assert_eq!(state.login_ttl, Duration::seconds(DEFAULT_LOGIN_TOKEN_TTL_SECS));
    }
}
