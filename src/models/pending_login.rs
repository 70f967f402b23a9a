use chrono::{DateTime, Utc};
use serde::Serialize;

/// A login request issued by a server and waiting for the user to confirm it.
#[derive(Clone, Debug, Serialize)]
pub struct PendingLogin {
    pub token: String,
    pub host: String,
    pub user_email: String,
    pub user_full_name: Option<String>,
    pub tos_consent_needed: bool,
    pub next_page: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl PendingLogin {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
