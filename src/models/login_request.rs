use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON body accepted by the login-request issue endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginRequest {
    pub host: String,
    pub user_email: String,
    #[serde(default)]
    pub user_full_name: Option<String>,
    #[serde(default)]
    pub tos_consent_needed: bool,
    #[serde(default)]
    pub next_page: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequestCreated {
    pub token: String,
    pub confirm_url: String,
    pub expires_at: DateTime<Utc>,
}
