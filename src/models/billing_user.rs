use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user who has confirmed their identity and may manage plans for `host`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingUser {
    pub host: String,
    pub email: String,
    pub full_name: String,
    pub tos_accepted_at: Option<DateTime<Utc>>,
}
