use chrono::{DateTime, Utc};

use super::BillingUser;

#[derive(Clone, Debug)]
pub struct SessionRecord {
    pub csrf_token: String,
    pub billing_user: Option<BillingUser>,
    /// Shown once on the next rendered page, then dropped.
    pub flash_messages: Vec<String>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// An anonymous session with no flash messages.
    pub fn new(csrf_token: String, expires_at: DateTime<Utc>) -> Self {
        SessionRecord {
            csrf_token,
            billing_user: None,
            flash_messages: Vec::new(),
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_sessions_are_anonymous_and_expire_at_the_deadline() {
        let now = Utc::now();
        let record = SessionRecord::new("tok".into(), now + Duration::minutes(5));
        assert!(record.billing_user.is_none());
        assert!(record.flash_messages.is_empty());
        assert!(!record.is_expired_at(now));
        assert!(record.is_expired_at(now + Duration::minutes(5)));
    }
}
