pub mod csrf_service;
pub mod login_service;
pub mod session_service;

// Re-export commonly used functions
pub use csrf_service::{csrf_input, verify_csrf, CSRF_FIELD_NAME};
pub use login_service::{complete_login, confirm_path, issue_login, lookup_login, purge_expired, purge_expired_at, Confirmation};
pub use session_service::{
    billing_user_from_jar, ensure_session, login_session, logout_session, random_token, session_id_from_jar, take_flash_messages,
    SESSION_COOKIE,
};
