pub mod app_state;
pub mod billing_user;
pub mod confirm_login_form;
pub mod login_request;
pub mod pending_login;
pub mod session_record;

pub use app_state::AppState;
pub use billing_user::BillingUser;
pub use confirm_login_form::{ConfirmLoginForm, FormError, MAX_FULL_NAME_LENGTH};
pub use login_request::{LoginRequest, LoginRequestCreated};
pub use pending_login::PendingLogin;
pub use session_record::SessionRecord;
