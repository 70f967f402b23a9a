// Base template trait shared with the base.html layout
pub mod base_template;
pub use base_template::BaseTemplate;

pub mod confirm_login_template;
pub mod plans_template;

pub use confirm_login_template::{ConfirmLoginContext, ConfirmLoginTemplate};
pub use plans_template::PlansTemplate;
