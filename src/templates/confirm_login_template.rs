use askama::Template;

use crate::models::BillingUser;
use crate::utils::terms_of_service_url;

/// Values the host application supplies to the confirmation page.
#[derive(Clone, Debug)]
pub struct ConfirmLoginContext {
    pub host: String,
    pub user_email: String,
    pub user_full_name: Option<String>,
    pub tos_consent_needed: bool,
    pub action_url: String,
    /// Rendered verbatim inside the form.
    pub csrf_input: String,
    pub root_domain_url: String,
}

#[derive(Template)]
#[template(path = "confirm_login.html")]
pub struct ConfirmLoginTemplate {
    pub current_user: Option<BillingUser>,
    pub base_url: String,
    pub root_domain_url: String,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,

    pub host: String,
    pub user_email: String,
    pub user_full_name: Option<String>,
    pub tos_consent_needed: bool,
    pub action_url: String,
    pub csrf_input: String,
    pub terms_url: String,
    pub error: Option<String>,
}

crate::impl_base_template!(ConfirmLoginTemplate);

impl ConfirmLoginTemplate {
    pub fn from_context(ctx: ConfirmLoginContext, base_url: String) -> Self {
        ConfirmLoginTemplate {
            current_user: None,
            base_url,
            terms_url: terms_of_service_url(&ctx.root_domain_url),
            root_domain_url: ctx.root_domain_url,
            flash_messages: vec![],
            has_flash_messages: false,
            host: ctx.host,
            user_email: ctx.user_email,
            user_full_name: ctx.user_full_name,
            tos_consent_needed: ctx.tos_consent_needed,
            action_url: ctx.action_url,
            csrf_input: ctx.csrf_input,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
