use askama::Template;

use crate::models::BillingUser;

#[derive(Template)]
#[template(path = "plans.html")]
pub struct PlansTemplate {
    pub current_user: Option<BillingUser>,
    pub base_url: String,
    pub root_domain_url: String,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,

    pub user: BillingUser,
    pub csrf_input: String,
}

crate::impl_base_template!(PlansTemplate);
