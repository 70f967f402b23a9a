use crate::models::BillingUser;

/// Fields every page shares with the `base.html` layout.
pub trait BaseTemplate {
    fn current_user(&self) -> &Option<BillingUser>;
    fn base_url(&self) -> &str;
    fn root_domain_url(&self) -> &str;
    fn flash_messages(&self) -> &Vec<String>;
    fn has_flash_messages(&self) -> bool;
}

/// Implement BaseTemplate for a struct carrying the standard layout fields.
#[macro_export]
macro_rules! impl_base_template {
    ($struct_name:ty) => {
        impl $crate::templates::BaseTemplate for $struct_name {
            fn current_user(&self) -> &Option<$crate::models::BillingUser> {
                &self.current_user
            }
            fn base_url(&self) -> &str {
                &self.base_url
            }
            fn root_domain_url(&self) -> &str {
                &self.root_domain_url
            }
            fn flash_messages(&self) -> &Vec<String> {
                &self.flash_messages
            }
            fn has_flash_messages(&self) -> bool {
                self.has_flash_messages
            }
        }
    };
}
