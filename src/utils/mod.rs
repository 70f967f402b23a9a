// URL handling utilities
pub mod url_builder;

pub use url_builder::{absolute_url, terms_of_service_url};
