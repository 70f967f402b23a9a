/// Path of the Terms of Service page below the root domain.
pub const TERMS_OF_SERVICE_PATH: &str = "/policies/terms";

/// Join `path` onto `base_url`, leaving already-absolute URLs untouched.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, trimmed)
}

pub fn terms_of_service_url(root_domain_url: &str) -> String {
    absolute_url(root_domain_url, TERMS_OF_SERVICE_PATH)
}
