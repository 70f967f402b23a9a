use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::models::{AppState, BillingUser};
use crate::services::{billing_user_from_jar, take_flash_messages};
use crate::templates::BaseTemplate;

#[derive(Default)]
pub struct TemplateGlobals {
    pub current_user: Option<BillingUser>,
    pub base_url: String,
    pub root_domain_url: String,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
}

pub fn build_template_globals(state: &AppState, jar: &CookieJar) -> TemplateGlobals {
    let current_user = billing_user_from_jar(state, jar);
    let flash_messages = take_flash_messages(state, jar);
    let has_flash_messages = !flash_messages.is_empty();
    TemplateGlobals {
        current_user,
        base_url: state.public_base_url.clone(),
        root_domain_url: state.root_domain_url.clone(),
        flash_messages,
        has_flash_messages,
    }
}

/// Script exposing the page's layout context as `window.__APP_CONTEXT__`.
pub fn app_context_script<T: BaseTemplate>(page: &T) -> String {
    let flash_messages: &[String] = if page.has_flash_messages() { page.flash_messages().as_slice() } else { &[] };
    let context = serde_json::json!({
        "baseUrl": page.base_url(),
        "rootDomainUrl": page.root_domain_url(),
        "currentUser": page.current_user(),
        "flashMessages": flash_messages,
    });
    // Keep "</script>" in user data from closing the tag early.
    let context_str = context.to_string().replace('<', "\\u003c");
    format!(r#"<script>window.__APP_CONTEXT__ = {};</script>"#, context_str)
}

pub fn inject_context<T: BaseTemplate>(page: &T, html: String) -> Response {
    Html(insert_before_body_end(html, &app_context_script(page))).into_response()
}

/// Inserts `script` before the document's closing `</body>`, the last one in
/// the page. Earlier occurrences belong to page content and stay untouched.
pub fn insert_before_body_end(mut html: String, script: &str) -> String {
    match html.rfind("</body>") {
        Some(idx) => html.insert_str(idx, script),
        None => html.push_str(script),
    }
    html
}

pub fn absolute_url_from_state(state: &AppState, path: &str) -> String {
    crate::utils::absolute_url(&state.public_base_url, path)
}

pub fn plain_html<S: AsRef<str>>(s: S) -> Response {
    Html(format!("<!DOCTYPE html><html><body><p>{}</p></body></html>", s.as_ref())).into_response()
}

pub fn render_template<T: Template + BaseTemplate>(page: T) -> Response {
    match page.render() {
        Ok(body) => inject_context(&page, body),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::PlansTemplate;

    #[test]
    fn context_script_escapes_markup_in_user_data() {
        let user = BillingUser {
            host: "zulip.example.com".into(),
            email: "</script>@example.com".into(),
            full_name: "Iago".into(),
            tos_accepted_at: None,
        };
        let page = PlansTemplate {
            current_user: Some(user.clone()),
            base_url: "http://localhost:8080".into(),
            root_domain_url: "https://zulip.com".into(),
            flash_messages: vec![],
            has_flash_messages: false,
            user,
            csrf_input: String::new(),
        };
        let script = app_context_script(&page);
        assert!(script.starts_with("<script>window.__APP_CONTEXT__ = {"));
        assert_eq!(script.matches("</script>").count(), 1);
        assert!(script.contains(r#""rootDomainUrl":"https://zulip.com""#));
        assert!(script.contains(r#""flashMessages":[]"#));
    }

    #[test]
    fn context_script_carries_flash_messages() {
        let user = BillingUser {
            host: "zulip.example.com".into(),
            email: "iago@example.com".into(),
            full_name: "Iago".into(),
            tos_accepted_at: None,
        };
        let page = PlansTemplate {
            current_user: Some(user.clone()),
            base_url: "http://localhost:8080".into(),
            root_domain_url: "https://zulip.com".into(),
            flash_messages: vec!["Logged in to plan management for zulip.example.com.".into()],
            has_flash_messages: true,
            user,
            csrf_input: String::new(),
        };
        let script = app_context_script(&page);
        assert!(script.contains(r#""flashMessages":["Logged in to plan management for zulip.example.com."]"#));
    }

    #[test]
    fn script_goes_before_the_last_body_end_only() {
        let fragment = r#"<input type="hidden" name="csrfmiddlewaretoken" value="x"></body>"#;
        let html = format!("<html><body><form>{fragment}</form></body></html>");
        let out = insert_before_body_end(html, "<script>ctx</script>");
        assert!(out.contains(&format!("<form>{fragment}</form>")));
        assert!(out.ends_with("<script>ctx</script></body></html>"));
        assert_eq!(out.matches("<script>ctx</script>").count(), 1);
    }

    #[test]
    fn script_is_appended_without_a_body_end() {
        assert_eq!(insert_before_body_end("<p>hi</p>".into(), "<script></script>"), "<p>hi</p><script></script>");
    }
}
