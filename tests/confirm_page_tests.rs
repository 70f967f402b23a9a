use askama::Template;
use billing_login::services::csrf_input;
use billing_login::templates::{ConfirmLoginContext, ConfirmLoginTemplate};

const CSRF_TOKEN: &str = "3f1c0a9b7d2e4f6a8c0b1d3e5f7a9c1b3d5e7f9a1c3e5a7b9d1f3a5c7e9b1d3f";

fn context() -> ConfirmLoginContext {
    ConfirmLoginContext {
        host: "zulip.example.com".into(),
        user_email: "iago@zulip.com".into(),
        user_full_name: Some("Iago Zulip".into()),
        tos_consent_needed: true,
        action_url: "https://billing.example.com/billing/login/abc123/confirm".into(),
        csrf_input: csrf_input(CSRF_TOKEN),
        root_domain_url: "https://zulip.com".into(),
    }
}

fn render(ctx: ConfirmLoginContext) -> String {
    ConfirmLoginTemplate::from_context(ctx, "https://billing.example.com".into())
        .render()
        .unwrap()
}

/// Decode the entities askama's HTML escaper may emit inside attributes.
fn decode_attr(raw: &str) -> String {
    raw.replace("&#x2f;", "/")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Value of `attr` on the first tag that contains `marker`.
fn attr_of_tag(html: &str, marker: &str, attr: &str) -> Option<String> {
    let at = html.find(marker)?;
    let start = html[..at].rfind('<')?;
    let end = at + html[at..].find('>')?;
    let tag = &html[start..end];
    let needle = format!(" {}=\"", attr);
    let value_start = tag.find(&needle)? + needle.len();
    let value_len = tag[value_start..].find('"')?;
    Some(decode_attr(&tag[value_start..value_start + value_len]))
}

#[test]
fn consent_checkbox_rendered_when_needed() {
    let html = render(context());
    assert!(html.contains(r#"type="checkbox" name="tos_consent""#));
    assert!(html.contains("Terms of Service"));
    assert_eq!(
        attr_of_tag(&html, r#"target="_blank""#, "href").as_deref(),
        Some("https://zulip.com/policies/terms")
    );
}

#[test]
fn consent_checkbox_absent_when_not_needed() {
    let mut ctx = context();
    ctx.tos_consent_needed = false;
    let html = render(ctx);
    assert!(!html.contains("tos_consent"));
    assert!(!html.contains("type=\"checkbox\""));
    assert!(!html.contains("/policies/terms"));
}

#[test]
fn full_name_prefilled_exactly() {
    let html = render(context());
    assert_eq!(
        attr_of_tag(&html, r#"name="full_name""#, "value").as_deref(),
        Some("Iago Zulip")
    );
}

#[test]
fn full_name_with_markup_is_escaped_but_round_trips() {
    let mut ctx = context();
    ctx.user_full_name = Some(r#"Iago "<i>" O'Zulip"#.into());
    let html = render(ctx);
    assert!(!html.contains("<i>"));
    assert_eq!(
        attr_of_tag(&html, r#"name="full_name""#, "value").as_deref(),
        Some(r#"Iago "<i>" O'Zulip"#)
    );
}

#[test]
fn full_name_input_empty_without_a_name() {
    let mut ctx = context();
    ctx.user_full_name = None;
    let html = render(ctx);
    assert_eq!(attr_of_tag(&html, r#"name="full_name""#, "value"), None);
    assert!(html.contains(r#"name="full_name""#));
}

#[test]
fn form_action_equals_action_url() {
    let ctx = context();
    let expected = ctx.action_url.clone();
    let html = render(ctx);
    assert_eq!(
        attr_of_tag(&html, r#"id="billing-confirm-login-form""#, "action"),
        Some(expected)
    );
    assert!(html.contains(r#"method="post""#));
}

#[test]
fn csrf_input_included_unmodified() {
    let ctx = context();
    let fragment = ctx.csrf_input.clone();
    let html = render(ctx);
    assert!(html.contains(&fragment));
    let form_start = html.find("<form").unwrap();
    let form_end = html.find("</form>").unwrap();
    let at = html.find(&fragment).unwrap();
    assert!(form_start < at && at < form_end);
}

#[test]
fn page_shows_email_host_and_loading_submit() {
    let html = render(context());
    assert!(html.contains("iago@zulip.com"));
    assert!(html.contains("Log in to plan management for zulip.example.com"));
    assert!(html.contains(r#"type="submit""#));
    assert!(html.contains("billing-confirm-login-button-loader"));
    assert!(html.contains(r#"classList.add("loading")"#));
}

#[test]
fn page_uses_shared_layout() {
    let html = render(context());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"/static/styles.css">"#));
    assert!(html.contains("<title>Log in to plan management for zulip.example.com</title>"));
}

#[test]
fn error_message_rendered_above_form() {
    let page = ConfirmLoginTemplate::from_context(context(), String::new())
        .with_error("You must accept the Terms of Service to proceed.");
    let html = page.render().unwrap();
    let alert = html.find("You must accept the Terms of Service to proceed.").unwrap();
    assert!(alert < html.find("<form").unwrap());
}
