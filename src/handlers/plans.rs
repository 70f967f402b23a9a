use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::BillingLoginError;
use crate::models::AppState;
use crate::services::{csrf_input, ensure_session};
use crate::templates::PlansTemplate;

use super::helpers::{build_template_globals, render_template, TemplateGlobals};

pub async fn plans_get(State(state): State<AppState>, jar: CookieJar) -> Result<Response, BillingLoginError> {
    let (jar, _sid, csrf_token) = ensure_session(&state, jar);
    let TemplateGlobals {
        current_user,
        base_url,
        root_domain_url,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(&state, &jar);
    let user = current_user.clone().ok_or(BillingLoginError::NotLoggedIn)?;
    let page = render_template(PlansTemplate {
        current_user,
        base_url,
        root_domain_url,
        flash_messages,
        has_flash_messages,
        user,
        csrf_input: csrf_input(&csrf_token),
    });
    Ok((jar, page).into_response())
}
