use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::BillingLoginError;
use crate::models::{AppState, ConfirmLoginForm, PendingLogin};
use crate::services::{
    complete_login, confirm_path, csrf_input, ensure_session, login_session, lookup_login, session_id_from_jar,
    verify_csrf, Confirmation,
};
use crate::templates::{ConfirmLoginContext, ConfirmLoginTemplate};

use super::helpers::{absolute_url_from_state, build_template_globals, render_template, TemplateGlobals};

fn confirm_page(state: &AppState, globals: TemplateGlobals, login: PendingLogin, csrf_token: &str) -> ConfirmLoginTemplate {
    let action_url = absolute_url_from_state(state, &confirm_path(&login.token));
    let ctx = ConfirmLoginContext {
        host: login.host,
        user_email: login.user_email,
        user_full_name: login.user_full_name,
        tos_consent_needed: login.tos_consent_needed,
        action_url,
        csrf_input: csrf_input(csrf_token),
        root_domain_url: globals.root_domain_url,
    };
    let mut page = ConfirmLoginTemplate::from_context(ctx, globals.base_url);
    page.current_user = globals.current_user;
    page.flash_messages = globals.flash_messages;
    page.has_flash_messages = globals.has_flash_messages;
    page
}

pub async fn confirm_login_get(
    State(state): State<AppState>,
    Path(token): Path<String>,
    jar: CookieJar,
) -> Result<Response, BillingLoginError> {
    let login = lookup_login(&state, &token)?;
    let (jar, _sid, csrf_token) = ensure_session(&state, jar);
    let globals = build_template_globals(&state, &jar);
    let page = render_template(confirm_page(&state, globals, login, &csrf_token));
    Ok((jar, page).into_response())
}

pub async fn confirm_login_post(
    State(state): State<AppState>,
    Path(token): Path<String>,
    jar: CookieJar,
    Form(form): Form<ConfirmLoginForm>,
) -> Result<Response, BillingLoginError> {
    verify_csrf(&state, session_id_from_jar(&jar).as_deref(), &form.csrfmiddlewaretoken)?;
    match complete_login(&state, &token, &form)? {
        Confirmation::LoggedIn { user, next_page } => {
            let target = next_page.unwrap_or_else(|| state.plan_management_path.clone());
            let jar = login_session(&state, jar, user);
            Ok((jar, Redirect::to(&target)).into_response())
        }
        Confirmation::Rejected { mut login, error } => {
            // Keep what the user typed rather than the name the server sent.
            let typed = form.full_name.trim();
            if !typed.is_empty() {
                login.user_full_name = Some(typed.to_string());
            }
            let globals = build_template_globals(&state, &jar);
            let page = confirm_page(&state, globals, login, &form.csrfmiddlewaretoken).with_error(error);
            Ok((StatusCode::BAD_REQUEST, render_template(page)).into_response())
        }
    }
}
