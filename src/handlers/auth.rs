use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::BillingLoginError;
use crate::models::AppState;
use crate::services::{logout_session, session_id_from_jar, verify_csrf};

#[derive(Deserialize)]
pub struct LogoutForm {
    #[serde(default)]
    pub csrfmiddlewaretoken: String,
}

pub async fn logout_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LogoutForm>,
) -> Result<impl IntoResponse, BillingLoginError> {
    verify_csrf(&state, session_id_from_jar(&jar).as_deref(), &form.csrfmiddlewaretoken)?;
    let cleared = logout_session(&state, jar);
    Ok((cleared, Redirect::to(&state.root_domain_url)))
}
