use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

/// Stylesheet compiled into the binary; `--stylesheet` can replace it.
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

pub fn build_router(state: AppState) -> Router {
    let plan_routes = Router::new()
        .route(&state.plan_management_path, get(handlers::plans::plans_get))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            handlers::middleware::require_billing_session,
        ));

    let stylesheet_content = state.custom_css.clone().unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    let static_routes = Router::new()
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet_content.clone();
                async move { ([(CONTENT_TYPE, "text/css")], css) }
            }),
        )
        .layer(ServiceBuilder::new().layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        )));

    Router::new()
        .route(
            "/api/v1/billing/login-requests",
            post(handlers::login_requests::create_login_request),
        )
        .route(
            "/billing/login/:token/confirm",
            get(handlers::billing_login::confirm_login_get).post(handlers::billing_login::confirm_login_post),
        )
        .route("/logout", post(handlers::auth::logout_post))
        .merge(plan_routes)
        .merge(static_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
