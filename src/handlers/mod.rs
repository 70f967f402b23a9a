pub mod auth;
pub mod billing_login;
pub mod helpers;
pub mod login_requests;
pub mod middleware;
pub mod plans;
