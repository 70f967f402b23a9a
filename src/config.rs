use std::env;
use std::path::Path;

use thiserror::Error;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PUBLIC_BASE_URL: &str = "";
pub const DEFAULT_ROOT_DOMAIN_URL: &str = "";
pub const DEFAULT_API_TOKEN: &str = "";
pub const DEFAULT_LOGIN_TOKEN_TTL_SECS: i64 = 3600;
/// Thirty days.
pub const MAX_LOGIN_TOKEN_TTL_SECS: i64 = 30 * 24 * 3600;
pub const DEFAULT_SESSION_TTL_SECS: i64 = 12 * 3600;
pub const DEFAULT_PLAN_MANAGEMENT_PATH: &str = "/plans/";

const FALLBACK_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LOGIN_TOKEN_TTL_SECS must be an integer between 1 and 2592000, got {0:?}")]
    InvalidTtl(String),

    #[error("PLAN_MANAGEMENT_PATH must start with '/', got {0:?}")]
    InvalidPlanManagementPath(String),
}

/// Settings the web server reads from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub public_base_url: String,
    pub root_domain_url: String,
    pub api_token: String,
    pub login_token_ttl_secs: i64,
    pub plan_management_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            public_base_url: get_public_base_url(),
            root_domain_url: get_root_domain_url(),
            api_token: get_api_token(),
            login_token_ttl_secs: get_login_token_ttl_secs()?,
            plan_management_path: get_plan_management_path()?,
        })
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_public_base_url() -> String {
    sanitize_base_url(&env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()))
}

pub fn get_root_domain_url() -> String {
    sanitize_base_url(&env::var("ROOT_DOMAIN_URL").unwrap_or_else(|_| DEFAULT_ROOT_DOMAIN_URL.to_string()))
}

pub fn get_api_token() -> String {
    env::var("API_TOKEN")
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

pub fn get_login_token_ttl_secs() -> Result<i64, ConfigError> {
    match env::var("LOGIN_TOKEN_TTL_SECS") {
        Ok(raw) => parse_ttl(&raw),
        Err(_) => Ok(DEFAULT_LOGIN_TOKEN_TTL_SECS),
    }
}

pub fn get_plan_management_path() -> Result<String, ConfigError> {
    let raw = env::var("PLAN_MANAGEMENT_PATH").unwrap_or_else(|_| DEFAULT_PLAN_MANAGEMENT_PATH.to_string());
    let trimmed = raw.trim();
    if !trimmed.starts_with('/') || trimmed.starts_with("//") {
        return Err(ConfigError::InvalidPlanManagementPath(raw));
    }
    Ok(trimmed.to_string())
}

pub fn parse_ttl(raw: &str) -> Result<i64, ConfigError> {
    match raw.trim().parse::<i64>() {
        Ok(secs) if secs > 0 && secs <= MAX_LOGIN_TOKEN_TTL_SECS => Ok(secs),
        _ => Err(ConfigError::InvalidTtl(raw.to_string())),
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        FALLBACK_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
