use std::env;
use std::path::Path;
use std::time::Duration;

// Default configuration constants
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_PROBE_INTERVAL_SECS: u64 = 2;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const USER_AGENT: &str = concat!("ft-seed/", env!("CARGO_PKG_VERSION"));

/// Username/password pairs provisioned on every run.
pub const SEED_USERS: [(&str, &str); 4] = [
    ("alice", "pass"),
    ("bob", "pass"),
    ("chloe", "pass"),
    ("dante", "pass"),
];

/// Identifier stored when creation failed and the fallback scan found no match.
pub const SENTINEL_ID: &str = "0";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_backend_url() -> String {
    sanitize_base_url(
        &env::var("SEED_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
        DEFAULT_BACKEND_URL,
    )
}

pub fn get_api_url() -> String {
    sanitize_base_url(
        &env::var("SEED_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        DEFAULT_API_URL,
    )
}

/// Flag beats environment beats default. `flag` is `Some` only when the
/// option was actually passed, so an explicit value identical to the
/// default still wins over the environment.
pub fn resolve_backend_url(flag: Option<&str>) -> String {
    match flag {
        Some(raw) => sanitize_base_url(raw, DEFAULT_BACKEND_URL),
        None => get_backend_url(),
    }
}

pub fn resolve_api_url(flag: Option<&str>) -> String {
    match flag {
        Some(raw) => sanitize_base_url(raw, DEFAULT_API_URL),
        None => get_api_url(),
    }
}

pub fn sanitize_base_url(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
