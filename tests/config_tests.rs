use ft_seed::config;

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("http://localhost:3001/", config::DEFAULT_API_URL),
        "http://localhost:3001"
    );
}

#[test]
fn test_sanitize_base_url_no_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("http://localhost:3001", config::DEFAULT_API_URL),
        "http://localhost:3001"
    );
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("http://localhost:3001///", config::DEFAULT_API_URL),
        "http://localhost:3001"
    );
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(
        config::sanitize_base_url("  http://localhost:3001/  ", config::DEFAULT_API_URL),
        "http://localhost:3001"
    );
}

#[test]
fn test_sanitize_base_url_empty_string_falls_back() {
    assert_eq!(
        config::sanitize_base_url("", config::DEFAULT_BACKEND_URL),
        "http://localhost:3000"
    );
}

#[test]
fn test_sanitize_base_url_whitespace_only_falls_back() {
    assert_eq!(
        config::sanitize_base_url("   ", config::DEFAULT_API_URL),
        "http://localhost:3001"
    );
}

#[test]
fn test_backend_url_env_override() {
    std::env::set_var("SEED_BACKEND_URL", "http://backend.test:9000/");
    assert_eq!(config::get_backend_url(), "http://backend.test:9000");
    assert_eq!(config::resolve_backend_url(None), "http://backend.test:9000");
    // an explicitly passed flag wins even when it spells out the default
    assert_eq!(
        config::resolve_backend_url(Some(config::DEFAULT_BACKEND_URL)),
        config::DEFAULT_BACKEND_URL
    );
    std::env::remove_var("SEED_BACKEND_URL");
    assert_eq!(config::get_backend_url(), config::DEFAULT_BACKEND_URL);
}

#[test]
fn test_api_url_env_override() {
    std::env::set_var("SEED_API_URL", "http://api.test:9001");
    assert_eq!(config::get_api_url(), "http://api.test:9001");
    assert_eq!(
        config::resolve_api_url(Some("http://flag.test:9002/")),
        "http://flag.test:9002"
    );
    assert_eq!(config::resolve_api_url(None), "http://api.test:9001");
    std::env::remove_var("SEED_API_URL");
    assert_eq!(config::get_api_url(), config::DEFAULT_API_URL);
}
