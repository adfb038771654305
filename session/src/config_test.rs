use super::*;

#[test]
fn blank_or_missing_base_url_uses_default() {
    assert_eq!(ApiConfig::new(None).base_url(), DEFAULT_API_BASE_URL);
    assert_eq!(ApiConfig::new(Some("   ")).base_url(), DEFAULT_API_BASE_URL);
    assert_eq!(ApiConfig::default().base_url(), DEFAULT_API_BASE_URL);
}

#[test]
fn trailing_slashes_are_trimmed() {
    assert_eq!(ApiConfig::new(Some("https://api.example.test/v1//")).base_url(), "https://api.example.test/v1");
}

#[test]
fn url_joins_with_single_slash() {
    let cfg = ApiConfig::new(Some("https://api.example.test/"));
    assert_eq!(cfg.url("/auth/me"), "https://api.example.test/auth/me");
    assert_eq!(cfg.url("auth/me"), "https://api.example.test/auth/me");
}

#[test]
fn relative_default_joins_same_origin_paths() {
    assert_eq!(ApiConfig::default().url("/auth/login"), "/api/auth/login");
}
