use std::collections::HashMap;
use std::time::Duration;
use taleweaver_models::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use taleweaver_server::{DEFAULT_PORT, ServerConfig};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_missing_api_key_is_an_error() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "9000")])).unwrap_err();
    assert_eq!(err.variable, Some("GOOGLE_API_KEY"));
}

#[test]
fn test_blank_api_key_counts_as_missing() {
    assert!(ServerConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "   ")])).is_err());
}

#[test]
fn test_defaults() {
    let config = ServerConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "secret")])).unwrap();
    assert_eq!(config.api_key(), "secret");
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), DEFAULT_PORT);
    assert_eq!(config.model(), DEFAULT_MODEL);
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    assert_eq!(*config.timeout(), Duration::from_secs(120));
    assert_eq!(
        config.allowed_origins(),
        &vec![
            "http://localhost:5173".to_string(),
            "http://localhost:3000".to_string()
        ]
    );
    assert_eq!(config.max_sessions().get(), 1024);
}

#[test]
fn test_gemini_api_key_fallback() {
    let config = ServerConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "fallback")])).unwrap();
    assert_eq!(config.api_key(), "fallback");

    let config = ServerConfig::from_lookup(lookup(&[
        ("GOOGLE_API_KEY", "primary"),
        ("GEMINI_API_KEY", "fallback"),
    ]))
    .unwrap();
    assert_eq!(config.api_key(), "primary");
}

#[test]
fn test_overrides() {
    let config = ServerConfig::from_lookup(lookup(&[
        ("GOOGLE_API_KEY", "secret"),
        ("HOST", "127.0.0.1"),
        ("PORT", "9000"),
        ("GEMINI_MODEL", "gemini-1.5-pro"),
        ("GEMINI_TIMEOUT_SECS", "30"),
        ("STORY_ALLOWED_ORIGINS", " https://a.example , ,https://b.example"),
        ("STORY_MAX_SESSIONS", "8"),
    ]))
    .unwrap();

    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 9000);
    assert_eq!(config.model(), "gemini-1.5-pro");
    assert_eq!(*config.timeout(), Duration::from_secs(30));
    assert_eq!(
        config.allowed_origins(),
        &vec!["https://a.example".to_string(), "https://b.example".to_string()]
    );
    assert_eq!(config.max_sessions().get(), 8);

    let gemini = config.gemini_config().unwrap();
    assert_eq!(gemini.model(), "gemini-1.5-pro");
    assert_eq!(*gemini.timeout(), Duration::from_secs(30));
}

#[test]
fn test_invalid_numbers_are_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "k"), ("PORT", "eighty")]))
        .unwrap_err();
    assert_eq!(err.variable, Some("PORT"));
    assert!(err.message.contains("eighty"));

    let err =
        ServerConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "k"), ("STORY_MAX_SESSIONS", "0")]))
            .unwrap_err();
    assert_eq!(err.variable, Some("STORY_MAX_SESSIONS"));
    assert!(
        ServerConfig::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "k"),
            ("GEMINI_TIMEOUT_SECS", "-1")
        ]))
        .is_err()
    );
}

#[test]
fn test_debug_redacts_api_key() {
    let config = ServerConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "hunter2")])).unwrap();
    let debug = format!("{:?}", config);
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("<redacted>"));
}
