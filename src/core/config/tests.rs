use super::*;
use crate::core::app::session::Theme;
use crate::core::providers::Provider;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_from_path(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        backend_url: Some("https://qchat.example.com".into()),
        default_model: Some("Anthropic".into()),
        theme: Some(Theme::Dark),
        reasoning: Some(true),
        request_timeout_secs: Some(30),
    };
    config.save_to_path(&path).unwrap();

    let loaded = Config::load(Some(&path)).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.default_provider(), Provider::Anthropic);
    assert_eq!(loaded.theme_or_default(), Theme::Dark);
    assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn theme_is_written_in_lowercase() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let config = Config {
        theme: Some(Theme::Dark),
        ..Config::default()
    };
    config.save_to_path(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("theme = \"dark\""));
}

#[test]
fn parse_errors_name_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "backend_url = [not toml").unwrap();

    let err = Config::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at "));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn backend_url_precedence() {
    let config = Config {
        backend_url: Some("http://from-file:9000/".into()),
        ..Config::default()
    };

    assert_eq!(
        config.resolve_backend_url_with(Some("http://flag:1"), Some("http://env:2")),
        "http://flag:1"
    );
    assert_eq!(
        config.resolve_backend_url_with(None, Some("http://env:2/")),
        "http://env:2"
    );
    assert_eq!(
        config.resolve_backend_url_with(None, Some("  ")),
        "http://from-file:9000"
    );
    assert_eq!(
        Config::default().resolve_backend_url_with(None, None),
        DEFAULT_BACKEND_URL
    );
}

#[test]
fn invalid_default_model_falls_back() {
    let config = Config {
        default_model: Some("Llama".into()),
        ..Config::default()
    };
    assert_eq!(config.default_provider(), Provider::Gemini);

    let config = Config {
        default_model: Some("mistral".into()),
        ..Config::default()
    };
    assert_eq!(config.default_provider(), Provider::Mistral);
}

#[test]
fn zero_timeout_means_transport_default() {
    let config = Config {
        request_timeout_secs: Some(0),
        ..Config::default()
    };
    assert_eq!(config.request_timeout(), None);
    assert_eq!(Config::default().request_timeout(), None);
}
