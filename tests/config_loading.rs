//! Loading configuration from disk and applying it to a registry.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use authpath::config::watcher::{apply_updates, ConfigWatcher};
use authpath::config::{load_config, ConfigError, ValidationError};
use authpath::SchemeRegistry;
use tokio::sync::mpsc;
use tokio::time::timeout;

mod common;

use common::{bearer_scheme, cookie_scheme, write_temp_config};

#[test]
fn test_load_toml() {
    let path = write_temp_config(
        "toml",
        r#"
        [defaults]
        scheme = "Cookies"
        sign_out = "Bearer"
        "#,
    );
    let config = load_config(&path).unwrap();
    std::fs::remove_file(&path).unwrap_or_default();

    assert_eq!(config.defaults.scheme.as_deref(), Some("Cookies"));
    assert_eq!(config.defaults.sign_out.as_deref(), Some("Bearer"));
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn test_load_json() {
    let path = write_temp_config(
        "json",
        r#"{ "defaults": { "challenge": "Oidc" }, "observability": { "log_level": "debug" } }"#,
    );
    let config = load_config(&path).unwrap();
    std::fs::remove_file(&path).unwrap_or_default();

    assert_eq!(config.defaults.challenge.as_deref(), Some("Oidc"));
    assert_eq!(config.observability.log_level, "debug");
}

#[test]
fn test_invalid_config_rejected() {
    let path = write_temp_config(
        "toml",
        r#"
        [defaults]
        authenticate = ""
        "#,
    );
    let err = load_config(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap_or_default();

    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors, vec![ValidationError::BlankSchemeName("authenticate")]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_syntax_error_reported() {
    let path = write_temp_config("toml", "[defaults\nscheme = ");
    let err = load_config(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap_or_default();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[tokio::test]
async fn test_reloaded_defaults_reach_registry() {
    let registry = Arc::new(SchemeRegistry::default());
    registry.add_scheme(cookie_scheme("Cookies")).unwrap();
    registry.add_scheme(bearer_scheme("Bearer")).unwrap();
    assert!(registry.default_authenticate_scheme().is_none());

    let path = write_temp_config("toml", "[defaults]\nauthenticate = \"Bearer\"\n");
    let config = load_config(&path).unwrap();
    std::fs::remove_file(&path).unwrap_or_default();

    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(apply_updates(registry.clone(), rx));
    tx.send(config).unwrap();
    drop(tx);
    task.await.unwrap();

    assert_eq!(registry.default_authenticate_scheme().unwrap().name(), "Bearer");
    assert!(registry.default_challenge_scheme().is_none());
}

#[tokio::test]
async fn test_watcher_sends_valid_reloads_and_skips_invalid() {
    let path = write_temp_config("toml", "[defaults]\nscheme = \"Cookies\"\n");
    let (watcher, mut rx) = ConfigWatcher::new(&path);
    let _watcher = watcher.run().unwrap();

    std::fs::write(&path, "[defaults]\nscheme = \"Bearer\"\n").unwrap();

    // A rewrite may surface intermediate states (e.g. the truncated file);
    // wait for the final content.
    let reloaded = timeout(Duration::from_secs(10), async {
        loop {
            let config = rx.recv().await.expect("watcher channel closed");
            if config.defaults.scheme.as_deref() == Some("Bearer") {
                return config;
            }
        }
    })
    .await
    .expect("no reload after rewriting the config");
    assert_eq!(reloaded.defaults.scheme.as_deref(), Some("Bearer"));

    // Let trailing events from the rewrite settle, then drain them.
    tokio::time::sleep(Duration::from_millis(500)).await;
    while rx.try_recv().is_ok() {}

    // Appending keeps every on-disk state invalid.
    let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(b"[defaults\n").unwrap();
    file.sync_all().unwrap();
    drop(file);

    let sent = timeout(Duration::from_secs(2), rx.recv()).await;
    std::fs::remove_file(&path).unwrap_or_default();
    assert!(sent.is_err(), "invalid config was sent: {:?}", sent);
}
