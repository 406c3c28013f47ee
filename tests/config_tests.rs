use std::fs;

use coinpulse::app::config::{Config, StoreFormat};
use coinpulse::app::{build_sampler, App};
use coinpulse::domain::Grouping;
use coinpulse::error::{ConfigError, Error};
use rust_decimal_macros::dec;

fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("coinpulse.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn loads_full_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[api]
base_url = "http://127.0.0.1:9000"
timeout_ms = 2500

[sampler]
interval_secs = 120
notify_threshold_pct = 0.75

[store]
path = "state"
format = "jsonl"

[notifier]
webhook_base = "https://hooks.example.test/bots"
notify_failures = true

[display]
currency = "EUR"
grouping = "western"

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::load(&path).unwrap();

    assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
    assert_eq!(config.api.timeout_ms, 2500);
    assert_eq!(config.sampler.interval_secs, 120);
    assert_eq!(config.sampler.notify_threshold_pct, dec!(0.75));
    assert_eq!(config.store.format, StoreFormat::Jsonl);
    assert_eq!(
        config.notifier.webhook_base.as_deref(),
        Some("https://hooks.example.test/bots")
    );
    assert!(config.notifier.notify_failures);
    assert_eq!(config.display.currency, "EUR");
    assert_eq!(config.display.grouping, Grouping::Western);
    assert_eq!(config.logging.format, "json");
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.sampler.interval_secs, 300);
    assert_eq!(config.store.format, StoreFormat::Document);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[sampler\ninterval_secs = 5\n");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn unknown_store_format_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[store]\nformat = \"sqlite\"\n");

    assert!(Config::load(&path).is_err());
}

#[test]
fn invalid_webhook_base_is_rejected() {
    let result = Config::from_toml("[notifier]\nwebhook_base = \"not a url\"\n");

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "webhook_base",
            ..
        }))
    ));
}

#[tokio::test]
async fn jsonl_config_builds_a_working_sampler() {
    let dir = tempfile::tempdir().unwrap();
    let store_dir = dir.path().join("state");
    let path = write_config(
        &dir,
        &format!(
            "[store]\npath = {:?}\nformat = \"jsonl\"\n",
            store_dir.display().to_string()
        ),
    );

    let config = Config::load(&path).unwrap();
    let sampler = build_sampler(&config).unwrap();

    assert!(store_dir.is_dir());
    assert!(sampler.state().is_some());
}

#[tokio::test]
async fn run_once_against_unreachable_api_fails_without_logging() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("db.json");
    let path = write_config(
        &dir,
        &format!(
            "[api]\nbase_url = \"http://127.0.0.1:1\"\ntimeout_ms = 500\nconnect_timeout_ms = 200\n\n[store]\npath = {:?}\n",
            db.display().to_string()
        ),
    );

    let config = Config::load(&path).unwrap();
    let err = App::run_once(config).await.unwrap_err();

    assert!(err.is_network());
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&db).unwrap()).unwrap();
    assert_eq!(raw["logs"].as_array().map(Vec::len), Some(0));
}
