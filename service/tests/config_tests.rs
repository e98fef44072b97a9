//! Tests for the microservice configuration

use ghga_metadata_utils::config::{
    ConfigLoader, DEFAULT_PREFIX, LogLevel, ServiceConfig, SupportedLanguages,
};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

const REQUIRED_YAML: &str = r"
db_url: postgresql://user:secret@db:5432/metadata
s3_endpoint_url: http://localstack:4566
s3_access_key_id: test
s3_secret_access_key: test-secret
";

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Loader isolated from the process environment and the real home directory
fn loader(home: &TempDir, pairs: &[(&str, &str)]) -> ConfigLoader {
    ConfigLoader::new(DEFAULT_PREFIX)
        .with_env(env(pairs))
        .with_home(Some(home.path().to_path_buf()))
}

#[test]
fn test_home_file_with_defaults() {
    let home = TempDir::new().expect("temp dir");
    fs::write(home.path().join(".my_microservice.yaml"), REQUIRED_YAML).expect("write config");

    let config = loader(&home, &[]).load().expect("config should load");

    assert_eq!(config.service_name, "my_microservice");
    assert_eq!(config.language, SupportedLanguages::Croatian);
    assert_eq!(config.api.host, "127.0.0.1");
    assert_eq!(config.api.port, 8080);
    assert_eq!(config.api.log_level, LogLevel::Info);
    assert_eq!(config.api.workers, 1);
    assert_eq!(config.pubsub.rabbitmq_host, "rabbitmq");
    assert_eq!(config.pubsub.rabbitmq_port, 5672);
    assert_eq!(
        config.postgresql.db_url.expose(),
        "postgresql://user:secret@db:5432/metadata"
    );
    assert!(config.s3.s3_session_token.is_none());
}

#[test]
fn test_environment_overrides_file() {
    let home = TempDir::new().expect("temp dir");
    fs::write(home.path().join(".my_microservice.yaml"), REQUIRED_YAML).expect("write config");

    let config = loader(
        &home,
        &[
            ("MY_MICROSERVICE_LANGUAGE", "Greek"),
            ("MY_MICROSERVICE_PORT", "9090"),
            ("MY_MICROSERVICE_LOG_LEVEL", "debug"),
            ("MY_MICROSERVICE_S3_ACCESS_KEY_ID", "12345"),
        ],
    )
    .load()
    .expect("config should load");

    assert_eq!(config.language, SupportedLanguages::Greek);
    assert_eq!(config.api.port, 9090);
    assert_eq!(config.api.log_level, LogLevel::Debug);
    // Numeric-looking text stays text
    assert_eq!(config.s3.s3_access_key_id, "12345");
}

#[test]
fn test_config_yaml_variable_and_substitution() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("service.yaml");
    fs::write(
        &path,
        format!("{REQUIRED_YAML}rabbitmq_host: ${{BROKER_HOST:-localhost}}\nworkers: ${{WORKERS:-4}}\n"),
    )
    .expect("write config");
    let path_text = path.display().to_string();

    let config = loader(
        &dir,
        &[
            ("MY_MICROSERVICE_CONFIG_YAML", path_text.as_str()),
            ("BROKER_HOST", "broker.internal"),
        ],
    )
    .load()
    .expect("config should load");

    assert_eq!(config.pubsub.rabbitmq_host, "broker.internal");
    assert_eq!(config.api.workers, 4);
}

#[test]
fn test_environment_only() {
    let home = TempDir::new().expect("temp dir");
    let config = loader(
        &home,
        &[
            ("MY_MICROSERVICE_DB_URL", "postgres://localhost/metadata"),
            ("MY_MICROSERVICE_S3_ENDPOINT_URL", "http://localhost:4566"),
            ("MY_MICROSERVICE_S3_ACCESS_KEY_ID", "key"),
            ("MY_MICROSERVICE_S3_SECRET_ACCESS_KEY", "secret"),
        ],
    )
    .load()
    .expect("config should load without a file");

    assert_eq!(config.s3.s3_endpoint_url, "http://localhost:4566");
    assert_eq!(config.s3.s3_secret_access_key.expose(), "secret");
}

#[test]
fn test_missing_required_field() {
    let home = TempDir::new().expect("temp dir");
    let err = loader(&home, &[]).load().expect_err("db_url is required");
    assert!(err.to_string().contains("db_url"), "{err}");
}

#[test]
fn test_invalid_values_are_collected() {
    let home = TempDir::new().expect("temp dir");
    fs::write(
        home.path().join(".my_microservice.yaml"),
        format!("{REQUIRED_YAML}service_name: ''\nworkers: 0\n").replace("postgresql://", "mysql://"),
    )
    .expect("write config");

    let message = loader(&home, &[])
        .load()
        .expect_err("values are invalid")
        .to_string();

    assert!(message.contains("service_name must not be empty"), "{message}");
    assert!(message.contains("workers must be greater than 0"), "{message}");
    assert!(message.contains("db_url must be a postgresql:// URL"), "{message}");
}

#[test]
fn test_unknown_language_is_rejected() {
    let home = TempDir::new().expect("temp dir");
    fs::write(home.path().join(".my_microservice.yaml"), REQUIRED_YAML).expect("write config");

    let result = loader(&home, &[("MY_MICROSERVICE_LANGUAGE", "Klingon")]).load();
    assert!(result.is_err());
}

#[test]
fn test_dump_masks_secrets() {
    let home = TempDir::new().expect("temp dir");
    fs::write(home.path().join(".my_microservice.yaml"), REQUIRED_YAML).expect("write config");

    let config: ServiceConfig = loader(&home, &[]).load().expect("config should load");
    let dump = serde_yaml::to_string(&config).expect("serializes");

    assert!(dump.contains("service_name: my_microservice"));
    assert!(dump.contains("port: 8080"));
    assert!(!dump.contains("user:secret"));
    assert!(!dump.contains("test-secret"));
}
