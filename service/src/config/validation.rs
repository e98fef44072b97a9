//! Value checks applied after a configuration is deserialized

use super::ServiceConfig;
use linkml_core::error::{LinkMLError, Result};

/// URL schemes accepted for `db_url`
const POSTGRES_SCHEMES: [&str; 2] = ["postgresql", "postgres"];

/// Validate specific configuration values
///
/// # Errors
///
/// Returns `LinkMLError::ConfigError` listing every invalid value:
/// - an empty service name
/// - a zero API or broker port
/// - zero workers
/// - a database URL that is not a PostgreSQL URL
pub fn validate_values(config: &ServiceConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.service_name.trim().is_empty() {
        errors.push("service_name must not be empty".to_string());
    }
    if config.api.port == 0 {
        errors.push("port must be greater than 0".to_string());
    }
    if config.api.workers == 0 {
        errors.push("workers must be greater than 0".to_string());
    }
    if config.pubsub.rabbitmq_port == 0 {
        errors.push("rabbitmq_port must be greater than 0".to_string());
    }

    let scheme = config
        .postgresql
        .db_url
        .expose()
        .split_once("://")
        .map(|(scheme, _)| scheme.split('+').next().unwrap_or(scheme));
    if !scheme.is_some_and(|scheme| POSTGRES_SCHEMES.contains(&scheme)) {
        errors.push("db_url must be a postgresql:// URL".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(LinkMLError::config(format!(
            "Configuration validation failed:\n{}",
            errors
                .iter()
                .map(|e| format!("- {e}"))
                .collect::<Vec<_>>()
                .join("\n")
        )))
    }
}
