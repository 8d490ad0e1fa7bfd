//! Configuration loading from disk and process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides the listening port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("PORT must be a port number, got `{0}`")]
    InvalidPort(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServiceConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply a `PORT`-style override. Empty values are treated as unset.
pub fn apply_port_env(
    mut config: ServiceConfig,
    value: Option<String>,
) -> Result<ServiceConfig, ConfigError> {
    if let Some(raw) = value.filter(|v| !v.trim().is_empty()) {
        config.listener.port = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort(raw.clone()))?;
    }
    Ok(config)
}

/// Resolve the effective configuration.
///
/// Precedence, lowest to highest: built-in defaults, the optional TOML file,
/// the `PORT` environment variable, then an explicit port argument.
pub fn resolve_config(
    path: Option<&Path>,
    port: Option<u16>,
) -> Result<ServiceConfig, ConfigError> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    let mut config = apply_port_env(config, std::env::var(PORT_ENV).ok())?;
    if let Some(port) = port {
        config.listener.port = port;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_env_override() {
        let config = apply_port_env(ServiceConfig::default(), Some("8088".into())).unwrap();
        assert_eq!(config.listener.port, 8088);
    }

    #[test]
    fn test_empty_port_env_keeps_default() {
        let config = apply_port_env(ServiceConfig::default(), Some("  ".into())).unwrap();
        assert_eq!(config.listener.port, 3000);

        let config = apply_port_env(ServiceConfig::default(), None).unwrap();
        assert_eq!(config.listener.port, 3000);
    }

    #[test]
    fn test_invalid_port_env_is_rejected() {
        let err = apply_port_env(ServiceConfig::default(), Some("http".into())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref v) if v == "http"));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("inspector-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[listener]\nport = 4100\n[limits]\nmax_body_bytes = 1024\n").unwrap();

        let config = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.listener.port, 4100);
        assert_eq!(config.limits.max_body_bytes, 1024);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let path = std::env::temp_dir().join(format!("inspector-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[limits]\nmax_body_bytes = 0\n").unwrap();

        let err = load_config(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("max_body_bytes"));
    }
}
