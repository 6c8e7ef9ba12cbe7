//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => {
                write!(f, "Invalid value for {}: {:?}", var, value)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read and deserialize a TOML file without semantic validation.
pub fn parse_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let config = parse_config(path)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Startup configuration: file (or defaults), then environment overrides,
/// then a single validation pass over the result.
pub fn resolve_config<F>(path: Option<&Path>, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => parse_config(path)?,
        None => RelayConfig::default(),
    };
    apply_env_overrides(&mut config, lookup)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides on top of file or default configuration.
///
/// `lookup` resolves a variable name to its value; pass
/// `|k| std::env::var(k).ok()` for the real process environment.
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(port) = lookup("PORT") {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::Env {
            var: "PORT",
            value: port.clone(),
        })?;
    }

    if let Some(url) = lookup("SHOUT_UPSTREAM_URL") {
        config.upstream.url = url;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_port_defaults_to_5000_when_unset() {
        let mut config = RelayConfig::default();
        apply_env_overrides(&mut config, env(&[])).unwrap();
        assert_eq!(config.listener.port, 5000);
    }

    #[test]
    fn test_port_env_overrides_listener() {
        let mut config = RelayConfig::default();
        apply_env_overrides(&mut config, env(&[("PORT", "8123")])).unwrap();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8123");
    }

    #[test]
    fn test_empty_port_is_ignored() {
        let mut config = RelayConfig::default();
        apply_env_overrides(&mut config, env(&[("PORT", "")])).unwrap();
        assert_eq!(config.listener.port, 5000);
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        let mut config = RelayConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "PORT", .. }));
    }

    #[test]
    fn test_upstream_url_override() {
        let mut config = RelayConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("SHOUT_UPSTREAM_URL", "http://127.0.0.1:9999/V1/SHOUT")]),
        )
        .unwrap();
        assert_eq!(config.upstream.url, "http://127.0.0.1:9999/V1/SHOUT");
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("shout-relay-{}.toml", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[keepalive]\ninterval_secs = 5\n\n[observability]\nlog_format = \"json\"").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.keepalive.interval_secs, 5);
        assert_eq!(config.observability.log_format, "json");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let path = std::env::temp_dir().join(format!("shout-relay-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[upstream]\nurl = \"not a url\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errs) if errs.len() == 1));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_env_override_can_repair_file_value() {
        let path = std::env::temp_dir().join(format!("shout-relay-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[upstream]\nurl = \"not a url\"\n").unwrap();

        let config = resolve_config(
            Some(&path),
            env(&[("SHOUT_UPSTREAM_URL", "http://127.0.0.1:9999/V1/SHOUT")]),
        )
        .unwrap();
        assert_eq!(config.upstream.url, "http://127.0.0.1:9999/V1/SHOUT");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_resolve_validates_after_overrides() {
        let err = resolve_config(None, env(&[("SHOUT_UPSTREAM_URL", "ftp://nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errs) if errs[0].field == "upstream.url"));
    }

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let config = resolve_config(None, env(&[("PORT", "7000")])).unwrap();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:7000");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/shout-relay.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
