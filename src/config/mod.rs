use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
    #[serde(default)]
    pub telemetry_enabled: bool,
    #[serde(default = "default_telemetry_service_name")]
    pub telemetry_service_name: String,
    #[serde(default = "default_telemetry_service_version")]
    pub telemetry_service_version: String,
    #[serde(default = "default_telemetry_environment")]
    pub telemetry_environment: String,
    #[serde(default = "default_telemetry_otlp_endpoint")]
    pub telemetry_otlp_endpoint: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_seed_sample_data() -> bool {
    true
}

fn default_event_channel_capacity() -> usize {
    64
}

fn default_telemetry_service_name() -> String {
    "demohub-notifications".to_string()
}

fn default_telemetry_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_telemetry_environment() -> String {
    "production".to_string()
}

fn default_telemetry_otlp_endpoint() -> String {
    "http://otel-collector.observability.svc.cluster.local:4317".to_string()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Self::environment())
    }

    /// Un-prefixed variables: `BIND_ADDR`, `SEED_SAMPLE_DATA`, ...
    fn environment() -> Environment {
        Environment::default()
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        if config.event_channel_capacity == 0 {
            return Err(ConfigError::Message(
                "event_channel_capacity must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::environment().source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_environment(environment(&[])).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(config.seed_sample_data);
        assert_eq!(config.event_channel_capacity, 64);
        assert!(!config.telemetry_enabled);
        assert_eq!(config.telemetry_service_name, "demohub-notifications");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_environment(environment(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("SEED_SAMPLE_DATA", "false"),
            ("EVENT_CHANNEL_CAPACITY", "8"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert!(!config.seed_sample_data);
        assert_eq!(config.event_channel_capacity, 8);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = AppConfig::from_environment(environment(&[("EVENT_CHANNEL_CAPACITY", "0")]));
        assert!(result.is_err());
    }
}
