//! Service configuration, loaded from environment variables.

use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

/// Which OrderRepository adapter to wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Scylla,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scylla" => Ok(Self::Scylla),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_host: String,
    pub http_port: u16,
    pub grpc_port: u16,
    pub store: StoreKind,
    pub scylla_node: String,
    pub scylla_keyspace: String,
    pub redpanda_brokers: String,
    pub order_topic: String,
    pub publish_timeout: Duration,
    pub tax_rate: Decimal,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".to_string(),
            http_port: 8000,
            grpc_port: 50051,
            store: StoreKind::default(),
            scylla_node: "127.0.0.1:9042".to_string(),
            scylla_keyspace: "orders_ks".to_string(),
            redpanda_brokers: "127.0.0.1:9092".to_string(),
            order_topic: "orders".to_string(),
            publish_timeout: Duration::from_millis(5000),
            tax_rate: Decimal::new(10, 2),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            http_host: lookup("HTTP_HOST").unwrap_or(defaults.http_host),
            http_port: parse_or(&lookup, "HTTP_PORT", defaults.http_port)?,
            grpc_port: parse_or(&lookup, "GRPC_PORT", defaults.grpc_port)?,
            store: parse_or(&lookup, "ORDER_STORE", defaults.store)?,
            scylla_node: lookup("SCYLLA_NODE").unwrap_or(defaults.scylla_node),
            scylla_keyspace: lookup("SCYLLA_KEYSPACE").unwrap_or(defaults.scylla_keyspace),
            redpanda_brokers: lookup("REDPANDA_BROKERS").unwrap_or(defaults.redpanda_brokers),
            order_topic: lookup("ORDER_TOPIC").unwrap_or(defaults.order_topic),
            publish_timeout: parse_or(&lookup, "PUBLISH_TIMEOUT_MS", 5000u64)
                .map(Duration::from_millis)?,
            tax_rate: parse_or(&lookup, "TAX_RATE", defaults.tax_rate)?,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(ConfigError::Invalid {
                key: key.to_string(),
                value,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.http_port, 8000);
        assert_eq!(config.grpc_port, 50051);
        assert_eq!(config.store, StoreKind::Scylla);
        assert_eq!(config.order_topic, "orders");
        assert_eq!(config.publish_timeout, Duration::from_secs(5));
        assert_eq!(config.tax_rate, Decimal::new(10, 2));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HTTP_PORT", "9000"),
            ("GRPC_PORT", "9001"),
            ("ORDER_STORE", "Memory"),
            ("TAX_RATE", "0.2"),
            ("PUBLISH_TIMEOUT_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.http_port, 9000);
        assert_eq!(config.grpc_port, 9001);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.tax_rate, Decimal::new(2, 1));
        assert_eq!(config.publish_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values() {
        let err = config_from(&[("HTTP_PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for HTTP_PORT: eighty");

        assert!(config_from(&[("ORDER_STORE", "postgres")]).is_err());
    }
}
