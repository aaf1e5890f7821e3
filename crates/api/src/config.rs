//! Startup configuration from environment variables.
//!
//! Values are read once. Anything missing or unparsable falls back to the
//! default and is logged.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DB_PATH_VAR: &str = "CANDYSTOCK_DB_PATH";
pub const BIND_ADDR_VAR: &str = "CANDYSTOCK_BIND_ADDR";
pub const FEED_INTERVAL_VAR: &str = "CANDYSTOCK_FEED_INTERVAL_SECS";
pub const MAX_CONNECTIONS_VAR: &str = "CANDYSTOCK_MAX_CONNECTIONS";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub bind_addr: String,
    pub feed_interval: Duration,
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("challenge.db"),
            bind_addr: "0.0.0.0:4567".to_string(),
            feed_interval: Duration::from_secs(5),
            max_connections: 5,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let db_path = lookup(DB_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let bind_addr = lookup(BIND_ADDR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.bind_addr);

        let feed_secs = parse_or(&lookup, FEED_INTERVAL_VAR, 5u64, |secs| *secs >= 1);
        let max_connections = parse_or(&lookup, MAX_CONNECTIONS_VAR, defaults.max_connections, |n| *n >= 1);

        Self {
            db_path,
            bind_addr,
            feed_interval: Duration::from_secs(feed_secs),
            max_connections,
        }
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            tracing::warn!(key, value = %raw, %default, "invalid configuration value; using default");
            default
        }
    }
}
