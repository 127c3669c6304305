//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

use crate::features::reminders::watcher::{
    WatcherConfig, DEFAULT_NEAR_DEADLINE_MINUTES, DEFAULT_TICK_INTERVAL_SECS,
};
use crate::features::tasks::source::DEFAULT_REQUEST_TIMEOUT_SECS;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_TASKS_FILE: &str = "tasks.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub log_level: String,
    pub tasks_file: String,
    /// Base URL of the task server; takes precedence over `tasks_file`
    pub tasks_url: Option<String>,
    /// Upper bound on one task fetch, for both the HTTP client and the watcher
    pub tasks_timeout_secs: u64,
    pub tick_interval_secs: u64,
    pub near_deadline_minutes: i64,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let tick_interval_secs = match get("TICK_INTERVAL_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid TICK_INTERVAL_SECS: {v}"))?,
            None => DEFAULT_TICK_INTERVAL_SECS,
        };
        if tick_interval_secs == 0 {
            return Err(anyhow!("TICK_INTERVAL_SECS must be greater than zero"));
        }

        let near_deadline_minutes = match get("NEAR_DEADLINE_MINUTES") {
            Some(v) => v
                .trim()
                .parse::<i64>()
                .with_context(|| format!("Invalid NEAR_DEADLINE_MINUTES: {v}"))?,
            None => DEFAULT_NEAR_DEADLINE_MINUTES,
        };
        if near_deadline_minutes <= 0 {
            return Err(anyhow!("NEAR_DEADLINE_MINUTES must be greater than zero"));
        }

        let tasks_timeout_secs = match get("TASKS_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid TASKS_TIMEOUT_SECS: {v}"))?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if tasks_timeout_secs == 0 {
            return Err(anyhow!("TASKS_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            tasks_file: get("TASKS_FILE").unwrap_or_else(|| DEFAULT_TASKS_FILE.to_string()),
            tasks_url: get("TASKS_URL"),
            tasks_timeout_secs,
            tick_interval_secs,
            near_deadline_minutes,
        })
    }

    /// The OpenAI key, or an error explaining how to provide one
    pub fn require_openai_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| anyhow!("OPENAI_API_KEY is not set (add it to the environment or .env)"))
    }

    pub fn tasks_timeout(&self) -> Duration {
        Duration::from_secs(self.tasks_timeout_secs)
    }

    pub fn watcher_config(&self) -> WatcherConfig {
        WatcherConfig {
            tick_interval: Duration::from_secs(self.tick_interval_secs),
            near_deadline: chrono::Duration::minutes(self.near_deadline_minutes),
            refresh_timeout: self.tasks_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.tasks_file, "tasks.json");
        assert_eq!(config.tasks_url, None);
        assert_eq!(config.tick_interval_secs, 60);
        assert_eq!(config.near_deadline_minutes, 10);
        assert_eq!(config.tasks_timeout(), Duration::from_secs(10));
        assert!(config.require_openai_key().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("LOG_LEVEL", "debug"),
            ("TASKS_FILE", "/tmp/tasks.json"),
            ("TASKS_URL", "http://localhost:5000"),
            ("TICK_INTERVAL_SECS", "15"),
            ("NEAR_DEADLINE_MINUTES", "30"),
            ("TASKS_TIMEOUT_SECS", "3"),
        ])
        .unwrap();

        assert_eq!(config.require_openai_key().unwrap(), "sk-test");
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.tasks_file, "/tmp/tasks.json");
        assert_eq!(config.tasks_url.as_deref(), Some("http://localhost:5000"));

        let watcher = config.watcher_config();
        assert_eq!(watcher.tick_interval, Duration::from_secs(15));
        assert_eq!(watcher.near_deadline, chrono::Duration::minutes(30));
        assert_eq!(watcher.refresh_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = config_from(&[("OPENAI_API_KEY", ""), ("TASKS_URL", "  ")]).unwrap();
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.tasks_url, None);
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        assert!(config_from(&[("TICK_INTERVAL_SECS", "soon")]).is_err());
        assert!(config_from(&[("TICK_INTERVAL_SECS", "0")]).is_err());
        assert!(config_from(&[("NEAR_DEADLINE_MINUTES", "-5")]).is_err());
        assert!(config_from(&[("TASKS_TIMEOUT_SECS", "0")]).is_err());
    }
}
