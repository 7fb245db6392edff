use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::display::MAX_PROCESS_ROWS;
use crate::{Result, SysmonError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

pub const LATEST_PATH: &str = "/api/latest";
pub const METRICS_PATH: &str = "/api/metrics";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    pub max_rows: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_rows: MAX_PROCESS_ROWS,
        }
    }
}

impl PollerConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Load a JSON config file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(SysmonError::Config("base_url must not be empty".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(SysmonError::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(SysmonError::Config(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Join an API path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PollerConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.max_rows, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_join() {
        let config = PollerConfig::new("http://monitor.local:8080/");
        assert_eq!(config.endpoint(LATEST_PATH), "http://monitor.local:8080/api/latest");
        assert_eq!(config.endpoint(METRICS_PATH), "http://monitor.local:8080/api/metrics");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PollerConfig =
            serde_json::from_str(r#"{"base_url": "http://10.0.0.5:8080"}"#).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:8080");
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = PollerConfig {
            poll_interval_ms: 0,
            ..PollerConfig::default()
        };
        assert!(matches!(config.validate(), Err(SysmonError::Config(_))));

        let config = PollerConfig {
            request_timeout_ms: 0,
            ..PollerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
