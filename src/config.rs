//! Agent configuration.
//!
//! Loaded from `DEVICE_TRAY_*` environment variables by the binary, or built
//! programmatically with the `with_*` methods.
//!
//! # Example
//!
//! ```ignore
//! use device_tray::config::AgentConfig;
//! use std::time::Duration;
//!
//! let config = AgentConfig::new("/opt/agent/identifier", "https://fleet.example.com")
//!     .with_policy_poll(Duration::from_secs(60));
//! config.validate()?;
//! ```

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::display::LabelStyle;
use crate::error::ConfigError;
use crate::reconciler::{Intervals, DEFAULT_REQUEST_TIMEOUT};

pub const ENV_TOKEN_PATH: &str = "DEVICE_TRAY_TOKEN_PATH";
pub const ENV_SERVER_URL: &str = "DEVICE_TRAY_SERVER_URL";
pub const ENV_ROOT_CA: &str = "DEVICE_TRAY_ROOT_CA";
pub const ENV_INSECURE: &str = "DEVICE_TRAY_INSECURE";
pub const ENV_AUTH_RETRY_SECS: &str = "DEVICE_TRAY_AUTH_RETRY_SECS";
pub const ENV_POLICY_POLL_SECS: &str = "DEVICE_TRAY_POLICY_POLL_SECS";
pub const ENV_TOKEN_WATCH_SECS: &str = "DEVICE_TRAY_TOKEN_WATCH_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "DEVICE_TRAY_REQUEST_TIMEOUT_SECS";
pub const ENV_LABEL_STYLE: &str = "DEVICE_TRAY_LABEL_STYLE";

/// HTTP transport options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// PEM file added as a trusted root
    pub root_ca: Option<PathBuf>,
    /// Accept any server certificate
    pub insecure_skip_verify: bool,
    /// Timeout applied by the HTTP client to every request
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            root_ca: None,
            insecure_skip_verify: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Everything the agent needs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Token file written by the enrollment agent
    pub token_path: PathBuf,
    /// Base URL of the fleet service, without trailing slash
    pub server_url: String,
    pub transport: TransportConfig,
    pub intervals: Intervals,
    pub label_style: LabelStyle,
}

impl AgentConfig {
    /// Config with default intervals and transport.
    pub fn new(token_path: impl Into<PathBuf>, server_url: &str) -> Self {
        Self {
            token_path: token_path.into(),
            server_url: server_url.trim_end_matches('/').to_string(),
            transport: TransportConfig::default(),
            intervals: Intervals::default(),
            label_style: LabelStyle::platform_default(),
        }
    }

    pub fn with_root_ca(mut self, path: impl Into<PathBuf>) -> Self {
        self.transport.root_ca = Some(path.into());
        self
    }

    pub fn with_insecure_skip_verify(mut self, insecure: bool) -> Self {
        self.transport.insecure_skip_verify = insecure;
        self
    }

    pub fn with_auth_retry(mut self, interval: Duration) -> Self {
        self.intervals.auth_retry = interval;
        self
    }

    pub fn with_policy_poll(mut self, interval: Duration) -> Self {
        self.intervals.policy_poll = interval;
        self
    }

    pub fn with_token_watch(mut self, interval: Duration) -> Self {
        self.intervals.token_watch = interval;
        self
    }

    /// Sets the timeout for both the HTTP client and the reconciler.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.intervals.request_timeout = timeout;
        self.transport.request_timeout = timeout;
        self
    }

    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load and validate configuration through `lookup`.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let token_path = get(ENV_TOKEN_PATH).ok_or(ConfigError::Missing(ENV_TOKEN_PATH))?;
        let server_url = get(ENV_SERVER_URL).ok_or(ConfigError::Missing(ENV_SERVER_URL))?;
        let server_url = server_url.trim();
        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: ENV_SERVER_URL,
                message: format!("'{}' is not an http(s) URL", server_url),
            });
        }

        let mut config = Self::new(token_path.trim(), server_url)
            .with_insecure_skip_verify(get(ENV_INSECURE).is_some());

        if let Some(path) = get(ENV_ROOT_CA) {
            config = config.with_root_ca(path.trim());
        }
        if let Some(secs) = get(ENV_AUTH_RETRY_SECS) {
            config = config.with_auth_retry(parse_secs(ENV_AUTH_RETRY_SECS, &secs)?);
        }
        if let Some(secs) = get(ENV_POLICY_POLL_SECS) {
            config = config.with_policy_poll(parse_secs(ENV_POLICY_POLL_SECS, &secs)?);
        }
        if let Some(secs) = get(ENV_TOKEN_WATCH_SECS) {
            config = config.with_token_watch(parse_secs(ENV_TOKEN_WATCH_SECS, &secs)?);
        }
        if let Some(secs) = get(ENV_REQUEST_TIMEOUT_SECS) {
            config = config.with_request_timeout(parse_secs(ENV_REQUEST_TIMEOUT_SECS, &secs)?);
        }
        if let Some(style) = get(ENV_LABEL_STYLE) {
            let style = LabelStyle::from_str(&style).map_err(|message| ConfigError::Invalid {
                var: ENV_LABEL_STYLE,
                message,
            })?;
            config = config.with_label_style(style);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check interval constraints. See [`Intervals::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.intervals.validate()
    }
}

fn parse_secs(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::Invalid {
            var,
            message: format!("'{}': {}", value.trim(), e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciler::MAX_INTERVAL;
    use serial_test::serial;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            (ENV_TOKEN_PATH, "/opt/agent/identifier"),
            (ENV_SERVER_URL, "https://fleet.example.com/"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = AgentConfig::from_vars(vars(&required())).unwrap();
        assert_eq!(config.token_path, PathBuf::from("/opt/agent/identifier"));
        assert_eq!(config.server_url, "https://fleet.example.com");
        assert_eq!(config.intervals, Intervals::default());
        assert_eq!(config.transport, TransportConfig::default());
        assert_eq!(config.label_style, LabelStyle::platform_default());
    }

    #[test]
    fn test_missing_required() {
        let err = AgentConfig::from_vars(vars(&[(ENV_SERVER_URL, "https://x")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_TOKEN_PATH)));

        let err = AgentConfig::from_vars(vars(&[(ENV_TOKEN_PATH, "/t")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_SERVER_URL)));
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let err = AgentConfig::from_vars(vars(&[
            (ENV_TOKEN_PATH, "  "),
            (ENV_SERVER_URL, "https://x"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_TOKEN_PATH)));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut pairs = required();
        pairs[1] = (ENV_SERVER_URL, "fleet.example.com");
        let err = AgentConfig::from_vars(vars(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_SERVER_URL, .. }));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = required();
        pairs.extend([
            (ENV_ROOT_CA, "/etc/ca.pem"),
            (ENV_INSECURE, "1"),
            (ENV_AUTH_RETRY_SECS, "10"),
            (ENV_POLICY_POLL_SECS, "60"),
            (ENV_TOKEN_WATCH_SECS, "2"),
            (ENV_REQUEST_TIMEOUT_SECS, "3"),
            (ENV_LABEL_STYLE, "text"),
        ]);
        let config = AgentConfig::from_vars(vars(&pairs)).unwrap();

        assert_eq!(config.transport.root_ca, Some(PathBuf::from("/etc/ca.pem")));
        assert!(config.transport.insecure_skip_verify);
        assert_eq!(config.transport.request_timeout, Duration::from_secs(3));
        assert_eq!(config.intervals.auth_retry, Duration::from_secs(10));
        assert_eq!(config.intervals.policy_poll, Duration::from_secs(60));
        assert_eq!(config.intervals.token_watch, Duration::from_secs(2));
        assert_eq!(config.intervals.request_timeout, Duration::from_secs(3));
        assert_eq!(config.label_style, LabelStyle::Text);
    }

    #[test]
    fn test_invalid_number() {
        let mut pairs = required();
        pairs.push((ENV_POLICY_POLL_SECS, "five"));
        let err = AgentConfig::from_vars(vars(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: ENV_POLICY_POLL_SECS,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_label_style() {
        let mut pairs = required();
        pairs.push((ENV_LABEL_STYLE, "sparkles"));
        assert!(AgentConfig::from_vars(vars(&pairs)).is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut pairs = required();
        pairs.push((ENV_TOKEN_WATCH_SECS, "0"));
        let err = AgentConfig::from_vars(vars(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroInterval("token watch")));
    }

    #[test]
    fn test_timeout_must_be_shorter_than_intervals() {
        let config = AgentConfig::new("/t", "https://x").with_request_timeout(Duration::from_secs(5));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TimeoutTooLong {
                interval: "auth retry",
                ..
            })
        ));

        let config = AgentConfig::new("/t", "https://x")
            .with_auth_retry(Duration::from_secs(30))
            .with_policy_poll(Duration::from_secs(10))
            .with_request_timeout(Duration::from_secs(10));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TimeoutTooLong {
                interval: "policy poll",
                ..
            })
        ));
    }

    #[test]
    fn test_huge_interval_rejected() {
        let mut pairs = required();
        pairs.push((ENV_POLICY_POLL_SECS, "18446744073709551615"));
        let err = AgentConfig::from_vars(vars(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::IntervalTooLong {
                interval: "policy poll",
                ..
            }
        ));

        let config = AgentConfig::new("/t", "https://x").with_token_watch(MAX_INTERVAL);
        assert!(config.validate().is_ok());
        let config = config.with_token_watch(MAX_INTERVAL + Duration::from_secs(1));
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var(ENV_TOKEN_PATH, "/var/lib/agent/identifier");
        std::env::set_var(ENV_SERVER_URL, "https://fleet.example.com");
        std::env::set_var(ENV_LABEL_STYLE, "emoji");

        let config = AgentConfig::from_env();

        std::env::remove_var(ENV_TOKEN_PATH);
        std::env::remove_var(ENV_SERVER_URL);
        std::env::remove_var(ENV_LABEL_STYLE);

        let config = config.unwrap();
        assert_eq!(config.token_path, PathBuf::from("/var/lib/agent/identifier"));
        assert_eq!(config.label_style, LabelStyle::Emoji);
    }
}
