use ai_proxy::GeminiConfig;
use code_exec::PollPolicy;
use code_exec_server::DEFAULT_PASSWORD_COST;
use judge_client::Judge0Config;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("PASSWORD_HASH_COST must be between 4 and 31, got '{0}'")]
    InvalidPasswordCost(String),
    #[error("max concurrent executions must be at least 1")]
    NoExecutionSlots,
    #[error("Failed to build client: {0}")]
    Client(String),
}

/// Environment-derived configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    /// `None` when `JUDGE0_API_KEY` is unset
    pub judge0: Option<Judge0Config>,
    /// `None` when `GEMINI_API_KEY` is unset
    pub gemini: Option<GeminiConfig>,
    pub poll_policy: PollPolicy,
    /// bcrypt work factor for new passwords
    pub password_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads every setting through `lookup`; empty values count as unset
    /// except for `JUDGE0_API_HOST`, where empty disables the header.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());
        let non_empty = |key: &str| get(key).filter(|v| !v.is_empty());

        let jwt_secret = non_empty("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let judge0 = non_empty("JUDGE0_API_KEY").map(|key| {
            let mut config = Judge0Config::new(key);
            if let Some(url) = non_empty("JUDGE0_API_URL") {
                config = config.with_api_url(url);
            }
            if let Some(host) = get("JUDGE0_API_HOST") {
                config = config.with_api_host(Some(host));
            }
            config
        });

        let gemini = non_empty("GEMINI_API_KEY").map(|key| {
            let mut config = GeminiConfig::new(key);
            if let Some(model) = non_empty("GEMINI_MODEL") {
                config = config.with_model(model);
            }
            if let Some(url) = non_empty("GEMINI_API_URL") {
                config = config.with_base_url(url);
            }
            config
        });

        let defaults = PollPolicy::default();
        let max_attempts = match non_empty("EXECUTION_POLL_ATTEMPTS") {
            Some(value) => parse_positive("EXECUTION_POLL_ATTEMPTS", value)? as u32,
            None => defaults.max_attempts,
        };
        let interval = match non_empty("EXECUTION_POLL_INTERVAL_MS") {
            Some(value) => Duration::from_millis(parse_positive("EXECUTION_POLL_INTERVAL_MS", value)?),
            None => defaults.interval,
        };

        let password_cost = match non_empty("PASSWORD_HASH_COST") {
            Some(value) => match value.parse::<u32>() {
                Ok(cost) if (4..=31).contains(&cost) => cost,
                _ => return Err(ConfigError::InvalidPasswordCost(value)),
            },
            None => DEFAULT_PASSWORD_COST,
        };

        Ok(Self {
            jwt_secret,
            judge0,
            gemini,
            poll_policy: PollPolicy {
                max_attempts,
                interval,
            },
            password_cost,
        })
    }
}

fn parse_positive(key: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(u64::from(n)),
        _ => Err(ConfigError::InvalidNumber { key, value }),
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
    fn test_jwt_secret_is_required() {
        let err = config_from(&[("JUDGE0_API_KEY", "k")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));

        let err = config_from(&[("JWT_SECRET", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("JWT_SECRET", "s"), ("JUDGE0_API_KEY", "k")]).unwrap();

        let judge0 = config.judge0.unwrap();
        assert_eq!(judge0.api_url, judge_client::DEFAULT_API_URL);
        assert_eq!(
            judge0.api_host.as_deref(),
            Some(judge_client::DEFAULT_API_HOST)
        );
        assert!(config.gemini.is_none());
        assert_eq!(config.poll_policy.max_attempts, 20);
        assert_eq!(config.poll_policy.interval, Duration::from_secs(1));
        assert_eq!(config.password_cost, DEFAULT_PASSWORD_COST);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("JWT_SECRET", "s"),
            ("JUDGE0_API_KEY", "k"),
            ("JUDGE0_API_URL", "http://localhost:2358/"),
            ("JUDGE0_API_HOST", ""),
            ("GEMINI_API_KEY", "g"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("EXECUTION_POLL_ATTEMPTS", "5"),
            ("EXECUTION_POLL_INTERVAL_MS", "250"),
            ("PASSWORD_HASH_COST", "12"),
        ])
        .unwrap();

        let judge0 = config.judge0.unwrap();
        assert_eq!(judge0.api_url, "http://localhost:2358");
        assert_eq!(judge0.api_host, None);
        assert_eq!(config.gemini.unwrap().model, "gemini-pro");
        assert_eq!(config.poll_policy.max_attempts, 5);
        assert_eq!(config.poll_policy.interval, Duration::from_millis(250));
        assert_eq!(config.password_cost, 12);
    }

    #[test]
    fn test_password_cost_outside_bcrypt_range_is_rejected() {
        for value in ["3", "32", "ten"] {
            let err = config_from(&[("JWT_SECRET", "s"), ("PASSWORD_HASH_COST", value)]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidPasswordCost(v) if v == value));
        }
    }

    #[test]
    fn test_invalid_poll_settings_are_rejected() {
        let err = config_from(&[("JWT_SECRET", "s"), ("EXECUTION_POLL_ATTEMPTS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));

        let err = config_from(&[("JWT_SECRET", "s"), ("EXECUTION_POLL_INTERVAL_MS", "soon")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "EXECUTION_POLL_INTERVAL_MS must be a positive integer, got 'soon'"
        );
    }
}
