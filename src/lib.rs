//! # codepad
//!
//! Wires the judge client, the execution orchestrator and the AI assistant
//! into the HTTP server. All environment configuration is read and validated
//! once, here, before the server starts.

pub mod config;

use ai_proxy::{AiAssistant, GeminiClient};
use code_exec::{CodeExecutionService, RemoteExecutor, ResourceLimits};
use code_exec_server::{AppState, TokenSigner};
use judge_client::Judge0Client;
use std::sync::Arc;
use tracing::{info, warn};

pub use config::{AppConfig, ConfigError};

/// Limits that come from the command line rather than the environment
#[derive(Debug, Clone, Copy)]
pub struct RuntimeSettings {
    pub max_concurrent_executions: usize,
    pub resource_limits: ResourceLimits,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            max_concurrent_executions: 10,
            resource_limits: ResourceLimits::default(),
        }
    }
}

/// Builds the shared server state. Missing feature credentials leave that
/// feature unconfigured instead of failing startup.
pub fn build_state(config: AppConfig, settings: RuntimeSettings) -> Result<AppState, ConfigError> {
    if settings.max_concurrent_executions == 0 {
        return Err(ConfigError::NoExecutionSlots);
    }

    let execution = match config.judge0 {
        Some(judge0) => {
            let client = Judge0Client::new(judge0)
                .map_err(|e| ConfigError::Client(format!("Judge0: {}", e)))?;
            let executor = RemoteExecutor::new(Arc::new(client))
                .with_policy(config.poll_policy)
                .with_limits(settings.resource_limits);
            info!(
                "Code execution enabled: {} attempts every {:?}",
                config.poll_policy.max_attempts, config.poll_policy.interval
            );
            CodeExecutionService::new(executor, settings.max_concurrent_executions)
        }
        None => {
            warn!("JUDGE0_API_KEY is not set; code execution is disabled");
            CodeExecutionService::unconfigured(
                "JUDGE0_API_KEY is not set in environment variables",
                settings.max_concurrent_executions,
            )
        }
    };

    let assistant = match config.gemini {
        Some(gemini) => {
            let client = GeminiClient::new(gemini)
                .map_err(|e| ConfigError::Client(format!("Gemini: {}", e)))?;
            info!("AI assistant enabled with model {}", client.model());
            AiAssistant::new(Arc::new(client))
        }
        None => {
            warn!("GEMINI_API_KEY is not set; AI assistance is disabled");
            AiAssistant::unconfigured("GEMINI_API_KEY is not set in environment variables")
        }
    };

    Ok(AppState::new(
        TokenSigner::new(config.jwt_secret),
        execution,
        assistant,
    )
    .with_password_cost(config.password_cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_leave_features_unconfigured() {
        let config = AppConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("secret".to_string()),
            _ => None,
        })
        .unwrap();

        let state = build_state(config, RuntimeSettings::default()).unwrap();
        assert!(!state.execution.is_configured());
        assert!(!state.assistant.is_configured());
        assert_eq!(state.execution.get_available_slots(), 10);
    }

    #[test]
    fn test_credentials_enable_features() {
        let config = AppConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("secret".to_string()),
            "JUDGE0_API_KEY" => Some("judge-key".to_string()),
            "GEMINI_API_KEY" => Some("gemini-key".to_string()),
            _ => None,
        })
        .unwrap();

        let settings = RuntimeSettings {
            max_concurrent_executions: 3,
            ..Default::default()
        };
        let state = build_state(config, settings).unwrap();
        assert!(state.execution.is_configured());
        assert!(state.assistant.is_configured());
        assert_eq!(state.execution.get_available_slots(), 3);
    }

    #[test]
    fn test_zero_execution_slots_is_rejected() {
        let config = AppConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("secret".to_string()),
            "JUDGE0_API_KEY" => Some("judge-key".to_string()),
            _ => None,
        })
        .unwrap();

        let settings = RuntimeSettings {
            max_concurrent_executions: 0,
            ..Default::default()
        };
        let result = build_state(config, settings);
        assert!(matches!(result, Err(ConfigError::NoExecutionSlots)));
    }

    #[test]
    fn test_settings_are_copied_not_moved() {
        let settings = RuntimeSettings {
            max_concurrent_executions: 2,
            resource_limits: ResourceLimits {
                cpu_time: 2,
                memory: 64_000,
            },
        };
        let config = AppConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("secret".to_string()),
            _ => None,
        })
        .unwrap();

        let state = build_state(config, settings).unwrap();
        assert_eq!(state.execution.get_available_slots(), 2);
        assert_eq!(
            settings.resource_limits,
            ResourceLimits {
                cpu_time: 2,
                memory: 64_000
            }
        );
    }
}
