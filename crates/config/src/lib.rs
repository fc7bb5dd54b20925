//! Configuration for the reflection agent
//!
//! Settings come from `~/.reflect/config.json`, then environment variables
//! (optionally seeded from a `.env` file) override them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod paths;

pub use paths::{config_path, data_dir};

/// Environment variable holding the completion API key
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "GROQ_TEXT_MODEL_NAME";
/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "REFLECT_API_BASE";

/// Errors in configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no API key configured (set GROQ_API_KEY or provider.api_key)")]
    NoApiKey,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Completion endpoint credentials
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

/// Reflection loop defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefaults {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_steps")]
    pub steps: u32,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            steps: default_steps(),
            history_capacity: default_history_capacity(),
        }
    }
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.7
}

fn default_steps() -> u32 {
    6
}

fn default_history_capacity() -> usize {
    3
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub agent: AgentDefaults,
}

impl Config {
    /// Load from the default location
    pub async fn load() -> Result<Self> {
        let path = config_path();
        Self::load_from(&path).await
    }

    /// Load from a specific location, falling back to defaults when absent
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("◆ no config at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        debug!("◆ reading config from {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` (or the default location), then apply `.env` and
    /// environment overrides.
    pub async fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!("◆ loaded environment from {:?}", env_file);
        }

        let mut config = match path {
            Some(path) => Self::load_from(path).await?,
            None => Self::load().await?,
        };
        config.apply_env();
        Ok(config)
    }

    /// Save to a specific location
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        debug!("◆ writing config to {:?}", path);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are
    /// ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(API_KEY_ENV) {
            self.provider.api_key = key;
        }
        if let Some(model) = get(MODEL_ENV) {
            self.agent.model = model;
        }
        if let Some(base) = get(API_BASE_ENV) {
            self.provider.api_base = Some(base);
        }
    }

    /// Get the API key, if one is set
    pub fn api_key(&self) -> Option<String> {
        let key = self.provider.api_key.trim();
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }

    /// Get the API key or fail with [`ConfigError::NoApiKey`]
    pub fn require_api_key(&self) -> Result<String> {
        self.api_key().ok_or(ConfigError::NoApiKey)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// Get the API base override, if any
    pub fn api_base(&self) -> Option<String> {
        self.provider
            .api_base
            .as_ref()
            .filter(|b| !b.is_empty())
            .cloned()
    }

    /// Get the model identifier
    pub fn model(&self) -> String {
        self.agent.model.clone()
    }
}

/// Write a default config at the default location if none exists, then load it
pub async fn init() -> Result<Config> {
    init_at(&config_path()).await
}

/// Write a default config at `config_path` if none exists, then load it
pub async fn init_at(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        warn!("◆ config already exists at {:?}", config_path);
    } else {
        Config::default().save_to(config_path).await?;
        info!("◆ config created at {:?}", config_path);
    }

    Config::load_from(config_path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model(), "llama-3.3-70b-versatile");
        assert_eq!(config.agent.steps, 6);
        assert_eq!(config.agent.history_capacity, 3);
        assert_eq!(config.agent.max_tokens, 4096);
        assert!(!config.has_api_key());
        assert!(config.api_base().is_none());
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_env_with(lookup(&[
            (API_KEY_ENV, "gsk-env"),
            (MODEL_ENV, "llama-3.1-8b-instant"),
            (API_BASE_ENV, "http://localhost:8000/v1"),
        ]));

        assert_eq!(config.api_key(), Some("gsk-env".to_string()));
        assert_eq!(config.model(), "llama-3.1-8b-instant");
        assert_eq!(config.api_base(), Some("http://localhost:8000/v1".to_string()));
    }

    #[test]
    fn test_apply_env_ignores_empty_values() {
        let mut config = Config::default();
        config.provider.api_key = "from-file".to_string();
        config.apply_env_with(lookup(&[(API_KEY_ENV, "  "), (MODEL_ENV, "")]));

        assert_eq!(config.api_key(), Some("from-file".to_string()));
        assert_eq!(config.model(), "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_require_api_key() {
        let config = Config::default();
        assert!(matches!(config.require_api_key(), Err(ConfigError::NoApiKey)));

        let mut config = Config::default();
        config.provider.api_key = " gsk-123 ".to_string();
        assert_eq!(config.require_api_key().unwrap(), "gsk-123");
    }

    #[test]
    fn test_no_api_key_message_names_variable() {
        let msg = ConfigError::NoApiKey.to_string();
        assert!(msg.contains("GROQ_API_KEY"));
    }
}
