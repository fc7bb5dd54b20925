//! Reflection agent
//!
//! Alternates generation and critique over two bounded histories until the
//! critic answers with the stop marker or the step budget runs out.

use thiserror::Error;

use reflect_config::ConfigError;
use reflect_history::HistoryError;
use reflect_provider::ProviderError;

pub mod prompts;
pub mod reflection;

pub use prompts::{GENERATION_SYSTEM_PROMPT, REFLECTION_SYSTEM_PROMPT, STOP_MARKER};
pub use reflection::{ReflectionAgent, ReflectionOutcome};

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("configuration error: {0}")]
    History(#[from] HistoryError),

    #[error("configuration error: step count must be at least 1")]
    NoSteps,

    #[error(transparent)]
    Service(#[from] ProviderError),
}

impl AgentError {
    /// Raised before any completion call: bad settings, capacity or steps
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            AgentError::Config(_) | AgentError::History(_) | AgentError::NoSteps
        )
    }

    /// Raised by the completion service mid-run
    pub fn is_service(&self) -> bool {
        matches!(self, AgentError::Service(_))
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
