//! Reflection loop - generate, critique, revise

use tracing::{debug, info};

use reflect_config::{Config, ConfigError};
use reflect_history::BoundedHistory;
use reflect_provider::{complete, ChatParams, Message, OpenAiCompatProvider, Provider};

use crate::prompts::{GENERATION_SYSTEM_PROMPT, REFLECTION_SYSTEM_PROMPT, STOP_MARKER};
use crate::{AgentError, Result};

/// Default size of both histories
pub const DEFAULT_HISTORY_CAPACITY: usize = 3;

/// Result of a full run
#[derive(Debug, Clone)]
pub struct ReflectionOutcome {
    /// Last generation produced
    pub output: String,
    /// Steps started, including the one that hit the stop marker
    pub steps_taken: u32,
    /// Whether the critic answered with the stop marker
    pub stopped_early: bool,
    pub generation_history: Vec<Message>,
    pub reflection_history: Vec<Message>,
}

/// Drives the generate/reflect loop against one provider
pub struct ReflectionAgent<P: Provider> {
    provider: P,
    model: String,
    max_tokens: u32,
    temperature: f32,
    history_capacity: usize,
    generation_prompt: String,
    reflection_prompt: String,
}

impl ReflectionAgent<OpenAiCompatProvider> {
    /// Build an agent backed by the HTTP provider described in `config`.
    ///
    /// Fails with a configuration error when no API key is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?;
        let provider =
            OpenAiCompatProvider::new(api_key, config.api_base(), Some(config.model()));
        Self::with_config(provider, config)
    }
}

impl<P: Provider> ReflectionAgent<P> {
    /// Create an agent with default prompts and sampling settings.
    ///
    /// An empty `model` falls back to the provider's default. Fails when the
    /// provider has no credentials.
    pub fn new(provider: P, model: impl Into<String>) -> Result<Self> {
        if !provider.is_configured() {
            return Err(AgentError::Config(ConfigError::NoApiKey));
        }

        let model = model.into();
        let model = if model.is_empty() {
            provider.default_model()
        } else {
            model
        };

        Ok(Self {
            provider,
            model,
            max_tokens: 4096,
            temperature: 0.7,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            generation_prompt: GENERATION_SYSTEM_PROMPT.to_string(),
            reflection_prompt: REFLECTION_SYSTEM_PROMPT.to_string(),
        })
    }

    /// Create an agent using model, sampling and capacity from `config`
    pub fn with_config(provider: P, config: &Config) -> Result<Self> {
        let mut agent = Self::new(provider, config.model())?;
        agent.max_tokens = config.agent.max_tokens;
        agent.temperature = config.agent.temperature;
        agent.history_capacity = config.agent.history_capacity;
        Ok(agent)
    }

    /// Replace the generation and reflection system prompts
    pub fn with_prompts(
        mut self,
        generation_prompt: impl Into<String>,
        reflection_prompt: impl Into<String>,
    ) -> Self {
        self.generation_prompt = generation_prompt.into();
        self.reflection_prompt = reflection_prompt.into();
        self
    }

    /// Set the capacity of both histories. Checked when a run starts.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    /// Run the loop and return the final generation
    pub async fn run(&self, user_message: &str, n_steps: u32, verbose: bool) -> Result<String> {
        let outcome = self.run_detailed(user_message, n_steps, verbose).await?;
        Ok(outcome.output)
    }

    /// Run the loop and return the final generation with both histories.
    ///
    /// Each step generates from the generation history, mirrors the result
    /// into the reflection history as a user turn, then asks for a critique.
    /// A critique containing [`STOP_MARKER`] ends the run without touching
    /// either history; any other critique is mirrored back as a user turn.
    /// Completion errors abort the run unchanged.
    pub async fn run_detailed(
        &self,
        user_message: &str,
        n_steps: u32,
        verbose: bool,
    ) -> Result<ReflectionOutcome> {
        if n_steps == 0 {
            return Err(AgentError::NoSteps);
        }

        let mut generation_history = BoundedHistory::new(
            vec![
                Message::system(self.generation_prompt.as_str()),
                Message::user(user_message),
            ],
            self.history_capacity,
        )?;
        let mut reflection_history = BoundedHistory::new(
            vec![Message::system(self.reflection_prompt.as_str())],
            self.history_capacity,
        )?;

        let mut generation = String::new();
        let mut steps_taken = 0;
        let mut stopped_early = false;

        for step in 0..n_steps {
            steps_taken = step + 1;
            if verbose {
                info!("STEP {}/{}", steps_taken, n_steps);
            } else {
                debug!("Reflection step {}/{}", steps_taken, n_steps);
            }

            generation = self.generate_response(&generation_history, verbose).await?;
            generation_history.append(Message::assistant(generation.as_str()));
            reflection_history.append(Message::user(generation.as_str()));

            let reflection = self.reflect_response(&reflection_history, verbose).await?;
            if reflection.contains(STOP_MARKER) {
                info!("Stop sequence found, stopping the reflection loop");
                stopped_early = true;
                break;
            }

            generation_history.append(Message::user(reflection.as_str()));
            reflection_history.append(Message::assistant(reflection));
        }

        Ok(ReflectionOutcome {
            output: generation,
            steps_taken,
            stopped_early,
            generation_history: generation_history.as_sequence(),
            reflection_history: reflection_history.as_sequence(),
        })
    }

    async fn generate_response(&self, history: &BoundedHistory, verbose: bool) -> Result<String> {
        self.request_completion(history, verbose, "GENERATION").await
    }

    async fn reflect_response(&self, history: &BoundedHistory, verbose: bool) -> Result<String> {
        self.request_completion(history, verbose, "REFLECTION").await
    }

    async fn request_completion(
        &self,
        history: &BoundedHistory,
        verbose: bool,
        title: &str,
    ) -> Result<String> {
        let params = ChatParams {
            model: self.model.clone(),
            messages: history.as_sequence(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let output = complete(&self.provider, params).await?;
        if verbose {
            info!("{}\n\n{}", title, output);
        } else {
            debug!("{}: {} chars", title, output.len());
        }
        Ok(output)
    }
}
