//! Reflect command implementations

use anyhow::{Context, Result};
use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use reflect_agent::ReflectionAgent;
use reflect_config::{self, Config};
use reflect_provider::openai_compat::DEFAULT_API_BASE;

fn resolve_path(config: Option<PathBuf>) -> PathBuf {
    config.unwrap_or_else(reflect_config::config_path)
}

/// Read the request from stdin
///
/// A terminal gets a prompt and a single line; piped input is read whole.
fn read_request() -> Result<String> {
    let stdin = std::io::stdin();
    let mut input = String::new();

    if stdin.is_terminal() {
        eprint!("◆ Request: ");
        std::io::stderr().flush()?;
        stdin
            .read_line(&mut input)
            .context("Failed to read request from stdin")?;
    } else {
        stdin
            .lock()
            .read_to_string(&mut input)
            .context("Failed to read request from stdin")?;
    }

    let input = input.trim();
    if input.is_empty() {
        anyhow::bail!("Empty request; pass one with --message");
    }
    Ok(input.to_string())
}

/// Run the reflection loop and print the final answer
pub async fn run_command(
    config: Option<PathBuf>,
    message: Option<String>,
    steps: Option<u32>,
    verbose: bool,
) -> Result<()> {
    let config = Config::resolve(config.as_deref()).await?;
    let steps = steps.unwrap_or(config.agent.steps);

    let agent = ReflectionAgent::from_config(&config)?;
    debug!("Using model {} for {} steps", agent.model(), steps);

    let message = match message {
        Some(message) => message,
        None => read_request()?,
    };

    let output = agent.run(&message, steps, verbose).await?;
    println!("{}", output);

    Ok(())
}

/// Write a default config file
pub async fn init_command(config: Option<PathBuf>) -> Result<()> {
    println!("◆ Initializing reflect...");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let path = resolve_path(config.clone());
    let initialized = match config {
        Some(custom) => reflect_config::init_at(&custom).await,
        None => reflect_config::init().await,
    };
    initialized.with_context(|| format!("Failed to initialize {}", path.display()))?;

    println!("Config: {}", path.display());
    println!("\nNext steps:");
    println!("  1. Set GROQ_API_KEY (or provider.api_key in the config file)");
    println!("  2. Run: reflect run -m \"write a four line poem\" --verbose");

    Ok(())
}

/// Show configuration status
pub async fn status_command(config: Option<PathBuf>) -> Result<()> {
    let path = resolve_path(config);
    let config = Config::resolve(Some(&path)).await?;

    println!("◆ Reflect Status");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config:    {} {}",
        path.display(),
        if path.exists() { "[OK]" } else { "[Missing]" }
    );
    println!("Model:     {}", config.model());
    println!(
        "Endpoint:  {}",
        config
            .api_base()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    );
    println!(
        "API Key:   {}",
        if config.has_api_key() {
            "[Set]"
        } else {
            "[Missing]"
        }
    );
    println!("Steps:     {}", config.agent.steps);
    println!("History:   {} messages", config.agent.history_capacity);

    Ok(())
}
