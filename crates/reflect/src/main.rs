//! Reflect - a generate/critique reflection agent

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{init_command, run_command, status_command};

/// Reflect - iterate on an answer until the critic is satisfied
#[derive(Parser)]
#[command(name = "reflect")]
#[command(about = "◆ Generate, critique, revise: a reflection agent")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Config file (defaults to ~/.reflect/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a default config file
    Init,
    /// Run the reflection loop on a request
    Run {
        /// Request to answer (read from stdin when omitted)
        #[arg(short, long)]
        message: Option<String>,
        /// Maximum generate/reflect steps (defaults to agent.steps from config)
        #[arg(short = 'n', long)]
        steps: Option<u32>,
        /// Log each step and both model outputs
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show configuration status
    Status,
}

/// `RUST_LOG` when set, else `debug` for verbose runs and `info` otherwise
fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the answer
    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config;

    match cli.command {
        Commands::Init => {
            if let Err(e) = init_command(config).await {
                error!("Init failed: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Run {
            message,
            steps,
            verbose,
        } => {
            if let Err(e) = run_command(config, message, steps, verbose).await {
                error!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        Commands::Status => {
            if let Err(e) = status_command(config).await {
                error!("Status failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
