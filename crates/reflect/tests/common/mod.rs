//! Common test utilities for reflect integration tests
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// A test environment with an isolated home and working directory
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub config_dir: PathBuf,
}

impl TestEnv {
    /// Create a new test environment
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempdir()?;
        let config_dir = temp_dir.path().join(".reflect");

        Ok(Self {
            temp_dir,
            config_dir,
        })
    }

    /// Default config file location inside the test home
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Command with HOME and the working directory pointed at the test
    /// environment and no ambient credentials
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_reflect"));
        cmd.current_dir(self.temp_dir.path());
        cmd.env("HOME", self.temp_dir.path());
        cmd.env_remove("GROQ_API_KEY");
        cmd.env_remove("GROQ_TEXT_MODEL_NAME");
        cmd.env_remove("REFLECT_API_BASE");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Write a config file with the given API key and base URL
    pub fn create_config(&self, api_key: &str, api_base: Option<&str>) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        let mut provider = serde_json::json!({ "api_key": api_key });
        if let Some(base) = api_base {
            provider["api_base"] = serde_json::json!(base);
        }
        let config = serde_json::json!({
            "provider": provider,
            "agent": { "model": "test-model", "steps": 3 }
        });
        std::fs::write(self.config_file(), serde_json::to_string_pretty(&config)?)?;
        Ok(())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new().expect("Failed to create test environment")
    }
}
