use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CliConfig {
    pub base_url: String,
    pub log_level: String,
    /// Global per-request timeout. Unset means requests may wait forever.
    pub timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Defaults, then `todo-cli.toml` in the working directory if present,
    /// then `TODO_CLI_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("todo-cli").required(false))
                .add_source(Environment::with_prefix("TODO_CLI").try_parsing(true)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("log_level", "info")?
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
