//! Process configuration
//!
//! Settings come from command-line flags, falling back to environment
//! variables (a `.env` file is loaded into the environment first). The API
//! key is the only required setting; everything else has a default.

use crate::conversation::HistoryWindow;
use crate::llm::LlmError;
use clap::Parser;
use thiserror::Error;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

/// Output token cap used when none is configured
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Startup configuration errors. All of these are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ANTHROPIC_API_KEY not found")]
    MissingApiKey,
    #[error("max tokens must be greater than zero")]
    InvalidMaxTokens,
    #[error("Failed to initialize completion client: {0}")]
    Client(#[from] LlmError),
}

/// Command-line interface
#[derive(Debug, Parser)]
#[command(
    name = "retail-assistant",
    version,
    about = "Electronics store assistant backed by a hosted language model"
)]
pub struct Cli {
    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model identifier sent with every request
    #[arg(long, env = "RETAIL_ASSISTANT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum tokens the model may generate per reply
    #[arg(long, env = "RETAIL_ASSISTANT_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Prior messages included in each prompt: a count, or "all"
    #[arg(
        long,
        env = "RETAIL_ASSISTANT_HISTORY_WINDOW",
        default_value_t = HistoryWindow::default()
    )]
    pub history_window: HistoryWindow,

    /// Override the API base URL (proxies, local gateways)
    #[arg(long, env = "ANTHROPIC_BASE_URL")]
    pub base_url: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, env = "RETAIL_ASSISTANT_LOG_JSON")]
    pub log_json: bool,
}

impl Cli {
    pub fn into_config(self) -> Result<AssistantConfig, ConfigError> {
        let mut config = AssistantConfig::new(self.api_key)?;
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens);
        }
        config.model = self.model;
        config.max_tokens = self.max_tokens;
        config.history_window = self.history_window;
        config.base_url = self.base_url.filter(|url| !url.trim().is_empty());
        Ok(config)
    }
}

/// Validated assistant settings
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub history_window: HistoryWindow,
    pub base_url: Option<String>,
}

impl AssistantConfig {
    /// Defaults plus the given credential. A missing or blank key is an error.
    pub fn new(api_key: Option<String>) -> Result<Self, ConfigError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            history_window: HistoryWindow::default(),
            base_url: None,
        })
    }
}
