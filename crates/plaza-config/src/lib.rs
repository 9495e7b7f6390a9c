//! # plaza-config
//!
//! Layered configuration: an optional `plaza.toml` next to the binary,
//! overridden by `PLAZA__*` environment variables (double underscore as
//! the section separator, e.g. `PLAZA__SERVER__PORT=8080`). A `.env` file
//! is honored before the environment is read.

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection URL. `mode=rwc` creates the file on first run.
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:plaza.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory uploads are written to. Created on demand.
    pub dir: String,
    /// Public path prefix the files are served back under.
    pub public_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: "./uploads".to_string(),
            public_prefix: "/uploads".to_string(),
        }
    }
}

/// The rules-based dialogue webhook (primary backend).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub url: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5005/webhooks/rest/webhook".to_string(),
        }
    }
}

/// The chat-completion service (secondary backend).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    /// Bearer token for the completion endpoint. Optional so local stub
    /// servers work without one.
    pub api_key: Option<SecretString>,
    pub model: String,
    pub max_tokens: u32,
    /// Overrides the built-in system instruction when set.
    pub system_prompt: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-4o".to_string(),
            max_tokens: 1000,
            system_prompt: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Fixed sender identity forwarded to the webhook backend.
    pub sender: String,
    /// Bounded wait on the primary backend before falling back.
    pub primary_timeout_secs: u64,
    pub webhook: WebhookConfig,
    pub llm: LlmConfig,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            sender: "plaza-web".to_string(),
            primary_timeout_secs: 10,
            webhook: WebhookConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadConfig,
    pub chat: ChatConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(config::File::with_name("plaza").required(false))
            .add_source(
                config::Environment::with_prefix("PLAZA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<AppConfig>()?;

        tracing::debug!(host = %cfg.server.host, port = cfg.server.port, "configuration loaded");
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.chat.primary_timeout_secs, 10);
        assert_eq!(cfg.chat.llm.max_tokens, 1000);
        assert!(cfg.chat.llm.api_key.is_none());
        assert_eq!(cfg.uploads.public_prefix, "/uploads");
    }

    #[test]
    fn test_secret_key_is_redacted_in_debug() {
        let cfg = LlmConfig {
            api_key: Some("sk-very-secret".to_string().into()),
            ..LlmConfig::default()
        };
        let dbg = format!("{:?}", cfg);
        assert!(!dbg.contains("sk-very-secret"));
    }
}
