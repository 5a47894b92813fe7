//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use crate::constants::llm;
use crate::error::Result;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// API key for the chat-completion endpoint
    pub openai_api_key: String,
    /// Model used to structure extracted chord sheets
    pub openai_model: String,
    /// Base URL of an OpenAI-compatible API
    pub openai_base_url: String,
    /// Sampling temperature sent with every request
    pub temperature: f32,
    /// Request timeout for the language model, in seconds
    pub request_timeout_secs: u64,
    /// Path of the JSON song store
    pub db_path: Option<PathBuf>,
    /// Access code gating the app; `None` disables login
    pub access_code: Option<String>,
    /// Log file for the terminal front-end
    pub log_path: Option<PathBuf>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            openai_api_key: String::new(),
            openai_model: llm::DEFAULT_MODEL.to_string(),
            openai_base_url: llm::DEFAULT_BASE_URL.to_string(),
            temperature: llm::DEFAULT_TEMPERATURE,
            request_timeout_secs: llm::DEFAULT_TIMEOUT_SECS,
            db_path: default_db_path(),
            access_code: None,
            log_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(key) = env::var("OPENAI_API_KEY") {
            config.openai_api_key = key.trim().to_string();
        }

        if let Ok(model) = env::var("OPENAI_MODEL") {
            if !model.trim().is_empty() {
                config.openai_model = model.trim().to_string();
            }
        }

        if let Ok(url) = env::var("OPENAI_BASE_URL") {
            if !url.trim().is_empty() {
                config.openai_base_url = url.trim().trim_end_matches('/').to_string();
            }
        }

        if let Ok(temperature) = env::var("OPENAI_TEMPERATURE") {
            if let Ok(temperature) = temperature.parse::<f32>() {
                config.temperature = temperature;
            }
        }

        if let Ok(secs) = env::var("REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.request_timeout_secs = secs;
            }
        }

        if let Ok(path) = env::var("CHORDSHEET_DB_PATH") {
            config.db_path = Some(expand(&path));
        }

        config.access_code = env::var("CHORDSHEET_ACCESS_CODE")
            .ok()
            .filter(|code| !code.is_empty());

        config.log_path = env::var("CHORDSHEET_LOG").ok().map(|p| expand(&p)).or_else(|| {
            config
                .db_path
                .as_ref()
                .and_then(|db| db.parent())
                .map(|dir| dir.join("chordsheet.log"))
        });

        Ok(config)
    }

    /// Check if the language model is configured
    pub fn has_api_key(&self) -> bool {
        !self.openai_api_key.is_empty()
    }

    /// Check if the access-code login gate is enabled
    pub const fn requires_login(&self) -> bool {
        self.access_code.is_some()
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// Default store location: `<data dir>/chordsheet/songs.json`
fn default_db_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("chordsheet").join("songs.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
        assert!(!config.has_api_key());
        assert!(!config.requires_login());
    }

    #[test]
    fn test_requires_login_with_code() {
        let config = Config {
            access_code: Some("louvor".to_string()),
            ..Config::default()
        };
        assert!(config.requires_login());
    }
}
