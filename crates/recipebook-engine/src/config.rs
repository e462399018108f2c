//! Application configuration
//!
//! Values come from an optional TOML file and are then overridden by
//! environment variables:
//!
//! - `RECIPEBOOK_DB`: SQLite database path (default `recipebook.db`)
//! - `RECIPEBOOK_MEDIA_DIR`: image directory (default `media`)
//! - `RECIPEBOOK_LOG_PROFILE`: `development`, `production` or `test`
//! - `GEMINI_API_KEY`: generation provider key, required only for `generate`
//! - `RECIPEBOOK_AI_MODEL`: model name (default `gemini-1.5-flash`)
//! - `RECIPEBOOK_AI_TIMEOUT_SECS`: request timeout (default 30)

use std::path::{Path, PathBuf};

use recipebook_core::errors::{ExError, ExErrorKind};
use recipebook_core::logging_facility::Profile;
use recipebook_core_types::Sensitive;
use recipebook_store::errors::io_error;
use recipebook_store::Result;
use serde::Deserialize;

pub const DEFAULT_DATABASE_PATH: &str = "recipebook.db";
pub const DEFAULT_MEDIA_DIR: &str = "media";
pub const DEFAULT_AI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

pub const ENV_DATABASE: &str = "RECIPEBOOK_DB";
pub const ENV_MEDIA_DIR: &str = "RECIPEBOOK_MEDIA_DIR";
pub const ENV_LOG_PROFILE: &str = "RECIPEBOOK_LOG_PROFILE";
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_AI_MODEL: &str = "RECIPEBOOK_AI_MODEL";
pub const ENV_AI_TIMEOUT_SECS: &str = "RECIPEBOOK_AI_TIMEOUT_SECS";

/// Recipe generation provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub api_key: Option<Sensitive<String>>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_AI_MODEL.to_string(),
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub media_dir: PathBuf,
    pub log_profile: String,
    pub ai: AiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            media_dir: PathBuf::from(DEFAULT_MEDIA_DIR),
            log_profile: "development".to_string(),
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path` (if given), then apply the process environment
    ///
    /// # Errors
    /// - `Io` if an explicitly named file cannot be read
    /// - `InvalidInput` for unparsable TOML or environment values
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| io_error("read_config", e))?;
                Self::from_toml(&text)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// # Errors
    /// `InvalidInput` if the text is not a valid configuration document.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("load_config")
                .with_message(format!("Invalid configuration: {}", e))
        })
    }

    /// Apply overrides from a variable lookup, normally the environment
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    /// `InvalidInput` if the timeout or log profile cannot be parsed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(path) = var(ENV_DATABASE) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(dir) = var(ENV_MEDIA_DIR) {
            self.media_dir = PathBuf::from(dir);
        }
        if let Some(profile) = var(ENV_LOG_PROFILE) {
            self.log_profile = profile;
        }
        if let Some(key) = var(ENV_API_KEY) {
            self.ai.api_key = Some(Sensitive::new(key));
        }
        if let Some(model) = var(ENV_AI_MODEL) {
            self.ai.model = model;
        }
        if let Some(timeout) = var(ENV_AI_TIMEOUT_SECS) {
            self.ai.timeout_secs = timeout.trim().parse().map_err(|_| {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("load_config")
                    .with_message(format!("{} must be a whole number of seconds", ENV_AI_TIMEOUT_SECS))
            })?;
        }

        self.profile()?;
        Ok(())
    }

    /// # Errors
    /// `InvalidInput` for an unknown profile name.
    pub fn profile(&self) -> Result<Profile> {
        self.log_profile
            .parse::<Profile>()
            .map_err(|e| ExError::from(e).with_op("load_config"))
    }
}
