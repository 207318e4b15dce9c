//! services/app/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The
//! `.env` file is used for local development. The Gemini API key is
//! deliberately optional: its absence is a valid, handled state that disables
//! the AI features rather than failing startup.

use tracing::Level;

/// Gemini's OpenAI-compatible endpoint.
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// The conversational tutoring model.
const DEFAULT_TUTOR_MODEL: &str = "gemini-3-pro-preview";

/// The structured-output model used for quiz generation; a cheaper, faster
/// model than the tutor's since the work is JSON extraction, not reasoning.
const DEFAULT_QUIZ_MODEL: &str = "gemini-3-flash-preview";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    pub gemini_api_key: Option<String>,
    pub api_base: String,
    pub tutor_model: String,
    pub quiz_model: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for
    /// development, but this is skipped in test environments to ensure tests
    /// are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load the API key (as optional) ---
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        // --- Load AI client settings ---
        let api_base =
            std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let tutor_model =
            std::env::var("TUTOR_MODEL").unwrap_or_else(|_| DEFAULT_TUTOR_MODEL.to_string());
        let quiz_model =
            std::env::var("QUIZ_MODEL").unwrap_or_else(|_| DEFAULT_QUIZ_MODEL.to_string());

        Ok(Self {
            log_level,
            gemini_api_key,
            api_base,
            tutor_model,
            quiz_model,
        })
    }
}
