//! Runtime configuration.
//!
//! Defaults carry the built-in training set and reply catalog. A JSON file can
//! replace any part of it, and a handful of environment variables override
//! the runtime knobs:
//!
//! | Variable | Effect |
//! |---|---|
//! | `INTENT_CHAT_CONFIG` | path to a JSON configuration file |
//! | `INTENT_CHAT_SEED` | seed for reply selection |
//! | `INTENT_CHAT_VOICE` | `0`/`false`/`off` disables speech |
//! | `INTENT_CHAT_LISTEN_TIMEOUT` | microphone timeout in seconds |

use serde::{Deserialize, Serialize};
use std::env::{self, VarError};
use std::fs;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::brain::catalog::ResponseCatalog;
use crate::brain::naive_bayes::DEFAULT_ALPHA;
use crate::brain::training_data::{default_examples, default_responses, TrainingExample};
use crate::brain::vectorizer::DEFAULT_MIN_TOKEN_LEN;
use crate::error::AppError;

pub const CONFIG_PATH_VAR: &str = "INTENT_CHAT_CONFIG";
pub const SEED_VAR: &str = "INTENT_CHAT_SEED";
pub const VOICE_VAR: &str = "INTENT_CHAT_VOICE";
pub const LISTEN_TIMEOUT_VAR: &str = "INTENT_CHAT_LISTEN_TIMEOUT";

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChatbotConfig {
    /// Labelled sentences the classifier is trained on.
    #[validate(length(min = 1))]
    pub training: Vec<TrainingExample>,
    /// Replies per intent, plus the `default` bucket.
    pub responses: ResponseCatalog,
    #[validate(nested)]
    pub classifier: ClassifierConfig,
    #[validate(nested)]
    pub vectorizer: VectorizerConfig,
    #[validate(nested)]
    pub speech: SpeechConfig,
    /// Fixed seed for reply selection; random when absent.
    pub seed: Option<u64>,
}

/// Naive Bayes settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Additive smoothing applied to token counts.
    #[validate(range(min = 0.000001, max = 1000.0))]
    pub alpha: f64,
}

/// Vectorizer settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Tokens shorter than this many characters are not features.
    #[validate(range(min = 1, max = 64))]
    pub min_token_len: usize,
}

/// Voice I/O settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speak replies and accept voice input.
    pub enabled: bool,
    /// How long to wait for the user to start speaking.
    #[validate(range(min = 1, max = 120))]
    pub listen_timeout_secs: u64,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            training: default_examples(),
            responses: default_responses(),
            classifier: ClassifierConfig::default(),
            vectorizer: VectorizerConfig::default(),
            speech: SpeechConfig::default(),
            seed: None,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            listen_timeout_secs: 5,
        }
    }
}

impl SpeechConfig {
    pub fn listen_timeout(&self) -> Duration {
        Duration::from_secs(self.listen_timeout_secs)
    }
}

impl ChatbotConfig {
    /// Parses a JSON document; missing sections keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    /// Builds the configuration from the process environment.
    ///
    /// Starts from the file named by `INTENT_CHAT_CONFIG` (or the defaults),
    /// then applies the individual overrides.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = match read_var(CONFIG_PATH_VAR)? {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(raw) = read_var(SEED_VAR)? {
            let seed = raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{}: {}", SEED_VAR, e)))?;
            config.seed = Some(seed);
        }
        if let Some(raw) = read_var(VOICE_VAR)? {
            config.speech.enabled = parse_flag(VOICE_VAR, &raw)?;
        }
        if let Some(raw) = read_var(LISTEN_TIMEOUT_VAR)? {
            config.speech.listen_timeout_secs = raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{}: {}", LISTEN_TIMEOUT_VAR, e)))?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Reads `name`; unset is `None`, a value that is not valid UTF-8 is an error.
fn read_var(name: &str) -> Result<Option<String>, AppError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(AppError::Config(format!(
            "{} is not valid UTF-8: {:?}",
            name, raw
        ))),
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "{}: expected a boolean, got '{}'",
            name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ChatbotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.training.len(), 18);
        assert_eq!(config.speech.listen_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("X", "On").unwrap());
        assert!(!parse_flag("X", " 0 ").unwrap());
        assert!(matches!(parse_flag("X", "maybe"), Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let mut config = ChatbotConfig::default();
        config.classifier.alpha = 0.0;
        assert!(config.validate().is_err());

        let mut config = ChatbotConfig::default();
        config.speech.listen_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ChatbotConfig::default();
        config.training.clear();
        assert!(config.validate().is_err());
    }
}
