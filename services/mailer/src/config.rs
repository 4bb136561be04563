use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use vocab_core::selector::SelectionConfig;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// SMTP relay settings.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Option<String>,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub sender: String,
    pub recipients: Vec<String>,
    pub smtp: SmtpConfig,
    pub sent_words_path: PathBuf,
    pub lexicon_path: Option<PathBuf>,
    pub candidate_limit: usize,
    pub min_candidates: usize,
    pub min_word_length: usize,
    pub http_timeout: Duration,
    pub dictionary_lookup: bool,
    pub log_level: Level,
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let sender = std::env::var("EMAIL")
            .map_err(|_| ConfigError::MissingVar("EMAIL".to_string()))?;
        let password = std::env::var("APP_PASSWORD").ok();

        let recipients: Vec<String> = std::env::var("RECIPIENTS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let recipients = if recipients.is_empty() {
            vec![sender.clone()]
        } else {
            recipients
        };

        let smtp = SmtpConfig {
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            port: parse_var("SMTP_PORT", 465)?,
            username: sender.clone(),
            password,
        };

        let sent_words_path = std::env::var("SENT_WORDS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("sent_words.json"));
        let lexicon_path = std::env::var("LEXICON_PATH").ok().map(PathBuf::from);

        let candidate_limit = parse_var("CANDIDATE_LIMIT", 200)?;
        let min_candidates = parse_var("MIN_CANDIDATES", 20)?;
        let min_word_length = parse_var("MIN_WORD_LENGTH", 4)?;
        let http_timeout_secs: u64 = parse_var("HTTP_TIMEOUT_SECS", 5)?;
        let dictionary_lookup = parse_var("DICTIONARY_LOOKUP", false)?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        if candidate_limit == 0 {
            return Err(ConfigError::InvalidValue(
                "CANDIDATE_LIMIT".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        if http_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "HTTP_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let http_timeout = Duration::from_secs(http_timeout_secs);

        Ok(Self {
            sender,
            recipients,
            smtp,
            sent_words_path,
            lexicon_path,
            candidate_limit,
            min_candidates,
            min_word_length,
            http_timeout,
            dictionary_lookup,
            log_level,
        })
    }

    /// The thresholds handed to the word selector.
    pub fn selection(&self) -> SelectionConfig {
        SelectionConfig {
            candidate_limit: self.candidate_limit,
            min_word_length: self.min_word_length,
        }
    }
}
