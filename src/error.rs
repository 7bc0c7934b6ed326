//! Error types for costwise.

use std::path::PathBuf;
use std::time::Duration;

/// Top-level error type for the router service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Accuracy table error: {0}")]
    Table(#[from] TableError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Accuracy table loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Failed to read accuracy table {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse accuracy table {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Unknown difficulty label '{label}' in row for category '{category}'")]
    UnknownDifficulty { category: String, label: String },

    #[error("Unknown model tier '{tier}' in row ({category}, {difficulty})")]
    UnknownTier {
        category: String,
        difficulty: String,
        tier: String,
    },

    #[error("Duplicate row for ({category}, {difficulty})")]
    DuplicateRow { category: String, difficulty: String },

    #[error(
        "Accuracy {value} out of range [0, 1] for tier {tier} in row ({category}, {difficulty})"
    )]
    AccuracyOutOfRange {
        category: String,
        difficulty: String,
        tier: String,
        value: f64,
    },
}

/// Category classifier errors.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Classifier request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Invalid classifier response: {reason}")]
    InvalidResponse { reason: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("No endpoint configured for tier {tier}")]
    TierNotConfigured { tier: String },
}

/// Result type alias for the router service.
pub type Result<T> = std::result::Result<T, Error>;
