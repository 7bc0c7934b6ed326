//! Configuration for costwise.
//!
//! Everything is resolved from environment variables (with `.env` support
//! via dotenvy) into typed sections at startup. The service never re-reads
//! configuration after boot.

use std::net::SocketAddr;
use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::routing::Tier;

/// Main configuration for the router service.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub routing: RoutingConfig,
    pub classifier: ClassifierConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            server: ServerConfig::from_env()?,
            routing: RoutingConfig::from_env()?,
            classifier: ClassifierConfig::from_env()?,
            llm: LlmConfig::from_env()?,
        })
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the axum server binds to.
    pub bind: SocketAddr,
    /// Origins allowed by CORS. `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let bind = optional_env("BIND_ADDR")?
            .unwrap_or_else(|| "127.0.0.1:8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                key: "BIND_ADDR".to_string(),
                message: format!("must be a socket address like 127.0.0.1:8000: {e}"),
            })?;

        let cors_origins = optional_env("CORS_ORIGINS")?
            .unwrap_or_else(|| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self { bind, cors_origins })
    }
}

/// Routing pipeline configuration.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Minimum acceptable accuracy for a tier to be chosen.
    pub threshold: f64,
    /// Path to the accuracy table TOML file.
    pub table_path: PathBuf,
}

impl RoutingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let threshold = parse_optional_env("ROUTING_THRESHOLD", 0.52)?;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue {
                key: "ROUTING_THRESHOLD".to_string(),
                message: format!("must be within [0, 1], got {threshold}"),
            });
        }

        let table_path = optional_env("ACCURACY_TABLE")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("accuracy.toml"));

        Ok(Self {
            threshold,
            table_path,
        })
    }
}

/// Category classification sidecar configuration.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Base URL of the classification service.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClassifierConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            optional_env("CLASSIFIER_URL")?.ok_or_else(|| ConfigError::MissingRequired {
                key: "CLASSIFIER_URL".to_string(),
                hint: "Set CLASSIFIER_URL to the base URL of the classification sidecar"
                    .to_string(),
            })?;

        let timeout_secs = parse_optional_env("CLASSIFIER_TIMEOUT_SECS", 10)?;

        Ok(Self {
            base_url,
            timeout_secs,
        })
    }
}

/// Endpoint serving one model tier.
#[derive(Debug, Clone)]
pub struct TierEndpointConfig {
    /// Base URL of an OpenAI-compatible Chat Completions endpoint.
    pub base_url: String,
    /// Optional bearer token.
    pub api_key: Option<SecretString>,
    /// Provider-specific model identifier served at this tier.
    pub model: String,
}

/// LLM dispatch configuration: one endpoint per tier.
///
/// Defaults mirror the reference deployment: the economy tier on Groq's
/// Llama hosting, standard and premium on an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub economy: TierEndpointConfig,
    pub standard: TierEndpointConfig,
    pub premium: TierEndpointConfig,
}

impl LlmConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            economy: Self::tier_from_env(
                "ECONOMY",
                "https://api.groq.com/openai",
                "llama-3.1-8b-instant",
            )?,
            standard: Self::tier_from_env("STANDARD", "https://api.openai.com", "gpt-4o-mini")?,
            premium: Self::tier_from_env("PREMIUM", "https://api.openai.com", "o4-mini")?,
        })
    }

    fn tier_from_env(
        tier: &str,
        default_base_url: &str,
        default_model: &str,
    ) -> Result<TierEndpointConfig, ConfigError> {
        let base_url = optional_env(&format!("LLM_{tier}_BASE_URL"))?
            .unwrap_or_else(|| default_base_url.to_string());
        let api_key = optional_env(&format!("LLM_{tier}_API_KEY"))?.map(SecretString::from);
        let model = optional_env(&format!("LLM_{tier}_MODEL"))?
            .unwrap_or_else(|| default_model.to_string());

        Ok(TierEndpointConfig {
            base_url,
            api_key,
            model,
        })
    }

    /// Endpoint configuration for a tier.
    pub fn endpoint(&self, tier: Tier) -> &TierEndpointConfig {
        match tier {
            Tier::Economy => &self.economy,
            Tier::Standard => &self.standard,
            Tier::Premium => &self.premium,
        }
    }
}

/// Read an environment variable, treating unset and empty as `None`.
pub(crate) fn optional_env(name: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
            key: name.to_string(),
            message: "value is not valid unicode".to_string(),
        }),
    }
}

/// Read and parse an environment variable, falling back to a default.
pub(crate) fn parse_optional_env<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(name)?
        .map(|s| s.parse())
        .transpose()
        .map_err(|e| ConfigError::InvalidValue {
            key: name.to_string(),
            message: format!("failed to parse: {e}"),
        })
        .map(|v| v.unwrap_or(default))
}

#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_env_treats_empty_as_unset() {
        let _guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        // SAFETY: Under ENV_MUTEX.
        unsafe {
            std::env::set_var("COSTWISE_TEST_EMPTY", "");
        }
        assert_eq!(optional_env("COSTWISE_TEST_EMPTY").unwrap(), None);
        assert_eq!(optional_env("COSTWISE_TEST_MISSING").unwrap(), None);
        // SAFETY: Under ENV_MUTEX.
        unsafe {
            std::env::remove_var("COSTWISE_TEST_EMPTY");
        }
    }

    #[test]
    fn parse_optional_env_uses_default() {
        let _guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        let value: f64 = parse_optional_env("COSTWISE_TEST_UNSET_F64", 0.52).unwrap();
        assert_eq!(value, 0.52);
    }

    #[test]
    fn parse_optional_env_rejects_garbage() {
        let _guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        // SAFETY: Under ENV_MUTEX.
        unsafe {
            std::env::set_var("COSTWISE_TEST_BAD_F64", "not-a-number");
        }
        let result: Result<f64, _> = parse_optional_env("COSTWISE_TEST_BAD_F64", 0.52);
        assert!(result.is_err());
        // SAFETY: Under ENV_MUTEX.
        unsafe {
            std::env::remove_var("COSTWISE_TEST_BAD_F64");
        }
    }

    #[test]
    fn routing_threshold_out_of_range_is_rejected() {
        let _guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        // SAFETY: Under ENV_MUTEX.
        unsafe {
            std::env::set_var("ROUTING_THRESHOLD", "1.5");
        }
        let result = RoutingConfig::from_env();
        assert!(result.is_err());
        // SAFETY: Under ENV_MUTEX.
        unsafe {
            std::env::remove_var("ROUTING_THRESHOLD");
        }
    }

    #[test]
    fn llm_config_has_an_endpoint_per_tier() {
        let _guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        let config = LlmConfig::from_env().unwrap();
        assert_eq!(config.endpoint(Tier::Economy).model, "llama-3.1-8b-instant");
        assert_eq!(config.endpoint(Tier::Standard).model, "gpt-4o-mini");
        assert_eq!(config.endpoint(Tier::Premium).model, "o4-mini");
    }

    #[test]
    fn cors_origins_split_on_commas() {
        let _guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        // SAFETY: Under ENV_MUTEX.
        unsafe {
            std::env::set_var("CORS_ORIGINS", "http://localhost:5173, https://app.example.com");
        }
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(
            config.cors_origins,
            vec![
                "http://localhost:5173".to_string(),
                "https://app.example.com".to_string()
            ]
        );
        // SAFETY: Under ENV_MUTEX.
        unsafe {
            std::env::remove_var("CORS_ORIGINS");
        }
    }
}
