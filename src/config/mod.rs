//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `CLAIMCHECK_*` environment
//! variables. API credentials have no defaults and stay `None` until set;
//! [`Config::require`] turns a missing credential into an explicit error at
//! wiring time.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CLAIMCHECK_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key. Required for real LLM / embedding backends.
    pub openai_api_key: Option<String>,

    /// OpenAI-compatible base URL. Default: `https://api.openai.com/v1`.
    pub openai_base_url: String,

    /// Chat model used by the relevance filter and verdict synthesizer.
    /// Default: `gpt-4o-mini`.
    pub llm_model: String,

    /// Embedding model used by the semantic cache.
    /// Default: `text-embedding-3-small`.
    pub embedding_model: String,

    /// Google Fact Check Tools API key.
    pub factcheck_api_key: Option<String>,

    /// Google Custom Search API key.
    pub search_api_key: Option<String>,

    /// Google Custom Search engine id (`cx`).
    pub search_engine_id: Option<String>,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Qdrant collection holding cached claims. Default: `claims_checked`.
    pub collection_name: String,

    /// Similarity at or above which two claims are the same. Default: `0.8`.
    pub similarity_threshold: f32,

    /// Max content-fetch attempts per URL. Default: `5`.
    pub max_fetch_attempts: u32,

    /// Max claims verified concurrently. Default: `4`.
    pub max_concurrent_claims: usize,

    /// Append-only results log path. Default: `./claim_checks.jsonl`.
    pub results_log_path: PathBuf,

    /// Max entries in the in-memory exact-match cache. Default: `10_000`.
    pub l1_capacity: u64,
}

/// Default OpenAI base URL used when `CLAIMCHECK_OPENAI_BASE_URL` is not set.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default Qdrant URL used when `CLAIMCHECK_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default similarity threshold (policy: `>=` means duplicate/reuse).
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.8;

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            llm_model: "gpt-4o-mini".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            factcheck_api_key: None,
            search_api_key: None,
            search_engine_id: None,
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection_name: "claims_checked".to_string(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_fetch_attempts: 5,
            max_concurrent_claims: 4,
            results_log_path: PathBuf::from("./claim_checks.jsonl"),
            l1_capacity: 10_000,
        }
    }
}

impl Config {
    const ENV_OPENAI_API_KEY: &'static str = "CLAIMCHECK_OPENAI_API_KEY";
    const ENV_OPENAI_BASE_URL: &'static str = "CLAIMCHECK_OPENAI_BASE_URL";
    const ENV_LLM_MODEL: &'static str = "CLAIMCHECK_LLM_MODEL";
    const ENV_EMBEDDING_MODEL: &'static str = "CLAIMCHECK_EMBEDDING_MODEL";
    const ENV_FACTCHECK_API_KEY: &'static str = "CLAIMCHECK_FACTCHECK_API_KEY";
    const ENV_SEARCH_API_KEY: &'static str = "CLAIMCHECK_SEARCH_API_KEY";
    const ENV_SEARCH_ENGINE_ID: &'static str = "CLAIMCHECK_SEARCH_ENGINE_ID";
    const ENV_QDRANT_URL: &'static str = "CLAIMCHECK_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "CLAIMCHECK_COLLECTION";
    const ENV_SIMILARITY_THRESHOLD: &'static str = "CLAIMCHECK_SIMILARITY_THRESHOLD";
    const ENV_MAX_FETCH_ATTEMPTS: &'static str = "CLAIMCHECK_MAX_FETCH_ATTEMPTS";
    const ENV_MAX_CONCURRENT_CLAIMS: &'static str = "CLAIMCHECK_MAX_CONCURRENT_CLAIMS";
    const ENV_RESULTS_LOG: &'static str = "CLAIMCHECK_RESULTS_LOG";
    const ENV_L1_CAPACITY: &'static str = "CLAIMCHECK_L1_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let similarity_threshold = Self::parse_f32_from_env(
            Self::ENV_SIMILARITY_THRESHOLD,
            defaults.similarity_threshold,
        )?;

        Ok(Self {
            openai_api_key: Self::parse_optional_string_from_env(Self::ENV_OPENAI_API_KEY),
            openai_base_url: Self::parse_string_from_env(
                Self::ENV_OPENAI_BASE_URL,
                defaults.openai_base_url,
            ),
            llm_model: Self::parse_string_from_env(Self::ENV_LLM_MODEL, defaults.llm_model),
            embedding_model: Self::parse_string_from_env(
                Self::ENV_EMBEDDING_MODEL,
                defaults.embedding_model,
            ),
            factcheck_api_key: Self::parse_optional_string_from_env(Self::ENV_FACTCHECK_API_KEY),
            search_api_key: Self::parse_optional_string_from_env(Self::ENV_SEARCH_API_KEY),
            search_engine_id: Self::parse_optional_string_from_env(Self::ENV_SEARCH_ENGINE_ID),
            qdrant_url: Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url),
            collection_name: Self::parse_string_from_env(
                Self::ENV_COLLECTION,
                defaults.collection_name,
            ),
            similarity_threshold,
            max_fetch_attempts: Self::parse_u64_from_env(
                Self::ENV_MAX_FETCH_ATTEMPTS,
                defaults.max_fetch_attempts as u64,
            ) as u32,
            max_concurrent_claims: Self::parse_u64_from_env(
                Self::ENV_MAX_CONCURRENT_CLAIMS,
                defaults.max_concurrent_claims as u64,
            ) as usize,
            results_log_path: Self::parse_path_from_env(
                Self::ENV_RESULTS_LOG,
                defaults.results_log_path,
            ),
            l1_capacity: Self::parse_u64_from_env(Self::ENV_L1_CAPACITY, defaults.l1_capacity),
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(ConfigError::ThresholdOutOfRange {
                value: self.similarity_threshold,
            });
        }

        if self.max_fetch_attempts == 0 {
            return Err(ConfigError::ZeroBound {
                name: "max_fetch_attempts",
            });
        }

        if self.max_concurrent_claims == 0 {
            return Err(ConfigError::ZeroBound {
                name: "max_concurrent_claims",
            });
        }

        Ok(())
    }

    /// Returns a credential or an explicit [`ConfigError::MissingEnvVar`].
    pub fn require(value: &Option<String>, name: &'static str) -> Result<String, ConfigError> {
        value.clone().ok_or(ConfigError::MissingEnvVar { name })
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_f32_from_env(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::NumberParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }
}
