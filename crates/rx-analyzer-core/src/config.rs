//! Process configuration, read once at startup.
//!
//! Environment variables:
//! - `GEMINI_API_KEY`: credential for the generative-analysis collaborator
//! - `GEMINI_MODEL`: model name (default `gemini-pro`)
//! - `RX_ANALYZER_TIMEOUT_SECS`: collaborator request timeout (default 30)
//! - `RX_ANALYZER_TABLES`: path to a JSON file overriding the built-in tables

use std::fmt;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::library::{LibraryError, LibraryTables, PatternLibrary};

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_TIMEOUT: &str = "RX_ANALYZER_TIMEOUT_SECS";
pub const ENV_TABLES: &str = "RX_ANALYZER_TABLES";

pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Value shipped in sample `.env` files; treated as unset.
const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key_here";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Library error: {0}")]
    Library(#[from] LibraryError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Analyzer configuration.
#[derive(Clone)]
pub struct AnalyzerConfig {
    /// Generative-analysis credential
    pub api_key: Option<String>,
    /// Generative model name
    pub model: String,
    /// Collaborator request timeout
    pub timeout_secs: u64,
    /// Pattern/synonym/site tables
    pub tables: LibraryTables,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tables: LibraryTables::default(),
        }
    }
}

impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("tables", &self.tables)
            .finish()
    }
}

impl AnalyzerConfig {
    /// Load from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using a custom variable lookup (useful for testing).
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = read(ENV_API_KEY).and_then(usable_api_key);
        let model = read(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match read(ENV_TIMEOUT) {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: ENV_TIMEOUT,
                        value,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let tables = match read(ENV_TABLES) {
            Some(path) => LibraryTables::from_json_file(path)?,
            None => LibraryTables::default(),
        };

        Ok(Self {
            api_key,
            model,
            timeout_secs,
            tables,
        })
    }

    /// Replace the API key, e.g. with one given on the command line.
    ///
    /// Blank and placeholder keys leave the analyzer without a key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = usable_api_key(api_key.into());
        self
    }

    /// Compile the configured tables.
    pub fn build_library(&self) -> ConfigResult<PatternLibrary> {
        Ok(self.tables.compile()?)
    }

    /// Short SHA-256 fingerprint of the API key, safe to log.
    pub fn api_key_fingerprint(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let digest = hex::encode(Sha256::digest(key.as_bytes()));
            digest[..12].to_string()
        })
    }
}

fn usable_api_key(key: String) -> Option<String> {
    let key = key.trim();
    (!key.is_empty() && key != PLACEHOLDER_API_KEY).then(|| key.to_string())
}
