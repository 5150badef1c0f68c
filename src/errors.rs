//! Error handling for the update gate
//!
//! Every fallible operation in the crate returns [`GateResult`]. The variants
//! mirror the failure kinds the gate can observe: transport, cache absence,
//! malformed payloads, missing collaborators, and unsupported platforms.

use thiserror::Error;

/// Main error type for the update gate
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Transport failed: {operation} - {message}")]
    Transport { operation: String, message: String },

    #[error("Cache entry not found: {key}")]
    NotFound { key: String },

    #[error("Malformed data in {context}: {message}")]
    Malformed { context: String, message: String },

    #[error("Missing collaborator: {operation} requires a {collaborator}")]
    Configuration {
        collaborator: &'static str,
        operation: &'static str,
    },

    #[error("Unsupported platform: {platform}")]
    UnsupportedPlatform { platform: String },

    #[error("Cache storage failed: {operation} - {message}")]
    Storage { operation: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result alias used throughout the crate
pub type GateResult<T> = Result<T, GateError>;

impl GateError {
    /// Create a transport error
    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a not found error for a cache key
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a malformed data error
    pub fn malformed(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a missing collaborator error
    pub fn configuration(collaborator: &'static str, operation: &'static str) -> Self {
        Self::Configuration {
            collaborator,
            operation,
        }
    }

    /// Create an unsupported platform error
    pub fn unsupported_platform(platform: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            platform: platform.into(),
        }
    }

    /// Create a cache storage error
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a configuration loading error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether a failure of the fetch step should fall back to the cache.
    pub fn is_fallback_trigger(&self) -> bool {
        matches!(self, GateError::Transport { .. } | GateError::Malformed { .. })
    }
}

/// Convert from reqwest errors
impl From<reqwest::Error> for GateError {
    fn from(err: reqwest::Error) -> Self {
        let operation = match err.url() {
            Some(url) => format!("GET {url}"),
            None => "http_request".to_string(),
        };
        GateError::transport(operation, err.to_string())
    }
}

/// Convert from serde_json errors
impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        GateError::malformed("json", err.to_string())
    }
}

/// Convert from sled errors
impl From<sled::Error> for GateError {
    fn from(err: sled::Error) -> Self {
        GateError::storage("sled_operation", err.to_string())
    }
}

/// Convert from figment errors
impl From<figment::Error> for GateError {
    fn from(err: figment::Error) -> Self {
        GateError::config(err.to_string())
    }
}
