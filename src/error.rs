//! Error types for vaultsim
//!
//! Provides a unified error type for seeding and request handling.
//! Lookup misses are not errors: they are answered as `NotFound` outcomes.

use thiserror::Error;

/// Result type alias using SimError
pub type Result<T> = std::result::Result<T, SimError>;

/// Unified error type for vaultsim operations
#[derive(Debug, Error)]
pub enum SimError {
    // -------------------------------------------------------------------------
    // Seeding Errors
    // -------------------------------------------------------------------------
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Serialization(err.to_string())
    }
}
