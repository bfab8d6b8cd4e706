//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid protocol (expected http or https): {0}")]
    InvalidProtocol(String),

    #[error("Derived callback URL is not a valid http(s) URL: {0}")]
    InvalidCallbackUrl(String),

    #[error("Invalid billing platform request timeout")]
    InvalidTimeout,

    #[error("Invalid Kill Bill API URL")]
    InvalidApiUrl,

    #[error("Kill Bill API URL must use HTTPS in production")]
    ApiUrlMustBeHttps,
}
