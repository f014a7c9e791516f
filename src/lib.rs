//! Javadoc-Harvest: a package-by-package API documentation harvester
//!
//! This crate crawls a Javadoc-style documentation site, walking each package
//! index page to its class pages, and extracts constructor and method
//! signatures into one XML record file per package.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod manifest;
pub mod model;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Javadoc-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Package task for {package} did not complete: {message}")]
    Task { package: String, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors reading or writing the package and retry manifests
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Manifest entry {package} must map to a string path")]
    InvalidEntry { package: String },

    #[error("Manifest {path} lists no packages")]
    Empty { path: String },
}

/// Page-level failures: a package or class page could not be retrieved
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Row-level failures: one row of a documentation table could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("parameter lists disagree: {tokens} rendered tokens for {types} linked types")]
    ParameterMismatch { tokens: usize, types: usize },

    #[error("missing {0}")]
    MissingElement(&'static str),

    #[error("empty {0}")]
    EmptyField(&'static str),
}

/// Result type alias for Javadoc-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use manifest::{PackageManifest, RetryManifest};
pub use model::{ClassRecord, MethodRecord, PackageRecord, Parameter, Parameters};
pub use state::{PackageOutcome, PackageStatus};
pub use crate::url::resolve_absolute_url;
