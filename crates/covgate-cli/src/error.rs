//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
///
/// Every variant maps to a non-zero exit code. Coverage-level `UNKNOWN` or
/// `CONFLICT` results are valid, reportable outcomes and never surface here.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required input file or directory is missing
    #[error("Missing required input: {0}")]
    MissingInput(String),

    /// Registry load failure (fatal at startup)
    #[error("Registry error: {0}")]
    Registry(#[from] covgate_registry::RegistryError),

    /// Resolver defect
    #[error("Resolver error: {0}")]
    Resolver(#[from] covgate_resolver::ResolverError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
