//! Registry error types

use thiserror::Error;

/// Errors raised while loading the registry artifact.
///
/// Every variant is fatal at process start; the engine never runs with a
/// partial registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The artifact file could not be read
    #[error("Failed to read registry artifact '{path}': {source}")]
    Io {
        /// Path that was attempted
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The artifact was not valid JSON or did not match the expected shape
    #[error("Malformed registry artifact '{path}': {source}")]
    Malformed {
        /// Path that was attempted
        path: String,
        /// Underlying parse error
        source: serde_json::Error,
    },
}
