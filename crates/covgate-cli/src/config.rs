//! Configuration management for the CLI.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional `covgate.toml` defaults, overridden by command-line flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Root directory of extracted document text
    #[serde(default)]
    pub docs_root: Option<PathBuf>,

    /// Coverage registry artifact path
    #[serde(default)]
    pub registry: Option<PathBuf>,

    /// Directory for record output files
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
}

impl Config {
    /// Load from an explicit path, or from `./covgate.toml` when present;
    /// absent files yield the empty default.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from("covgate.toml");
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let contents = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }
}
