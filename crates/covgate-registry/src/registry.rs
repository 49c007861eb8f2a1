//! Coverage registry loading and lookup

use crate::error::RegistryError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One registered coverage, keyed by its code in the registry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoverageEntry {
    /// Canonical coverage name used to build G5 inclusion patterns
    pub canonical_name: String,

    /// Diagnosis classification (e.g. "cancer", "cerebrovascular")
    pub diagnosis_type: String,

    /// Keywords whose presence in an excerpt rejects attribution outright
    #[serde(default)]
    pub exclusion_keywords: Vec<String>,
}

/// The artifact as serialized on disk
#[derive(Debug, Deserialize)]
struct RegistryArtifact {
    /// Artifact version string
    #[serde(default)]
    version: String,

    /// Coverage entries keyed by coverage code
    coverage_entries: BTreeMap<String, CoverageEntry>,
}

/// Read-only coverage registry, loaded once per process.
///
/// Entries live in a `BTreeMap` so iteration order is deterministic and a
/// coverage code can hold at most one entry. Codes absent from the registry
/// skip G5 entirely.
#[derive(Debug, Clone)]
pub struct CoverageRegistry {
    version: String,
    entries: BTreeMap<String, CoverageEntry>,
}

impl CoverageRegistry {
    /// Load the registry from a JSON artifact.
    ///
    /// Any IO or parse failure is fatal; an artifact whose
    /// `coverage_entries` map is present but empty loads successfully
    /// (no coverage is then eligible for G5).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents).map_err(|source| RegistryError::Malformed {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse the registry from an in-memory JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let artifact: RegistryArtifact = serde_json::from_str(json)?;
        Ok(Self {
            version: artifact.version,
            entries: artifact.coverage_entries,
        })
    }

    /// Build a registry directly from entries (test doubles)
    pub fn from_entries(entries: BTreeMap<String, CoverageEntry>) -> Self {
        Self {
            version: String::new(),
            entries,
        }
    }

    /// Artifact version string
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Look up a coverage by code; `None` means G5 is skipped for it
    pub fn get(&self, code: &str) -> Option<&CoverageEntry> {
        self.entries.get(code)
    }

    /// Number of registered coverages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical names of every registered coverage, in deterministic
    /// code order
    pub fn canonical_names(&self) -> Vec<String> {
        self.entries
            .values()
            .map(|entry| entry.canonical_name.clone())
            .collect()
    }

    /// Canonical names of every coverage except the given code, in
    /// deterministic code order. Used for the row locator's
    /// cross-coverage penalty.
    pub fn canonical_names_except(&self, code: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(entry_code, _)| entry_code.as_str() != code)
            .map(|(_, entry)| entry.canonical_name.clone())
            .collect()
    }
}
