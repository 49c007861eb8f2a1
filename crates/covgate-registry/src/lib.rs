//! Covgate Registry
//!
//! The coverage registry is the single source of truth for which coverage
//! codes are eligible for G5 attribution checking. It is loaded once from a
//! versioned JSON artifact at process start, is read-only afterwards, and a
//! malformed or missing artifact is fatal: running with a partial registry
//! would silently skip G5 for coverages that should have been checked.
//!
//! # Examples
//!
//! ```no_run
//! use covgate_registry::CoverageRegistry;
//!
//! let registry = CoverageRegistry::load("registry.json").unwrap();
//! if let Some(entry) = registry.get("CA001") {
//!     println!("{}", entry.canonical_name);
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod registry;

pub use error::RegistryError;
pub use registry::{CoverageEntry, CoverageRegistry};
