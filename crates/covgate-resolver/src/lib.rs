//! Covgate Resolver
//!
//! Orchestrates extraction and gating for one coverage at a time:
//!
//! ```text
//! DocumentSet → scan (covgate-extract) → G4/G1/G2 (covgate-gates)
//!            → sort, cap at 3 evidences → G3 → reconcile → SlotResult
//! ```
//!
//! Resolution is single-threaded, synchronous, and batch-oriented. Document
//! text is loaded lazily on first access and cached for the lifetime of the
//! containing [`DocumentSet`]; nothing else is cached across coverages or
//! runs. Each coverage's resolution is independent, so an external caller
//! may parallelize across coverages freely.
//!
//! Determinism is a hard requirement: given identical document text and
//! identical configuration, every resolution is byte-identical. No clocks,
//! no randomness, no hash-order iteration.

#![warn(missing_docs)]

mod document_set;
mod error;
mod resolver;
mod value;

pub use document_set::{DocumentSet, PagedTextDocument};
pub use error::ResolverError;
pub use resolver::{apply_attribution, EvidenceResolver, ResolverConfig};
pub use value::ValueExtractor;
