//! Covgate Gates
//!
//! The deterministic validation chain that every candidate match passes
//! through before it may count as evidence:
//!
//! - **G4 minimum evidence** - rejects malformed or trivially short matches
//!   (runs first, fail fast)
//! - **G1 structure** - per-slot requirement sets; at least two distinct
//!   patterns must match the context
//! - **G2 anchoring** - downgrades to `FOUND_GLOBAL` when the context never
//!   names the target coverage
//! - **G3 conflict** - cross-document numeric disagreement detection
//! - **G5 attribution** - registry-driven inclusion/exclusion check applied
//!   at the cross-coverage comparison stage; exclusion always wins
//!
//! Gates are pure functions: they keep or downgrade a status, never upgrade
//! it, and never raise errors. Rejections are values
//! ([`covgate_domain::RejectionReason`]), not exceptions.

#![warn(missing_docs)]

mod attribution;
mod chain;
mod structure;

pub use attribution::{AttributionDecision, AttributionGate};
pub use chain::{numeric_conflict, GateChain};
pub use structure::StructureRules;
