//! Covgate Extract
//!
//! Turns page text into slot candidates. Two extraction strategies live here:
//!
//! - **Keyword scanning**: line-by-line trigger-keyword matching with a
//!   context window, optionally prioritizing table-shaped lines.
//! - **Row location**: similarity-anchored search for the single table row
//!   describing the target coverage, with an explicit penalty for rows that
//!   better match a different registered coverage.
//!
//! Both strategies are pure functions of (text, configuration): no clocks,
//! no randomness, no caching across calls.
//!
//! # Architecture
//!
//! ```text
//! Page text → scan_page → Candidates → gate chain (covgate-gates)
//! Document  → RowLocator → RowMatch  → anchoring support
//! ```

#![warn(missing_docs)]

mod patterns;
mod row_locator;
mod scanner;

pub use patterns::{PatternDef, PatternLibrary};
pub use row_locator::{RowLocator, RowLocatorConfig, RowMatch};
pub use scanner::{is_table_shaped, scan_page};
