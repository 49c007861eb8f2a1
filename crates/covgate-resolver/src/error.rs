//! Resolver error types

use covgate_domain::DocCategory;
use thiserror::Error;

/// Errors that abort a coverage's resolution.
///
/// Gate rejections and missing documents are modeled outcomes, not errors;
/// the variants here are defects that must surface loudly rather than turn
/// into a false `FOUND`.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// A document reported a page count it could not serve
    #[error("Document '{category}' failed to produce page {page} of {page_count}")]
    PageUnavailable {
        /// Document category
        category: DocCategory,
        /// Page that failed, 1-based
        page: usize,
        /// Page count the document reported
        page_count: usize,
    },
}
