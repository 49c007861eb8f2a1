//! Trait definitions for external interactions
//!
//! These traits define the boundary between the engine and the document
//! ingestion pipeline. The engine never parses binary formats itself;
//! implementations that read extracted page text live in outer crates.

use crate::document::DocCategory;

/// Page-indexed plain text for one source document.
///
/// Pages are 1-based, matching the page numbering of the extraction
/// pipeline that produced the text.
pub trait DocumentSource {
    /// Category of this document
    fn category(&self) -> DocCategory;

    /// Total number of pages
    fn page_count(&self) -> usize;

    /// Text of the given page, or `None` when out of range
    fn page_text(&self, page: usize) -> Option<String>;
}
