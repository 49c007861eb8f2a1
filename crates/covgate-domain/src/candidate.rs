//! Candidate module - a raw, ungated text match for a slot

use crate::document::DocCategory;
use crate::slot::SlotKey;

/// One raw keyword match emitted by the candidate extractor.
///
/// Candidates are created fresh per scan, never mutated after creation, and
/// owned exclusively by the resolution call that produced them. Nothing is
/// cached across coverages or runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Slot this match belongs to
    pub slot: SlotKey,

    /// Category of the document the match came from
    pub category: DocCategory,

    /// Page number, 1-based
    pub page: usize,

    /// The trigger keyword that matched (first match on the line wins)
    pub matched_keyword: String,

    /// Line index within the page, 0-based
    pub line_num: usize,

    /// The matched line itself
    pub line_text: String,

    /// The matched line plus its surrounding context window
    pub context_text: String,

    /// Whether the matched line is table-shaped
    pub is_table_shaped: bool,
}

impl Candidate {
    /// Context with the surrounding whitespace trimmed
    pub fn trimmed_context(&self) -> &str {
        self.context_text.trim()
    }
}
