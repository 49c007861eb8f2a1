//! Evidence module - persisted forms of accepted candidates and slot results

use crate::candidate::Candidate;
use crate::document::DocCategory;
use crate::status::SlotStatus;
use serde::{Deserialize, Serialize};

/// Maximum number of evidence entries kept per slot result
pub const MAX_EVIDENCE: usize = 3;

/// Maximum excerpt length in characters
pub const MAX_EXCERPT_LEN: usize = 600;

/// Where in the source document an evidence excerpt was matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceLocator {
    /// Trigger keyword that produced the match
    pub keyword: String,

    /// Line index within the page, 0-based
    pub line_num: usize,

    /// Whether the matched line was table-shaped
    pub is_table: bool,
}

/// The externally visible, persisted form of an accepted candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    /// Source document category
    pub doc_type: DocCategory,

    /// First page of the excerpt, 1-based
    pub page_start: usize,

    /// Last page of the excerpt, 1-based
    pub page_end: usize,

    /// Context excerpt, truncated to [`MAX_EXCERPT_LEN`] characters
    pub excerpt: String,

    /// Match location within the document
    pub locator: EvidenceLocator,

    /// Status the gate chain assigned to this evidence
    pub gate_status: SlotStatus,
}

impl EvidenceEntry {
    /// Build the persisted entry for an accepted candidate.
    ///
    /// The excerpt is the candidate's trimmed context, cut at a character
    /// boundary so multi-byte text survives truncation.
    pub fn from_candidate(candidate: &Candidate, gate_status: SlotStatus) -> Self {
        Self {
            doc_type: candidate.category,
            page_start: candidate.page,
            page_end: candidate.page,
            excerpt: truncate_chars(candidate.trimmed_context(), MAX_EXCERPT_LEN),
            locator: EvidenceLocator {
                keyword: candidate.matched_keyword.clone(),
                line_num: candidate.line_num,
                is_table: candidate.is_table_shaped,
            },
            gate_status,
        }
    }
}

/// Final result for one (coverage, slot) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResult {
    /// Resolution status
    pub status: SlotStatus,

    /// Deterministically extracted value, numeric slots only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Number of candidates that survived gating, before the evidence cap
    pub match_count: usize,

    /// Kept evidence, at most [`MAX_EVIDENCE`] entries
    pub evidences: Vec<EvidenceEntry>,

    /// Aggregated rejection reason when nothing survived
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SlotResult {
    /// An `Unknown` result with no evidence and the given reason
    pub fn unknown(reason: Option<String>) -> Self {
        Self {
            status: SlotStatus::Unknown,
            value: None,
            match_count: 0,
            evidences: Vec::new(),
            reason,
        }
    }
}

/// Cut a string to at most `max` characters, preserving char boundaries.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
