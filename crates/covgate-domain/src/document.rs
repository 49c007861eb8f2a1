//! Document module - the four fixed source document categories

use serde::{Deserialize, Serialize};

/// Category of a source document, in fixed search-priority order.
///
/// The resolver always scans categories in `priority_index()` order and the
/// evidence sort prefers earlier categories, so the ordering here is part of
/// the engine's observable behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocCategory {
    /// Insurance proposal (가입설계서)
    Proposal,

    /// Product summary (상품요약서)
    ProductSummary,

    /// Business method document (사업방법서)
    BusinessMethod,

    /// Policy terms and conditions (약관)
    PolicyTerms,
}

impl DocCategory {
    /// All categories in search-priority order
    pub const ALL: [DocCategory; 4] = [
        DocCategory::Proposal,
        DocCategory::ProductSummary,
        DocCategory::BusinessMethod,
        DocCategory::PolicyTerms,
    ];

    /// Search priority, 0 = highest
    pub fn priority_index(&self) -> usize {
        match self {
            DocCategory::Proposal => 0,
            DocCategory::ProductSummary => 1,
            DocCategory::BusinessMethod => 2,
            DocCategory::PolicyTerms => 3,
        }
    }

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocCategory::Proposal => "proposal",
            DocCategory::ProductSummary => "product_summary",
            DocCategory::BusinessMethod => "business_method",
            DocCategory::PolicyTerms => "policy_terms",
        }
    }

    /// Parse a category from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "proposal" => Some(DocCategory::Proposal),
            "product_summary" => Some(DocCategory::ProductSummary),
            "business_method" => Some(DocCategory::BusinessMethod),
            "policy_terms" => Some(DocCategory::PolicyTerms),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
