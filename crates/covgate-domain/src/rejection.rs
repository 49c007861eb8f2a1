//! Rejection reasons - structured causes for gate rejections and downgrades
//!
//! Gates never raise errors; they produce one of these values. Display
//! formatting lives in `describe()` and is kept apart from the gate logic
//! that produces the reason.

/// Why a gate rejected or downgraded a candidate or evidence set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// A required candidate field was missing or empty
    MissingField(&'static str),

    /// Context text too short to count as evidence
    TooShort,

    /// The slot's structural requirement set was not satisfied
    StructuralMismatch,

    /// No coverage title or code anchored the context
    NoAnchor,

    /// An excerpt matched a registry exclusion keyword
    ExclusionMatched(String),

    /// No excerpt matched any inclusion pattern for the coverage
    NoInclusionMatch,

    /// No documents were available for the coverage
    NoDocuments,
}

impl RejectionReason {
    /// Human-readable rendering of the reason
    pub fn describe(&self) -> String {
        match self {
            RejectionReason::MissingField(field) => {
                format!("required field '{}' missing or empty", field)
            }
            RejectionReason::TooShort => "context text too short".to_string(),
            RejectionReason::StructuralMismatch => {
                "structural requirement patterns not satisfied".to_string()
            }
            RejectionReason::NoAnchor => {
                "coverage title or code not found in context".to_string()
            }
            RejectionReason::ExclusionMatched(keyword) => {
                format!("excerpt matched exclusion keyword '{}'", keyword)
            }
            RejectionReason::NoInclusionMatch => {
                "no excerpt matched the coverage's inclusion patterns".to_string()
            }
            RejectionReason::NoDocuments => "no documents available".to_string(),
        }
    }

    /// Join the first `limit` distinct reasons into one display string.
    ///
    /// Order is first-encountered; duplicates are dropped before counting.
    pub fn summarize(reasons: &[RejectionReason], limit: usize) -> Option<String> {
        let mut seen: Vec<&RejectionReason> = Vec::new();
        for reason in reasons {
            if !seen.contains(&reason) {
                seen.push(reason);
            }
            if seen.len() == limit {
                break;
            }
        }
        if seen.is_empty() {
            None
        } else {
            Some(
                seen.iter()
                    .map(|r| r.describe())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}
