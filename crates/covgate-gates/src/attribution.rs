//! G5 attribution - registry-driven inclusion/exclusion check
//!
//! Applied at the cross-coverage comparison stage, after a slot already has
//! its accepted excerpts. Prevents evidence that belongs to an excluded or
//! different coverage from being counted for the target.

use covgate_domain::RejectionReason;
use covgate_registry::{CoverageEntry, CoverageRegistry};
use tracing::debug;

/// Outcome of the attribution check for one slot's excerpts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributionDecision {
    /// At least one excerpt matched an inclusion pattern and none matched an
    /// exclusion keyword
    Accepted,

    /// The coverage code is not registered; G5 does not apply
    Skipped,

    /// An exclusion keyword matched, or no inclusion pattern did
    Rejected(RejectionReason),
}

impl AttributionDecision {
    /// Whether the excerpts may be attributed to the coverage
    pub fn is_accepted(&self) -> bool {
        matches!(self, AttributionDecision::Accepted | AttributionDecision::Skipped)
    }
}

/// Registry-driven attribution gate.
///
/// Inclusion patterns come from the canonical name plus coverage-specific
/// synonym expansions; exclusion patterns come verbatim from the registry's
/// `exclusion_keywords`. Matching runs on whitespace-stripped, lower-cased
/// text so spacing variants of a keyword still hit. Exclusion always wins.
pub struct AttributionGate<'a> {
    registry: &'a CoverageRegistry,
}

impl<'a> AttributionGate<'a> {
    /// Create a gate over the loaded registry
    pub fn new(registry: &'a CoverageRegistry) -> Self {
        Self { registry }
    }

    /// Check a slot's accepted excerpts for the given coverage code
    pub fn check(&self, coverage_code: &str, excerpts: &[String]) -> AttributionDecision {
        let Some(entry) = self.registry.get(coverage_code) else {
            return AttributionDecision::Skipped;
        };

        let normalized: Vec<String> = excerpts.iter().map(|e| fold(e)).collect();

        // Exclusion dominates: any hit rejects regardless of inclusions
        for keyword in &entry.exclusion_keywords {
            let needle = fold(keyword);
            if needle.is_empty() {
                continue;
            }
            if normalized.iter().any(|excerpt| excerpt.contains(&needle)) {
                debug!(coverage = coverage_code, keyword = keyword.as_str(), "G5 exclusion hit");
                return AttributionDecision::Rejected(RejectionReason::ExclusionMatched(
                    keyword.clone(),
                ));
            }
        }

        let inclusions = inclusion_patterns(entry);
        let any_inclusion = normalized
            .iter()
            .any(|excerpt| inclusions.iter().any(|pattern| excerpt.contains(pattern)));
        if any_inclusion {
            AttributionDecision::Accepted
        } else {
            debug!(coverage = coverage_code, "G5 no inclusion match");
            AttributionDecision::Rejected(RejectionReason::NoInclusionMatch)
        }
    }
}

/// Inclusion patterns for a registry entry, normalized.
///
/// Always the full canonical name and its bare title (text before the first
/// parenthesis); names that carve out similar-cancer also accept the
/// conventional alternate phrasings, and rediagnosis coverages accept the
/// compound rediagnosis-cancer term.
fn inclusion_patterns(entry: &CoverageEntry) -> Vec<String> {
    let mut patterns = vec![fold(&entry.canonical_name)];

    let bare = entry
        .canonical_name
        .split(['(', '（'])
        .next()
        .unwrap_or("")
        .trim();
    if !bare.is_empty() {
        push_unique(&mut patterns, fold(bare));
    }

    let folded_name = fold(&entry.canonical_name);
    if folded_name.contains("유사암") && folded_name.contains("제외") {
        push_unique(&mut patterns, fold("유사암 제외"));
        push_unique(&mut patterns, fold("일반암"));
    }
    if folded_name.contains("재진단") {
        push_unique(&mut patterns, fold("재진단암"));
    }

    patterns.retain(|p| !p.is_empty());
    patterns
}

fn push_unique(patterns: &mut Vec<String>, pattern: String) {
    if !patterns.contains(&pattern) {
        patterns.push(pattern);
    }
}

/// Strip whitespace and lowercase for spacing-insensitive matching
fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
