//! The per-candidate gate chain: G4 → G1 → G2, plus the cross-candidate G3

use crate::structure::StructureRules;
use covgate_domain::{
    Candidate, CoverageRef, EvidenceEntry, GateOutcome, RejectionReason, SlotStatus,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Minimum context length in characters (G4)
const MIN_CONTEXT_CHARS: usize = 15;

/// Minimum context length after removing the matched keyword (G4)
const MIN_RESIDUAL_CHARS: usize = 10;

/// Minimum distinct structure patterns that must match (G1)
const MIN_STRUCTURE_MATCHES: usize = 2;

/// Runs the slot-local gates over one candidate in fixed order.
///
/// Each gate may only keep or downgrade the status produced so far; the
/// chain starts from `Found` and can end at `Found`, `FoundGlobal`, or a
/// rejection (`Unknown`). Never raises.
#[derive(Debug, Clone)]
pub struct GateChain {
    rules: StructureRules,
}

impl GateChain {
    /// Create a chain with the given structure rules
    pub fn new(rules: StructureRules) -> Self {
        Self { rules }
    }

    /// Chain with the standard structure rules
    pub fn standard() -> Self {
        Self::new(StructureRules::standard())
    }

    /// Evaluate G4, G1, G2 for one candidate against the target coverage
    pub fn evaluate(&self, candidate: &Candidate, coverage: &CoverageRef) -> GateOutcome {
        // G4 runs first: fail fast on malformed or trivially short matches
        if let Some(reason) = self.minimum_evidence(candidate) {
            debug!(slot = candidate.slot.as_str(), %reason, "G4 rejected candidate");
            return GateOutcome::reject(reason);
        }

        // G1: structural requirement set
        if let Some(reason) = self.structure(candidate) {
            debug!(slot = candidate.slot.as_str(), %reason, "G1 rejected candidate");
            return GateOutcome::reject(reason);
        }

        // G2: anchoring; a miss keeps the evidence but marks it global
        let outcome = GateOutcome::pass(SlotStatus::Found);
        if self.has_anchor(candidate, coverage) {
            outcome
        } else {
            outcome.downgrade_to(SlotStatus::FoundGlobal, RejectionReason::NoAnchor)
        }
    }

    /// G4: required fields present, context long enough to mean anything
    fn minimum_evidence(&self, candidate: &Candidate) -> Option<RejectionReason> {
        if candidate.matched_keyword.is_empty() {
            return Some(RejectionReason::MissingField("matched_keyword"));
        }
        if candidate.line_text.trim().is_empty() {
            return Some(RejectionReason::MissingField("line_text"));
        }
        let context = candidate.trimmed_context();
        if context.is_empty() {
            return Some(RejectionReason::MissingField("context_text"));
        }
        if context.chars().count() < MIN_CONTEXT_CHARS {
            return Some(RejectionReason::TooShort);
        }
        // Context collapsing to the keyword alone is no evidence either
        let residual = context.replace(&candidate.matched_keyword, "");
        if residual.trim().chars().count() < MIN_RESIDUAL_CHARS {
            return Some(RejectionReason::TooShort);
        }
        None
    }

    /// G1: at least two distinct required patterns must match the context
    fn structure(&self, candidate: &Candidate) -> Option<RejectionReason> {
        match self.rules.match_count(candidate.slot, &candidate.context_text) {
            Some(count) if count < MIN_STRUCTURE_MATCHES => {
                Some(RejectionReason::StructuralMismatch)
            }
            _ => None,
        }
    }

    /// G2: the context must name the coverage by cleaned title or code
    fn has_anchor(&self, candidate: &Candidate, coverage: &CoverageRef) -> bool {
        let title = coverage.cleaned_title();
        (!title.is_empty() && candidate.context_text.contains(&title))
            || (!coverage.code.is_empty() && candidate.context_text.contains(&coverage.code))
    }
}

/// G3: cross-document numeric conflict over the kept evidences.
///
/// Extracts the digit runs of each evidence's excerpt, grouped by document
/// category; a conflict exists when two categories both carry numbers and
/// their sets are fully disjoint. Full-width digits count as their ASCII
/// equivalents. Only called for numeric slots.
pub fn numeric_conflict(evidences: &[EvidenceEntry]) -> bool {
    let mut by_category: BTreeMap<_, BTreeSet<String>> = BTreeMap::new();
    for evidence in evidences {
        by_category
            .entry(evidence.doc_type)
            .or_default()
            .extend(digit_runs(&evidence.excerpt));
    }

    let sets: Vec<&BTreeSet<String>> =
        by_category.values().filter(|set| !set.is_empty()).collect();
    for (i, a) in sets.iter().enumerate() {
        for b in &sets[i + 1..] {
            if a.is_disjoint(b) {
                debug!("numeric conflict between document categories");
                return true;
            }
        }
    }
    false
}

/// Runs of consecutive digits, with full-width digits folded to ASCII
fn digit_runs(text: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        let digit = match c {
            '0'..='9' => Some(c),
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32),
            _ => None,
        };
        match digit {
            Some(d) => current.push(d),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
