//! Evidence resolver - per-slot orchestration of extraction and gating

use crate::document_set::{DocumentPages, DocumentSet};
use crate::error::ResolverError;
use crate::value::ValueExtractor;
use covgate_domain::{
    Candidate, CoverageRef, EvidenceEntry, RejectionReason, SlotKey, SlotResult, SlotStatus,
    MAX_EVIDENCE,
};
use covgate_extract::{scan_page, PatternDef, PatternLibrary, RowLocator, RowLocatorConfig};
use covgate_gates::{numeric_conflict, AttributionDecision, GateChain};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Reason attached to a result the conflict gate downgraded
const CONFLICT_REASON: &str = "numeric values disagree across document categories";

/// Resolver limits
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Evidence entries kept per slot result
    pub max_evidence: usize,

    /// Distinct rejection reasons aggregated into an `UNKNOWN` result
    pub max_reasons: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_evidence: MAX_EVIDENCE,
            max_reasons: 3,
        }
    }
}

/// Resolves slots for one coverage against its document set.
///
/// Holds only immutable configuration; every resolution call is independent
/// and deterministic. Candidates live and die within a single call.
pub struct EvidenceResolver {
    patterns: PatternLibrary,
    chain: GateChain,
    values: ValueExtractor,
    config: ResolverConfig,
    row_config: RowLocatorConfig,
    known_coverages: Vec<String>,
}

impl EvidenceResolver {
    /// Create a resolver with explicit configuration
    pub fn new(patterns: PatternLibrary, chain: GateChain, config: ResolverConfig) -> Self {
        Self {
            patterns,
            chain,
            values: ValueExtractor::new(),
            config,
            row_config: RowLocatorConfig::default(),
            known_coverages: Vec::new(),
        }
    }

    /// Resolver with the standard pattern library and gate rules
    pub fn standard() -> Self {
        Self::new(
            PatternLibrary::standard(),
            GateChain::standard(),
            ResolverConfig::default(),
        )
    }

    /// Register the canonical names of all known coverages.
    ///
    /// The row-anchored strategy penalizes rows that better match one of
    /// these names than the target; with no names registered, rows are
    /// located without the cross-coverage penalty.
    pub fn with_known_coverages(mut self, names: Vec<String>) -> Self {
        self.known_coverages = names;
        self
    }

    /// Resolve the requested slots in order for one coverage
    pub fn resolve(
        &self,
        coverage: &CoverageRef,
        slots: &[SlotKey],
        docs: &DocumentSet,
    ) -> Result<Vec<(SlotKey, SlotResult)>, ResolverError> {
        let mut results = Vec::with_capacity(slots.len());
        for &slot in slots {
            let result = self.resolve_slot(coverage, slot, docs)?;
            info!(
                coverage = coverage.code.as_str(),
                slot = slot.as_str(),
                status = result.status.as_str(),
                matches = result.match_count,
                "slot resolved"
            );
            results.push((slot, result));
        }
        Ok(results)
    }

    /// Resolve a single slot: extract candidates across all documents in
    /// category priority order, gate them, keep the top evidences, and
    /// reconcile the final status.
    pub fn resolve_slot(
        &self,
        coverage: &CoverageRef,
        slot: SlotKey,
        docs: &DocumentSet,
    ) -> Result<SlotResult, ResolverError> {
        if docs.is_empty() {
            return Ok(SlotResult::unknown(Some(
                RejectionReason::NoDocuments.describe(),
            )));
        }
        let Some(pattern) = self.patterns.get(slot) else {
            // No pattern: nothing can match, and there is nothing to report
            return Ok(SlotResult::unknown(None));
        };

        let mut survivors: Vec<(Candidate, SlotStatus)> = Vec::new();
        let mut rejections: Vec<RejectionReason> = Vec::new();

        for doc in docs.iter() {
            let mut scanned_lines: BTreeSet<(usize, usize)> = BTreeSet::new();

            for page in 1..=doc.page_count() {
                let Some(text) = doc.page(page) else {
                    return Err(ResolverError::PageUnavailable {
                        category: doc.category(),
                        page,
                        page_count: doc.page_count(),
                    });
                };
                for candidate in scan_page(text, slot, pattern, doc.category(), page) {
                    scanned_lines.insert((candidate.page, candidate.line_num));
                    let outcome = self.chain.evaluate(&candidate, coverage);
                    if outcome.passed {
                        survivors.push((candidate, outcome.status));
                    } else if let Some(reason) = outcome.reason {
                        rejections.push(reason);
                    }
                }
            }

            // Coverage-row-anchored strategy: for table-priority slots, the
            // located coverage row is a candidate too. It runs the same gate
            // chain, so a row without the slot's structure never survives.
            if pattern.table_priority {
                if let Some(candidate) =
                    self.row_candidate(coverage, slot, pattern, &doc, &scanned_lines)
                {
                    let outcome = self.chain.evaluate(&candidate, coverage);
                    if outcome.passed {
                        survivors.push((candidate, outcome.status));
                    } else if let Some(reason) = outcome.reason {
                        rejections.push(reason);
                    }
                }
            }
        }

        if survivors.is_empty() {
            debug!(slot = slot.as_str(), rejected = rejections.len(), "no survivors");
            return Ok(SlotResult::unknown(RejectionReason::summarize(
                &rejections,
                self.config.max_reasons,
            )));
        }

        let match_count = survivors.len();

        // FOUND beats FOUND_GLOBAL, table matches beat prose, earlier
        // document categories beat later ones; the sort is stable so
        // first-encountered order breaks remaining ties.
        survivors.sort_by_key(|(candidate, status)| {
            (
                *status != SlotStatus::Found,
                *status != SlotStatus::FoundGlobal,
                !candidate.is_table_shaped,
                candidate.category.priority_index(),
            )
        });

        let evidences: Vec<EvidenceEntry> = survivors
            .iter()
            .take(self.config.max_evidence)
            .map(|(candidate, status)| EvidenceEntry::from_candidate(candidate, *status))
            .collect();

        let conflict = slot.is_numeric() && numeric_conflict(&evidences);
        let status = if conflict {
            SlotStatus::Conflict
        } else if evidences
            .iter()
            .any(|evidence| evidence.gate_status == SlotStatus::Found)
        {
            SlotStatus::Found
        } else {
            SlotStatus::FoundGlobal
        };

        // Value extraction reads the single top-ranked evidence only, even
        // when the conflict gate fired; values are never merged.
        let value = if slot.is_numeric() {
            evidences
                .first()
                .and_then(|evidence| self.values.extract(&evidence.excerpt))
        } else {
            None
        };

        let reason = match status {
            SlotStatus::Conflict => Some(CONFLICT_REASON.to_string()),
            SlotStatus::FoundGlobal => Some(RejectionReason::NoAnchor.describe()),
            _ => None,
        };

        Ok(SlotResult {
            status,
            value,
            match_count,
            evidences,
            reason,
        })
    }

    /// Candidate from the coverage-row-anchored strategy, if the document
    /// holds an acceptable row for the target and keyword scanning has not
    /// already claimed that line.
    fn row_candidate(
        &self,
        coverage: &CoverageRef,
        slot: SlotKey,
        pattern: &PatternDef,
        doc: &DocumentPages<'_>,
        scanned_lines: &BTreeSet<(usize, usize)>,
    ) -> Option<Candidate> {
        let competing: Vec<String> = self
            .known_coverages
            .iter()
            .filter(|name| name.as_str() != coverage.name)
            .cloned()
            .collect();
        let locator = RowLocator::new(self.row_config.clone(), competing);
        let row = locator.find_best_row(doc, coverage)?;
        if scanned_lines.contains(&(row.page, row.line_num)) {
            return None;
        }

        // The row matched by similarity; the slot keyword is preferred as
        // the locator label when the blob carries one.
        let keyword = pattern
            .keywords
            .iter()
            .find(|k| row.text.contains(k.as_str()))
            .cloned()
            .unwrap_or_else(|| coverage.cleaned_title());
        Some(Candidate {
            slot,
            category: doc.category(),
            page: row.page,
            matched_keyword: keyword,
            line_num: row.line_num,
            line_text: row.text.lines().next().unwrap_or_default().to_string(),
            context_text: row.text,
            is_table_shaped: true,
        })
    }
}

/// Fold a G5 attribution decision into a slot result.
///
/// An accepted or skipped decision leaves the result untouched; a rejection
/// drops the evidence and lands on `UNKNOWN`, since unattributed evidence
/// must never be reported for the target coverage.
pub fn apply_attribution(result: SlotResult, decision: &AttributionDecision) -> SlotResult {
    match decision {
        AttributionDecision::Accepted | AttributionDecision::Skipped => result,
        AttributionDecision::Rejected(reason) => SlotResult {
            status: SlotStatus::Unknown,
            value: None,
            match_count: result.match_count,
            evidences: Vec::new(),
            reason: Some(reason.describe()),
        },
    }
}
