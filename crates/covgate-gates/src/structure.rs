//! Structural requirement sets for G1

use covgate_domain::SlotKey;
use regex::Regex;
use std::collections::BTreeMap;

/// Per-slot requirement sets for the structure gate.
///
/// A slot with a rule passes G1 only when at least two distinct patterns of
/// its set match the candidate context. Slots without a rule pass through.
/// Patterns are compiled once at construction and never per candidate.
#[derive(Debug, Clone)]
pub struct StructureRules {
    rules: BTreeMap<SlotKey, Vec<Regex>>,
}

impl StructureRules {
    /// Build rules from explicit pattern strings; panics only on invalid
    /// patterns supplied by the caller, which is a construction-time defect
    /// rather than a runtime outcome.
    pub fn new(patterns: BTreeMap<SlotKey, Vec<&str>>) -> Result<Self, regex::Error> {
        let mut rules = BTreeMap::new();
        for (slot, sources) in patterns {
            let compiled = sources
                .into_iter()
                .map(Regex::new)
                .collect::<Result<Vec<_>, _>>()?;
            rules.insert(slot, compiled);
        }
        Ok(Self { rules })
    }

    /// Requirement sets for the numeric slots of Korean insurance documents.
    ///
    /// Each set pairs a slot-keyword pattern with a value-shape pattern, so
    /// a context must both talk about the slot and carry a concrete value.
    pub fn standard() -> Self {
        let mut patterns: BTreeMap<SlotKey, Vec<&str>> = BTreeMap::new();
        patterns.insert(
            SlotKey::WaitingPeriod,
            vec![r"대기기간|면책기간|보장개시", r"\d+\s*(일|개월|년)"],
        );
        patterns.insert(SlotKey::Reduction, vec![r"감액", r"\d+\s*%|\d+\s*(일|개월|년)"]);
        patterns.insert(
            SlotKey::PayoutLimit,
            vec![r"한도|최초", r"\d+\s*(만원|억원|회|%)"],
        );
        patterns.insert(SlotKey::EntryAge, vec![r"가입\s*(나이|연령|가능)", r"\d+\s*세"]);
        patterns.insert(
            SlotKey::EffectiveDate,
            vec![r"보장개시|책임개시|계약일", r"\d+\s*(일|년|월)"],
        );
        Self::new(patterns).expect("standard structure patterns compile")
    }

    /// Rules with no entries; every slot passes through G1
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Number of distinct required patterns matching the context, or `None`
    /// when the slot has no requirement set.
    pub fn match_count(&self, slot: SlotKey, context: &str) -> Option<usize> {
        self.rules
            .get(&slot)
            .map(|patterns| patterns.iter().filter(|p| p.is_match(context)).count())
    }
}
