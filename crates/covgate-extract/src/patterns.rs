//! Pattern library - trigger keywords and context windows per slot

use covgate_domain::SlotKey;
use std::collections::BTreeMap;

/// Extraction pattern for one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDef {
    /// Trigger keywords; on a matching line the first listed keyword wins
    pub keywords: Vec<String>,

    /// Context window: this many lines before and after the matched line
    pub context_lines: usize,

    /// Whether table-shaped lines are scanned first
    pub table_priority: bool,
}

impl PatternDef {
    /// Convenience constructor for literal keyword lists
    pub fn new(keywords: &[&str], context_lines: usize, table_priority: bool) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            context_lines,
            table_priority,
        }
    }
}

/// Immutable slot → pattern mapping, built once at startup and injected
/// into the resolver. Custom libraries with synthetic patterns are used by
/// tests; production runs use [`PatternLibrary::standard`].
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    defs: BTreeMap<SlotKey, PatternDef>,
}

impl PatternLibrary {
    /// Build a library from explicit definitions
    pub fn new(defs: BTreeMap<SlotKey, PatternDef>) -> Self {
        Self { defs }
    }

    /// The standard Korean insurance-document pattern set.
    ///
    /// Covers every slot; table priority is set for the slots whose values
    /// are normally carried by coverage tables rather than prose clauses.
    pub fn standard() -> Self {
        let mut defs = BTreeMap::new();
        defs.insert(
            SlotKey::EffectiveDate,
            PatternDef::new(&["보장개시일", "책임개시일", "계약일"], 2, false),
        );
        defs.insert(
            SlotKey::WaitingPeriod,
            PatternDef::new(&["대기기간", "면책기간", "보장개시"], 2, true),
        );
        defs.insert(
            SlotKey::Reduction,
            PatternDef::new(&["감액", "감액지급", "감액기간"], 3, true),
        );
        defs.insert(
            SlotKey::PayoutLimit,
            PatternDef::new(&["지급한도", "보상한도", "최초 1회"], 2, true),
        );
        defs.insert(
            SlotKey::EntryAge,
            PatternDef::new(&["가입나이", "가입연령", "가입가능 나이"], 2, true),
        );
        defs.insert(
            SlotKey::Exclusions,
            PatternDef::new(&["면책", "보장하지 않는", "지급하지 않는"], 3, false),
        );
        defs.insert(
            SlotKey::RenewalCondition,
            PatternDef::new(&["갱신", "재가입"], 3, false),
        );
        defs.insert(
            SlotKey::SurgeryScope,
            PatternDef::new(&["수술의 정의", "수술방법", "수술분류표"], 3, false),
        );
        defs.insert(
            SlotKey::RediagnosisCondition,
            PatternDef::new(&["재진단", "재진단암", "재발"], 3, false),
        );
        Self { defs }
    }

    /// Pattern for the given slot, if defined
    pub fn get(&self, slot: SlotKey) -> Option<&PatternDef> {
        self.defs.get(&slot)
    }

    /// Number of slots with a pattern
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
