//! Slot module - the named facts the engine extracts per coverage

use serde::{Deserialize, Serialize};

/// A slot is one extractable fact about a coverage.
///
/// The set is closed: every slot has a pattern definition in the extraction
/// layer and (optionally) a structural requirement set in the gate layer.
/// Wire names are snake_case and stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKey {
    /// Date the coverage takes effect
    EffectiveDate,

    /// Waiting period before benefits apply
    WaitingPeriod,

    /// Benefit reduction schedule (first-year 50% and similar)
    Reduction,

    /// Payout limits (per-claim or aggregate caps)
    PayoutLimit,

    /// Entry age range for enrollment
    EntryAge,

    /// Exclusion clauses
    Exclusions,

    /// Renewal conditions for renewable riders
    RenewalCondition,

    /// Scope of covered surgical methods
    SurgeryScope,

    /// Conditions for re-diagnosis benefits
    RediagnosisCondition,
}

impl SlotKey {
    /// All slots in fixed declaration order
    pub const ALL: [SlotKey; 9] = [
        SlotKey::EffectiveDate,
        SlotKey::WaitingPeriod,
        SlotKey::Reduction,
        SlotKey::PayoutLimit,
        SlotKey::EntryAge,
        SlotKey::Exclusions,
        SlotKey::RenewalCondition,
        SlotKey::SurgeryScope,
        SlotKey::RediagnosisCondition,
    ];

    /// Get the slot name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKey::EffectiveDate => "effective_date",
            SlotKey::WaitingPeriod => "waiting_period",
            SlotKey::Reduction => "reduction",
            SlotKey::PayoutLimit => "payout_limit",
            SlotKey::EntryAge => "entry_age",
            SlotKey::Exclusions => "exclusions",
            SlotKey::RenewalCondition => "renewal_condition",
            SlotKey::SurgeryScope => "surgery_scope",
            SlotKey::RediagnosisCondition => "rediagnosis_condition",
        }
    }

    /// Parse a slot from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "effective_date" => Some(SlotKey::EffectiveDate),
            "waiting_period" => Some(SlotKey::WaitingPeriod),
            "reduction" => Some(SlotKey::Reduction),
            "payout_limit" => Some(SlotKey::PayoutLimit),
            "entry_age" => Some(SlotKey::EntryAge),
            "exclusions" => Some(SlotKey::Exclusions),
            "renewal_condition" => Some(SlotKey::RenewalCondition),
            "surgery_scope" => Some(SlotKey::SurgeryScope),
            "rediagnosis_condition" => Some(SlotKey::RediagnosisCondition),
            _ => None,
        }
    }

    /// Whether this slot carries a deterministically extractable value.
    ///
    /// Only numeric slots participate in value extraction and in G3
    /// cross-document conflict detection.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SlotKey::EffectiveDate
                | SlotKey::WaitingPeriod
                | SlotKey::Reduction
                | SlotKey::PayoutLimit
                | SlotKey::EntryAge
        )
    }
}

impl std::str::FromStr for SlotKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid slot: {}", s))
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
