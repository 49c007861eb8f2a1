//! Status module - the four terminal states of a slot resolution

use serde::{Deserialize, Serialize};

/// Resolution status of a slot
///
/// Gates may only keep or downgrade a status, never upgrade it. The rank
/// order used for that invariant is:
/// `Found > FoundGlobal > Conflict > Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    /// Evidence found and anchored to the target coverage
    Found,

    /// Evidence is well-structured but not proven coverage-specific
    FoundGlobal,

    /// Document categories disagree on the extracted numbers
    Conflict,

    /// No acceptable evidence
    Unknown,
}

impl SlotStatus {
    /// Get the status name as a string (wire form)
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Found => "FOUND",
            SlotStatus::FoundGlobal => "FOUND_GLOBAL",
            SlotStatus::Conflict => "CONFLICT",
            SlotStatus::Unknown => "UNKNOWN",
        }
    }

    /// Parse a status from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FOUND" => Some(SlotStatus::Found),
            "FOUND_GLOBAL" => Some(SlotStatus::FoundGlobal),
            "CONFLICT" => Some(SlotStatus::Conflict),
            "UNKNOWN" => Some(SlotStatus::Unknown),
            _ => None,
        }
    }

    /// Strength rank for the no-upgrade invariant (higher is stronger)
    pub fn rank(&self) -> u8 {
        match self {
            SlotStatus::Found => 3,
            SlotStatus::FoundGlobal => 2,
            SlotStatus::Conflict => 1,
            SlotStatus::Unknown => 0,
        }
    }

    /// The weaker of two statuses
    pub fn min(self, other: Self) -> Self {
        if other.rank() < self.rank() {
            other
        } else {
            self
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_status() -> impl Strategy<Value = SlotStatus> {
        prop_oneof![
            Just(SlotStatus::Found),
            Just(SlotStatus::FoundGlobal),
            Just(SlotStatus::Conflict),
            Just(SlotStatus::Unknown),
        ]
    }

    proptest! {
        /// Property: min() never produces a status stronger than either input
        #[test]
        fn test_min_is_a_lower_bound(a in any_status(), b in any_status()) {
            let m = a.min(b);
            prop_assert!(m.rank() <= a.rank());
            prop_assert!(m.rank() <= b.rank());
        }

        /// Property: wire round-trip preserves the status
        #[test]
        fn test_wire_round_trip(s in any_status()) {
            prop_assert_eq!(SlotStatus::parse(s.as_str()), Some(s));
        }
    }
}
