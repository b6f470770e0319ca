//! # Predicate Kinds — The Closed Statement Vocabulary
//!
//! The four compliance predicates a relying party can gate on, as a
//! closed tagged enumeration. Each variant fixes the number of disclosed
//! output fields its statements carry; one generic gateway algorithm is
//! parameterized by the variant rather than four copies of the
//! verification path.

use serde::{Deserialize, Serialize};

/// The compliance predicate a statement proves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateKind {
    /// Holder's age meets or exceeds a disclosed threshold.
    AgeOver,
    /// Holder's jurisdiction is a disclosed code.
    JurisdictionIn,
    /// Holder's accreditation tier meets a disclosed level.
    AccreditationTier,
    /// Holder clears the sanctions screen; nothing is disclosed.
    SanctionsClear,
}

impl PredicateKind {
    /// All predicate kinds, in tag order.
    pub const ALL: [PredicateKind; 4] = [
        Self::AgeOver,
        Self::JurisdictionIn,
        Self::AccreditationTier,
        Self::SanctionsClear,
    ];

    /// The number of disclosed output fields a statement of this kind
    /// must carry. A mismatch is a malformed statement.
    pub fn expected_outputs(&self) -> usize {
        match self {
            Self::AgeOver => 1,
            Self::JurisdictionIn => 1,
            Self::AccreditationTier => 1,
            Self::SanctionsClear => 0,
        }
    }

    /// The wire tag, used in the public-input encoding.
    pub fn tag(&self) -> u8 {
        match self {
            Self::AgeOver => 1,
            Self::JurisdictionIn => 2,
            Self::AccreditationTier => 3,
            Self::SanctionsClear => 4,
        }
    }

    /// Decode a wire tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::AgeOver),
            2 => Some(Self::JurisdictionIn),
            3 => Some(Self::AccreditationTier),
            4 => Some(Self::SanctionsClear),
            _ => None,
        }
    }

    /// The predicate name used in events and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgeOver => "AGE_OVER",
            Self::JurisdictionIn => "JURISDICTION_IN",
            Self::AccreditationTier => "ACCREDITATION_TIER",
            Self::SanctionsClear => "SANCTIONS_CLEAR",
        }
    }
}

impl std::fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
