//! Discount Policy Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::Serialize;

use crate::uuids::TypedUuid;

/// Discount Policy UUID
pub type DiscountPolicyUuid = TypedUuid<DiscountPolicy>;

/// Discount kind, as stored alongside a policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiscountKind {
    /// Take a fixed amount off the order total.
    FixedAmount,

    /// Take a percentage of the order total, capped by the policy's maximum.
    ///
    /// Recognised but not executable: the rule factory rejects it. When
    /// implemented, the amount is `floor(total * value / 100)`, clamped to
    /// `max_amount` and then to the total.
    Percentage,

    /// A stored kind this engine does not know about.
    Unrecognized(String),
}

impl DiscountKind {
    /// Storage representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::FixedAmount => "FIXED_AMOUNT",
            Self::Percentage => "PERCENTAGE",
            Self::Unrecognized(kind) => kind,
        }
    }

    /// Whether the kind is one this engine knows, supported or not.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<&str> for DiscountKind {
    fn from(value: &str) -> Self {
        match value {
            "FIXED_AMOUNT" => Self::FixedAmount,
            "PERCENTAGE" => Self::Percentage,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for DiscountKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl Display for DiscountKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl Serialize for DiscountKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Discount Policy Record
///
/// Amounts are in minor currency units. Policies are read-only to the
/// discount engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountPolicy {
    /// Unique policy identifier.
    pub uuid: DiscountPolicyUuid,

    /// Display name, used in result messages.
    pub name: String,

    /// Optional display description.
    pub description: Option<String>,

    /// Calculation kind.
    pub kind: DiscountKind,

    /// Fixed amount off, or percentage points for [`DiscountKind::Percentage`].
    pub value: u64,

    /// Minimum order total the policy applies to (inclusive).
    pub min_amount: Option<u64>,

    /// Cap on the computed discount; only meaningful for percentages.
    pub max_amount: Option<u64>,

    /// Administrative on/off switch, independent of the validity window.
    pub is_active: bool,

    /// Start of the validity window (inclusive).
    pub valid_from: Timestamp,

    /// End of the validity window (inclusive).
    pub valid_to: Timestamp,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_storage_strings() {
        for kind in [DiscountKind::FixedAmount, DiscountKind::Percentage] {
            assert_eq!(DiscountKind::from(kind.as_str()), kind);
        }
    }

    #[test]
    fn unknown_kind_is_preserved_verbatim() {
        let kind = DiscountKind::from("BUY_ONE_GET_ONE");

        assert_eq!(kind, DiscountKind::Unrecognized("BUY_ONE_GET_ONE".to_string()));
        assert_eq!(kind.to_string(), "BUY_ONE_GET_ONE");
    }

    #[test]
    fn kind_strings_are_case_sensitive() {
        assert!(matches!(
            DiscountKind::from("fixed_amount"),
            DiscountKind::Unrecognized(_)
        ));
    }
}
