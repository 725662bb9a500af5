//! Discounts Data

use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::discounts::records::{DiscountKind, DiscountPolicy, DiscountPolicyUuid};

/// Order line passed through to discount rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Product being ordered.
    pub product_uuid: Uuid,

    /// Number of units.
    pub quantity: u32,

    /// Unit price in minor units.
    pub price: u64,
}

/// Discount Calculation Input
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DiscountCalculationInput {
    /// Order total in minor units.
    pub total_amount: u64,

    /// Order lines. Not consulted by the fixed amount rule.
    pub items: Vec<LineItem>,
}

impl DiscountCalculationInput {
    /// Input for a bare order total.
    #[must_use]
    pub fn new(total_amount: u64) -> Self {
        Self {
            total_amount,
            items: Vec::new(),
        }
    }

    /// Input for an order total with its lines.
    #[must_use]
    pub fn with_items(total_amount: u64, items: Vec<LineItem>) -> Self {
        Self {
            total_amount,
            items,
        }
    }
}

/// Outcome of applying one policy to one order total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountResult {
    /// Amount taken off the total.
    pub discount_amount: u64,

    /// Total after the discount.
    pub final_amount: u64,

    /// Whether the policy applied.
    pub is_applicable: bool,

    /// Outcome message shown to the customer.
    pub message: String,
}

impl DiscountResult {
    /// An inapplicable result that leaves the total untouched.
    #[must_use]
    pub fn rejected(total_amount: u64, message: impl Into<String>) -> Self {
        Self {
            discount_amount: 0,
            final_amount: total_amount,
            is_applicable: false,
            message: message.into(),
        }
    }
}

/// Rule-level preview of a single policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountPreview {
    /// Whether applying now would succeed.
    pub can_apply: bool,

    /// Amount that would be taken off.
    pub discount_amount: u64,

    /// Hint or rejection message.
    pub message: String,
}

/// Service-level preview entry for one available policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyPreview {
    /// The previewed policy.
    pub policy: DiscountPolicy,

    /// Whether applying now would succeed.
    pub can_apply: bool,

    /// Amount that would be taken off.
    pub discount_amount: u64,

    /// Total after the previewed discount.
    pub final_amount: u64,

    /// Hint, rejection or rule construction message.
    pub message: String,
}

/// Result of applying a policy by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedDiscount {
    /// Outcome of the evaluation.
    #[serde(flatten)]
    pub result: DiscountResult,

    /// The policy that was evaluated, when it exists.
    pub policy: Option<DiscountPolicy>,
}

/// Storage-side filter for policy listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolicyFilter {
    /// Only policies with the active flag set.
    pub active_only: bool,

    /// Only policies whose validity window contains this instant.
    pub valid_at: Option<Timestamp>,
}

impl PolicyFilter {
    /// Active policies valid at `point_in_time`.
    #[must_use]
    pub const fn available_at(point_in_time: Timestamp) -> Self {
        Self {
            active_only: true,
            valid_at: Some(point_in_time),
        }
    }
}

/// New Discount Policy Data
///
/// Field meanings match [`DiscountPolicy`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscountPolicy {
    /// Policy UUID
    pub uuid: DiscountPolicyUuid,

    /// Display name
    pub name: String,

    /// Display description
    pub description: Option<String>,

    /// Calculation kind
    pub kind: DiscountKind,

    /// Kind-dependent value
    pub value: u64,

    /// Inclusive minimum order total
    pub min_amount: Option<u64>,

    /// Discount cap
    pub max_amount: Option<u64>,

    /// Active flag
    pub is_active: bool,

    /// Window start (inclusive)
    pub valid_from: Timestamp,

    /// Window end (inclusive)
    pub valid_to: Timestamp,
}
