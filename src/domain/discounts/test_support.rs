use jiff::Timestamp;

use crate::domain::discounts::records::{DiscountKind, DiscountPolicy, DiscountPolicyUuid};

pub(crate) fn at(timestamp: &str) -> Timestamp {
    timestamp.parse().expect("test timestamps are valid RFC 3339")
}

/// An instant inside every fixture policy's window.
pub(crate) fn mid_window() -> Timestamp {
    at("2025-06-15T12:00:00Z")
}

pub(crate) fn policy(kind: DiscountKind, value: u64, min_amount: Option<u64>) -> DiscountPolicy {
    let created_at = at("2024-12-01T00:00:00Z");

    DiscountPolicy {
        uuid: DiscountPolicyUuid::new(),
        name: format!("{value} off"),
        description: None,
        kind,
        value,
        min_amount,
        max_amount: None,
        is_active: true,
        valid_from: at("2025-01-01T00:00:00Z"),
        valid_to: at("2025-12-31T23:59:59Z"),
        created_at,
        updated_at: created_at,
    }
}

pub(crate) fn fixed_policy(value: u64, min_amount: Option<u64>) -> DiscountPolicy {
    policy(DiscountKind::FixedAmount, value, min_amount)
}
