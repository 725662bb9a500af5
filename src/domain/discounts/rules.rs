//! Discount Rules
//!
//! A rule pairs a policy with the pure calculation function for its kind.
//! Rules are built by [`rule_for`](crate::domain::discounts::factory::rule_for).

use jiff::Timestamp;

use crate::domain::discounts::{
    data::{DiscountCalculationInput, DiscountPreview, DiscountResult},
    errors::DiscountRejection,
    records::DiscountPolicy,
};

/// Kind-specific discount amount, before clamping to the order total.
pub(crate) type Calculation = fn(&DiscountPolicy, &DiscountCalculationInput) -> u64;

/// Fixed amount off, never more than the order total.
pub(crate) fn fixed_amount_off(policy: &DiscountPolicy, input: &DiscountCalculationInput) -> u64 {
    policy.value.min(input.total_amount)
}

/// A policy bound to its calculation.
#[derive(Debug, Clone, Copy)]
pub struct DiscountRule<'a> {
    policy: &'a DiscountPolicy,
    calculate: Calculation,
}

impl<'a> DiscountRule<'a> {
    pub(crate) const fn new(policy: &'a DiscountPolicy, calculate: Calculation) -> Self {
        Self { policy, calculate }
    }

    /// The policy this rule evaluates.
    #[must_use]
    pub const fn policy(&self) -> &'a DiscountPolicy {
        self.policy
    }

    /// Apply the policy to an order.
    #[must_use]
    pub fn apply(&self, input: &DiscountCalculationInput, point_in_time: Timestamp) -> DiscountResult {
        let total_amount = input.total_amount;

        if let Err(rejection) = self.validate(total_amount, point_in_time) {
            return DiscountResult::rejected(total_amount, rejection.to_string());
        }

        let discount_amount = self.discount_amount(input);

        DiscountResult {
            discount_amount,
            final_amount: total_amount.saturating_sub(discount_amount),
            is_applicable: true,
            message: format!("applied: {}", self.policy.name),
        }
    }

    /// Preview the policy against a bare total.
    ///
    /// Agrees with [`apply`](Self::apply) on applicability and amount. Below the
    /// minimum, the message states how much more is needed to qualify.
    #[must_use]
    pub fn preview(&self, total_amount: u64, point_in_time: Timestamp) -> DiscountPreview {
        match self.validate(total_amount, point_in_time) {
            Ok(()) => {
                let discount_amount =
                    self.discount_amount(&DiscountCalculationInput::new(total_amount));

                DiscountPreview {
                    can_apply: true,
                    discount_amount,
                    message: format!("{discount_amount} off will be applied"),
                }
            }
            Err(DiscountRejection::BelowMinimum { minimum }) => DiscountPreview {
                can_apply: false,
                discount_amount: 0,
                message: format!(
                    "add {} more to qualify",
                    minimum.saturating_sub(total_amount)
                ),
            },
            Err(rejection) => DiscountPreview {
                can_apply: false,
                discount_amount: 0,
                message: rejection.to_string(),
            },
        }
    }

    /// Short human-readable summary of the offer.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.policy.min_amount {
            Some(minimum) => format!("{} off (on orders of {minimum} or more)", self.policy.value),
            None => format!("{} off", self.policy.value),
        }
    }

    /// Check eligibility. The first failing check wins.
    ///
    /// # Errors
    ///
    /// Returns the [`DiscountRejection`] describing why the policy does not apply.
    pub fn validate(
        &self,
        total_amount: u64,
        point_in_time: Timestamp,
    ) -> Result<(), DiscountRejection> {
        let policy = self.policy;

        if !policy.is_active {
            return Err(DiscountRejection::Inactive);
        }

        if point_in_time < policy.valid_from {
            return Err(DiscountRejection::NotYetValid);
        }

        if point_in_time > policy.valid_to {
            return Err(DiscountRejection::Expired);
        }

        if let Some(minimum) = policy.min_amount
            && total_amount < minimum
        {
            return Err(DiscountRejection::BelowMinimum { minimum });
        }

        Ok(())
    }

    fn discount_amount(&self, input: &DiscountCalculationInput) -> u64 {
        (self.calculate)(self.policy, input).min(input.total_amount)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::discounts::test_support::{at, fixed_policy, mid_window};

    use super::*;

    fn apply(policy: &DiscountPolicy, total_amount: u64) -> DiscountResult {
        DiscountRule::new(policy, fixed_amount_off)
            .apply(&DiscountCalculationInput::new(total_amount), mid_window())
    }

    #[test]
    fn applies_fixed_amount_above_minimum() {
        let policy = fixed_policy(5_000, Some(20_000));

        let result = apply(&policy, 30_000);

        assert_eq!(result.discount_amount, 5_000);
        assert_eq!(result.final_amount, 25_000);
        assert!(result.is_applicable, "expected applicable, got {result:?}");
        assert_eq!(result.message, "applied: 5000 off");
    }

    #[test]
    fn rejects_total_below_minimum() {
        let policy = fixed_policy(5_000, Some(20_000));

        for total in [15_000, 3_000] {
            let result = apply(&policy, total);

            assert_eq!(
                result,
                DiscountResult::rejected(
                    total,
                    "total amount is below the minimum required of 20000"
                )
            );
        }
    }

    #[test]
    fn minimum_boundary_is_inclusive() {
        let policy = fixed_policy(5_000, Some(50_000));

        assert!(!apply(&policy, 49_999).is_applicable, "49999 should be below the minimum");
        assert!(apply(&policy, 50_000).is_applicable, "50000 should meet the minimum");
    }

    #[test]
    fn clamps_discount_to_order_total() {
        let policy = fixed_policy(5_000, None);

        let result = apply(&policy, 3_000);

        assert_eq!(result.discount_amount, 3_000);
        assert_eq!(result.final_amount, 0);
        assert!(result.is_applicable, "expected applicable, got {result:?}");
    }

    #[test]
    fn zero_total_yields_zero_discount() {
        let policy = fixed_policy(5_000, None);

        let result = apply(&policy, 0);

        assert_eq!(result.discount_amount, 0);
        assert_eq!(result.final_amount, 0);
    }

    #[test]
    fn applicable_amounts_sum_to_total() {
        let policy = fixed_policy(7_000, None);

        for total in [0, 1, 6_999, 7_000, 7_001, 1_390_000] {
            let result = apply(&policy, total);

            assert_eq!(result.discount_amount, policy.value.min(total));
            assert_eq!(
                result.discount_amount + result.final_amount,
                total,
                "amounts drifted for total {total}"
            );
        }
    }

    #[test]
    fn inactive_policy_never_applies() {
        let mut policy = fixed_policy(5_000, None);
        policy.is_active = false;

        for total in [0, 5_000, 1_000_000] {
            let result = apply(&policy, total);

            assert!(!result.is_applicable, "inactive policy applied to {total}");
            assert_eq!(result.message, "discount is inactive");
        }
    }

    #[test]
    fn inactive_check_wins_over_window() {
        let mut policy = fixed_policy(5_000, None);
        policy.is_active = false;

        let result = DiscountRule::new(&policy, fixed_amount_off)
            .apply(&DiscountCalculationInput::new(10_000), at("2030-01-01T00:00:00Z"));

        assert_eq!(result.message, "discount is inactive");
    }

    #[test]
    fn rejects_outside_validity_window() {
        let policy = fixed_policy(5_000, None);
        let rule = DiscountRule::new(&policy, fixed_amount_off);
        let input = DiscountCalculationInput::new(10_000);

        let early = rule.apply(&input, at("2024-12-31T23:59:59Z"));
        let late = rule.apply(&input, at("2026-01-01T00:00:00Z"));

        assert_eq!(early.message, "discount is not yet within the validity window");
        assert_eq!(late.message, "discount validity window has expired");
        assert!(!early.is_applicable && !late.is_applicable, "window should be enforced");
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let policy = fixed_policy(5_000, None);
        let rule = DiscountRule::new(&policy, fixed_amount_off);
        let input = DiscountCalculationInput::new(10_000);

        assert!(rule.apply(&input, policy.valid_from).is_applicable, "start is inclusive");
        assert!(rule.apply(&input, policy.valid_to).is_applicable, "end is inclusive");
    }

    #[test]
    fn preview_states_remaining_amount_below_minimum() {
        let policy = fixed_policy(5_000, Some(20_000));
        let rule = DiscountRule::new(&policy, fixed_amount_off);

        let preview = rule.preview(15_000, mid_window());

        assert_eq!(
            preview,
            DiscountPreview {
                can_apply: false,
                discount_amount: 0,
                message: "add 5000 more to qualify".to_string(),
            }
        );
    }

    #[test]
    fn preview_agrees_with_apply() {
        let policy = fixed_policy(5_000, Some(20_000));
        let rule = DiscountRule::new(&policy, fixed_amount_off);

        for total in [0, 3_000, 19_999, 20_000, 30_000] {
            let preview = rule.preview(total, mid_window());
            let result = rule.apply(&DiscountCalculationInput::new(total), mid_window());

            assert_eq!(preview.can_apply, result.is_applicable, "applicability differs at {total}");
            assert_eq!(preview.discount_amount, result.discount_amount, "amount differs at {total}");
        }
    }

    #[test]
    fn preview_reports_amount_when_applicable() {
        let policy = fixed_policy(5_000, Some(20_000));
        let rule = DiscountRule::new(&policy, fixed_amount_off);

        let preview = rule.preview(30_000, mid_window());

        assert!(preview.can_apply, "expected preview to apply, got {preview:?}");
        assert_eq!(preview.message, "5000 off will be applied");
    }

    #[test]
    fn describe_mentions_minimum_when_set() {
        let with_minimum = fixed_policy(5_000, Some(20_000));
        let without_minimum = fixed_policy(5_000, None);

        assert_eq!(
            DiscountRule::new(&with_minimum, fixed_amount_off).describe(),
            "5000 off (on orders of 20000 or more)"
        );
        assert_eq!(DiscountRule::new(&without_minimum, fixed_amount_off).describe(), "5000 off");
    }
}
