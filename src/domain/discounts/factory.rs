//! Discount Rule Factory

use crate::domain::discounts::{
    errors::DiscountRuleError,
    records::{DiscountKind, DiscountPolicy},
    rules::{Calculation, DiscountRule, fixed_amount_off},
};

const SUPPORTED_KINDS: &[DiscountKind] = &[DiscountKind::FixedAmount];

/// Build the rule for a policy's kind.
///
/// # Errors
///
/// Returns [`DiscountRuleError::Unsupported`] for percentage policies and
/// [`DiscountRuleError::Unrecognized`] for kinds this engine does not know.
pub fn rule_for(policy: &DiscountPolicy) -> Result<DiscountRule<'_>, DiscountRuleError> {
    calculation_for(&policy.kind).map(|calculate| DiscountRule::new(policy, calculate))
}

/// Kinds that [`rule_for`] can build.
#[must_use]
pub const fn supported_kinds() -> &'static [DiscountKind] {
    SUPPORTED_KINDS
}

/// Whether [`rule_for`] succeeds for policies of `kind`.
#[must_use]
pub fn is_kind_supported(kind: &DiscountKind) -> bool {
    calculation_for(kind).is_ok()
}

fn calculation_for(kind: &DiscountKind) -> Result<Calculation, DiscountRuleError> {
    match kind {
        DiscountKind::FixedAmount => Ok(fixed_amount_off as Calculation),
        DiscountKind::Percentage => Err(DiscountRuleError::Unsupported),
        DiscountKind::Unrecognized(kind) => Err(DiscountRuleError::Unrecognized(kind.clone())),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::discounts::{
        data::DiscountCalculationInput,
        test_support::{fixed_policy, mid_window, policy},
    };

    use super::*;

    #[test]
    fn builds_fixed_amount_rule() -> TestResult {
        let policy = fixed_policy(5_000, Some(20_000));

        let rule = rule_for(&policy)?;
        let result = rule.apply(&DiscountCalculationInput::new(30_000), mid_window());

        assert_eq!(rule.policy(), &policy);
        assert_eq!(result.discount_amount, 5_000);

        Ok(())
    }

    #[test]
    fn percentage_is_unsupported() {
        let policy = policy(DiscountKind::Percentage, 10, None);

        let result = rule_for(&policy);

        assert!(
            matches!(result, Err(DiscountRuleError::Unsupported)),
            "expected Unsupported, got {result:?}"
        );
    }

    #[test]
    fn unknown_kind_is_unrecognized() {
        let policy = policy(DiscountKind::from("BOGOF"), 10, None);

        let result = rule_for(&policy);

        assert!(
            matches!(&result, Err(DiscountRuleError::Unrecognized(kind)) if kind == "BOGOF"),
            "expected Unrecognized(BOGOF), got {result:?}"
        );
    }

    #[test]
    fn only_fixed_amount_is_supported() {
        assert_eq!(supported_kinds(), &[DiscountKind::FixedAmount]);
        assert!(is_kind_supported(&DiscountKind::FixedAmount));
        assert!(!is_kind_supported(&DiscountKind::from("PERCENTAGE")));
        assert!(!is_kind_supported(&DiscountKind::from("BOGOF")));
    }

    #[test]
    fn supported_kinds_agree_with_factory() {
        for kind in supported_kinds() {
            let policy = policy(kind.clone(), 100, None);

            assert!(rule_for(&policy).is_ok(), "{kind} is listed but cannot be built");
        }
    }
}
