//! Discounts Service

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, debug, error, warn};

use crate::{
    database::Db,
    domain::discounts::{
        data::{
            AppliedDiscount, DiscountCalculationInput, DiscountPreview, DiscountResult, LineItem,
            PolicyFilter, PolicyPreview,
        },
        errors::DiscountRejection,
        factory::{is_kind_supported, rule_for},
        records::{DiscountKind, DiscountPolicy, DiscountPolicyUuid},
        repository::{DiscountPoliciesRepository, PgDiscountPoliciesRepository},
    },
};

/// Discounts service over a policy repository.
#[derive(Clone)]
pub struct PgDiscountsService {
    policies: Arc<dyn DiscountPoliciesRepository>,
}

impl PgDiscountsService {
    /// Service backed by the `PostgreSQL` policy repository.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_repository(Arc::new(PgDiscountPoliciesRepository::new(db)))
    }

    /// Service over any policy repository.
    #[must_use]
    pub fn with_repository(policies: Arc<dyn DiscountPoliciesRepository>) -> Self {
        Self { policies }
    }
}

impl Debug for PgDiscountsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PgDiscountsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl DiscountsService for PgDiscountsService {
    #[tracing::instrument(
        name = "discounts.service.apply_discount",
        skip(self, input),
        fields(
            policy_uuid = %policy,
            total_amount = input.total_amount,
            discount_amount = tracing::field::Empty,
            is_applicable = tracing::field::Empty
        )
    )]
    async fn apply_discount(
        &self,
        policy: DiscountPolicyUuid,
        input: DiscountCalculationInput,
        point_in_time: Timestamp,
    ) -> AppliedDiscount {
        let total_amount = input.total_amount;

        let found = match self.policies.find_policy(policy).await {
            Ok(found) => found,
            Err(error) => {
                error!(%error, "failed to look up discount policy");

                return AppliedDiscount {
                    result: rejected(total_amount, &DiscountRejection::Storage),
                    policy: None,
                };
            }
        };

        let Some(found) = found else {
            debug!("discount policy not found");

            return AppliedDiscount {
                result: rejected(total_amount, &DiscountRejection::NotFound),
                policy: None,
            };
        };

        let result = match rule_for(&found) {
            Ok(rule) => rule.apply(&input, point_in_time),
            Err(error) => {
                debug!(%error, kind = %found.kind, "no rule for discount kind");

                rejected(total_amount, &DiscountRejection::from(error))
            }
        };

        let span = Span::current();

        span.record("discount_amount", result.discount_amount);
        span.record("is_applicable", result.is_applicable);

        if !result.is_applicable {
            debug!(reason = %result.message, "discount not applied");
        }

        AppliedDiscount {
            result,
            policy: Some(found),
        }
    }

    #[tracing::instrument(
        name = "discounts.service.list_available_policies",
        skip(self),
        fields(policy_count = tracing::field::Empty)
    )]
    async fn list_available_policies(&self, point_in_time: Timestamp) -> Vec<DiscountPolicy> {
        match self
            .policies
            .list_policies(PolicyFilter::available_at(point_in_time))
            .await
        {
            Ok(policies) => {
                Span::current().record("policy_count", policies.len());

                policies
            }
            Err(error) => {
                error!(%error, "failed to list discount policies");

                Vec::new()
            }
        }
    }

    #[tracing::instrument(
        name = "discounts.service.preview_all",
        skip(self),
        fields(preview_count = tracing::field::Empty)
    )]
    async fn preview_all(&self, total_amount: u64, point_in_time: Timestamp) -> Vec<PolicyPreview> {
        let previews: Vec<PolicyPreview> = self
            .list_available_policies(point_in_time)
            .await
            .into_iter()
            .filter(|policy| is_previewable(&policy.kind))
            .map(|policy| preview_policy(policy, total_amount, point_in_time))
            .collect();

        Span::current().record("preview_count", previews.len());

        previews
    }
}

/// Discount operations over stored policies.
///
/// None of these fail: storage and rule errors are reported as inapplicable
/// results or empty listings.
#[automock]
#[async_trait]
pub trait DiscountsService: Send + Sync {
    /// Apply a stored policy to an order.
    async fn apply_discount(
        &self,
        policy: DiscountPolicyUuid,
        input: DiscountCalculationInput,
        point_in_time: Timestamp,
    ) -> AppliedDiscount;

    /// Active policies whose window contains `point_in_time`, newest first.
    async fn list_available_policies(&self, point_in_time: Timestamp) -> Vec<DiscountPolicy>;

    /// Preview every available policy against an order total.
    ///
    /// Percentage policies are left out. Policies with an unrecognized kind are
    /// kept as `can_apply: false` entries carrying the rule error message.
    async fn preview_all(&self, total_amount: u64, point_in_time: Timestamp) -> Vec<PolicyPreview>;
}

/// Discount amount a policy grants an order, zero when it does not apply.
pub async fn calculate_discount(
    service: &dyn DiscountsService,
    policy: DiscountPolicyUuid,
    total_amount: u64,
    items: Vec<LineItem>,
    point_in_time: Timestamp,
) -> u64 {
    service
        .apply_discount(
            policy,
            DiscountCalculationInput::with_items(total_amount, items),
            point_in_time,
        )
        .await
        .result
        .discount_amount
}

fn rejected(total_amount: u64, rejection: &DiscountRejection) -> DiscountResult {
    DiscountResult::rejected(total_amount, rejection.to_string())
}

/// Recognised kinds without a rule are hidden. Unknown kinds stay listed so
/// their construction error is reported.
fn is_previewable(kind: &DiscountKind) -> bool {
    is_kind_supported(kind) || !kind.is_recognized()
}

fn preview_policy(
    policy: DiscountPolicy,
    total_amount: u64,
    point_in_time: Timestamp,
) -> PolicyPreview {
    let preview = match rule_for(&policy) {
        Ok(rule) => rule.preview(total_amount, point_in_time),
        Err(error) => {
            warn!(policy_uuid = %policy.uuid, %error, "could not preview discount policy");

            DiscountPreview {
                can_apply: false,
                discount_amount: 0,
                message: error.to_string(),
            }
        }
    };

    PolicyPreview {
        can_apply: preview.can_apply,
        discount_amount: preview.discount_amount,
        final_amount: total_amount.saturating_sub(preview.discount_amount),
        message: preview.message,
        policy,
    }
}
