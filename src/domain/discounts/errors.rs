//! Discount errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Failure to build a rule for a policy's kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountRuleError {
    /// Percentage policies, recognised but without a rule.
    #[error("percentage discounts are not supported yet; only fixed amount discounts can be applied")]
    Unsupported,

    /// A stored kind this engine does not know.
    #[error("unrecognized discount kind: {0}")]
    Unrecognized(String),
}

/// Reason a discount was not applied. The display text is the result message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountRejection {
    /// The policy's active flag is off.
    #[error("discount is inactive")]
    Inactive,

    /// Checked before the window opens.
    #[error("discount is not yet within the validity window")]
    NotYetValid,

    /// Checked after the window closed.
    #[error("discount validity window has expired")]
    Expired,

    /// The order total is under the policy minimum.
    #[error("total amount is below the minimum required of {minimum}")]
    BelowMinimum {
        /// Policy minimum order total.
        minimum: u64,
    },

    /// No policy has the requested UUID.
    #[error("discount policy not found")]
    NotFound,

    /// No rule could be built for the policy's kind.
    #[error(transparent)]
    Rule(#[from] DiscountRuleError),

    /// The policy could not be loaded.
    #[error("failed to apply discount")]
    Storage,
}

/// Policy storage errors.
#[derive(Debug, Error)]
pub enum DiscountsRepositoryError {
    /// Policy UUID already exists.
    #[error("discount policy already exists")]
    AlreadyExists,

    /// Policy not found.
    #[error("discount policy not found")]
    NotFound,

    /// Missing required data.
    #[error("missing required data")]
    MissingRequiredData,

    /// A column constraint rejected the data.
    #[error("invalid data")]
    InvalidData,

    /// Amount outside the storage range.
    #[error("invalid amount value")]
    InvalidAmount(#[from] TryFromIntError),

    /// Any other SQL error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for DiscountsRepositoryError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = DiscountsRepositoryError::from(Error::RowNotFound);

        assert!(
            matches!(error, DiscountsRepositoryError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn other_sqlx_errors_are_wrapped() {
        let error = DiscountsRepositoryError::from(Error::PoolTimedOut);

        assert!(
            matches!(error, DiscountsRepositoryError::Sql(Error::PoolTimedOut)),
            "expected Sql(PoolTimedOut), got {error:?}"
        );
    }

    #[test]
    fn below_minimum_message_states_the_minimum() {
        let message = DiscountRejection::BelowMinimum { minimum: 20_000 }.to_string();

        assert_eq!(message, "total amount is below the minimum required of 20000");
    }

    #[test]
    fn rule_errors_surface_verbatim() {
        let rule = DiscountRuleError::Unrecognized("BOGOF".to_string());
        let rejection = DiscountRejection::from(rule.clone());

        assert_eq!(rejection.to_string(), rule.to_string());
    }
}
