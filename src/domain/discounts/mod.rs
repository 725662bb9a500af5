//! Discounts
//!
//! Policies are loaded through a [`DiscountPoliciesRepository`], bound to the
//! calculation for their kind by [`factory::rule_for`], then applied or
//! previewed by a [`DiscountsService`].

pub mod data;
pub mod errors;
pub mod factory;
pub mod records;
pub mod repository;
pub mod rules;
pub mod service;

#[cfg(test)]
mod test_support;

pub use errors::{DiscountRejection, DiscountRuleError, DiscountsRepositoryError};
pub use repository::{
    DiscountPoliciesRepository, MockDiscountPoliciesRepository, PgDiscountPoliciesRepository,
};
pub use service::*;
