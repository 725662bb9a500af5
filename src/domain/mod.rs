//! Storefront Domain Concerns

pub mod discounts;
