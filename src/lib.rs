//! Checkout Discounts
//!
//! Discount policy evaluation for the storefront checkout: validates a stored
//! policy against an order total and a point in time, computes the amount off,
//! and previews every available policy for a basket.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod observability;

mod uuids;

#[cfg(test)]
mod test;

pub use uuids::TypedUuid;
