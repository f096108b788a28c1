//! Pulp
//!
//! Pulp is the storefront session engine for a small juice bar: a product catalog, a cart with
//! clamped quantities and exact minor-unit totals, debounced catalog search, transient
//! notifications and newsletter sign-up validation.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod newsletter;
pub mod notices;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod search;
pub mod session;
pub mod tags;
pub mod utils;
