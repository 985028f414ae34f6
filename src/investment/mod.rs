//! Real-estate investment tools.
//!
//! All three tools share [`models::InvestmentOptions`] as their input and the
//! filtering pass in [`filter`]; they differ only in how the retained
//! properties are presented.

pub mod cost_comparison;
pub mod details;
pub mod filter;
pub mod format;
pub mod models;
pub mod tools;

pub use tools::default_tools;
