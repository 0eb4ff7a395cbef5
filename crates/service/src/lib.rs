//! Service layer for company collections on top of `models`.
//! - Separates business logic from data access.
//! - Reuses entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod liked;
pub mod companies;
pub mod collections;
#[cfg(test)]
pub mod test_support;
