//! Service layer providing business operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod slug;
pub mod ordering;
pub mod search;
pub mod validation;
pub mod pagination;
pub mod catalog;
pub mod inquiries;
pub mod settings;
pub mod auth;
pub mod seed;
#[cfg(test)]
pub mod test_support;
