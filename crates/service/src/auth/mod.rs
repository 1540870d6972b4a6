//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Admin login with argon2 password hashes and HS256 session tokens.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{AuthConfig, AuthService};
