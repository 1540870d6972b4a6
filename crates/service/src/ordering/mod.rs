//! Ordering module: adjacent-swap reordering of categories and services.
//!
//! Same three-layer split as `auth`: domain types, a repository trait with a
//! SeaORM implementation and an in-memory mock, and a service holding the
//! business rules.

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{Direction, EntityKind, OrderedItem, SiblingScope};
pub use errors::OrderingError;
pub use repo::seaorm::SeaOrmOrderingRepository;
pub use repository::OrderingRepository;
pub use service::OrderingService;
