//! Weighted fuzzy search over the public service list.
//!
//! - `fuzzy`: approximate substring distance and per-field scores.
//! - `index`: in-memory index over [`SearchableService`] records.
//! - `session`: debounced query loop driven by keystrokes.

pub mod fuzzy;
pub mod index;
pub mod session;

pub use index::{SearchHit, SearchIndex, SearchOptions, SearchableService};
pub use session::{SearchSession, SessionConfig, SessionState};
