//! # vtlist core
//!
//! Business logic for the vtlist catalogue: listeners browse VTubers, their
//! movies and the karaoke performances inside them, favorite movies or single
//! songs, and follow VTubers or other listeners.
//!
//! ## Architecture
//!
//! - [`database::ports`]: repository traits, one per bounded concern
//! - [`database::infrastructure::postgres`]: SQLx/PostgreSQL adapters
//! - [`application`]: interactors orchestrating repositories per use case
//! - [`domain`]: pure rules (ownership check, favorite merge, partial results,
//!   credential hashing)
//!
//! Records themselves live in `vtlist-model` and are re-exported as [`model`].

pub use vtlist_model as model;

/// Common API routes shared by the server and its tests
pub mod api_routes;

/// Use-case interactors and repository composition
pub mod application;

/// Repository ports and their PostgreSQL implementations
pub mod database;

/// Pure domain rules
pub mod domain;

/// Error types and error handling utilities
pub mod error;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
