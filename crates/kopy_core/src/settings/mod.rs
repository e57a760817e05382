//! Persisted application settings.
//!
//! # Responsibility
//! - Store and load the typed settings document.

pub mod store;
