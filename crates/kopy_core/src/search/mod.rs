//! Full-text search over note content.
//!
//! # Responsibility
//! - Provide keyword search for the sidebar search surface.

pub mod fts;
