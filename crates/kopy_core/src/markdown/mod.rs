//! Markdown rendering and export projections.
//!
//! # Responsibility
//! - Convert raw note markdown into HTML for preview surfaces.
//! - Build standalone export artifacts (document shell, file names).
//!
//! # Invariants
//! - Rendering is a total, stateless function over arbitrary strings.
//! - Rendered HTML is not sanitized; callers own embedding policy.

pub mod export;
pub mod renderer;
