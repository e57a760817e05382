//! FFI boundary crate for the Kopy UI shell.

pub mod api;
