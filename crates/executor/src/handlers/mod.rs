//! Command handlers.
//!
//! One function per command. Each takes the shared store handle, calls the
//! matching store operation, and wraps the result in an [`Output`](crate::Output).

pub mod admin;
pub mod records;
