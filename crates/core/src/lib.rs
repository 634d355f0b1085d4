//! # heatsheet-core
//!
//! Shared error types for the heatsheet crates.
//!
//! Every fallible operation across the workspace returns [`HeatResult`];
//! frontends classify failures through [`HeatError::kind`] to decide how to
//! surface them (validation message, recoverable no-op, or I/O failure).

/// Error types and result aliases.
pub mod error;

/// Re-export core error types.
pub use error::{ErrorKind, HeatError, HeatResult};
