//! Tracing/logging setup shared by binaries and tests embedding the replayer.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::{init, init_for_tests};
