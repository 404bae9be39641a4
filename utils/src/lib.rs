//! Shared utilities for SLUICE.

pub mod logging;

pub use logging::init_tracing;
