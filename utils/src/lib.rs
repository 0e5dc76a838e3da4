//! Shared utilities for the tally oracle.

pub mod logging;

pub use logging::init_tracing;
