//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies of the monitor loop (the measurement source
//! and the chain) are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return scripted, deterministic values
//! - Record every interaction for assertions
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod source;
pub mod store;

pub use source::NullSource;
pub use store::NullIndicatorStore;
