//! The tally monitor loop.
//!
//! Derives the storage key for an identifier once, then cycles forever:
//! fetch the current measurement, read the last recorded on-chain value,
//! compare, and submit an update only when they differ. All runtime errors
//! are absorbed at the cycle boundary; only external cancellation stops
//! the loop.

pub mod monitor;
pub mod shutdown;

pub use monitor::{CycleOutcome, Monitor};
pub use shutdown::{ShutdownController, ShutdownSignal};
