//! Shared components for the satellite brightness tools.
//!
//! Typed physical units and command-line sweep arguments used by both the
//! brightness library and its binaries.

pub mod sweep;
pub mod units;

pub use sweep::{SweepArg, SweepError};
