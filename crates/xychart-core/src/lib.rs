//! xychart core
//!
//! Ambient utilities shared by the xychart crates: logging bootstrap,
//! profiling hooks, math re-exports and pixel-space geometry.

pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
