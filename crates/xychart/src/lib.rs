//! xychart - Interactive 2D chart viewport engine
//!
//! This crate provides:
//! - A pan/zoom viewport with scale limits and drag overscroll
//! - Value-to-pixel coordinate transforms under the live pan/zoom matrix
//! - Instant, animated and inertial viewport jobs driven by an explicit tick
//! - Windowed min/max aggregation for axis auto-scaling and bubble sizing
//! - Nearest-entry lookup for touch highlighting
//!
//! # Example
//!
//! ```ignore
//! use xychart::*;
//!
//! let data = ChartData::from_datasets(vec![Dataset::with_entries(
//!     "prices",
//!     vec![XyEntry::new(0.0, 1.0), XyEntry::new(1.0, 3.0)],
//! )]);
//! let mut chart = ChartCore::new(ChartConfig::default(), PointShape::default()).with_data(data);
//! chart.set_chart_size(Size::new(800.0, 600.0));
//!
//! // Every frame
//! if chart.tick(1.0 / 60.0) {
//!     chart.render(&mut renderer);
//! }
//! ```

// Transform primitives
mod affine;
mod transformer;
mod viewport;

// Jobs
mod easing;
mod job;
mod scheduler;

// Data and statistics
mod data;
mod highlight;
mod range;
pub mod size;

// Chart composition
mod axis;
mod chart;
mod command;
mod config;
mod error;
mod gesture;
mod shape;

pub use affine::*;
pub use transformer::*;
pub use viewport::*;

pub use easing::*;
pub use job::*;
pub use scheduler::*;

pub use data::*;
pub use highlight::*;
pub use range::*;

pub use axis::*;
pub use chart::*;
pub use command::*;
pub use config::*;
pub use error::*;
pub use gesture::*;
pub use shape::*;

pub use xychart_core::geometry::{Offsets, Rect, Size};
pub use xychart_core::math::DVec2;
