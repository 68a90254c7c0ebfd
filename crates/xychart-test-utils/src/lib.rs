//! Test utilities for xychart.
//!
//! This crate provides testing infrastructure for the chart engine:
//!
//! - [`RecordingRenderer`] - A [`ChartRenderer`](xychart::ChartRenderer) that records draw calls
//! - [`FrameClock`] - Fixed-step driver for [`ChartCore::tick`](xychart::ChartCore::tick)
//! - [`fixtures`] - Small deterministic datasets
//!
//! # Example
//!
//! ```rust
//! use xychart::{ChartConfig, ChartCore, PointShape, Size};
//! use xychart_test_utils::{FrameClock, RecordingRenderer, fixtures};
//!
//! let mut chart = ChartCore::new(ChartConfig::default(), PointShape::default())
//!     .with_data(fixtures::two_datasets());
//! chart.set_chart_size(Size::new(320.0, 240.0));
//!
//! let mut clock = FrameClock::sixty_fps();
//! clock.tick(&mut chart);
//!
//! let mut renderer = RecordingRenderer::new();
//! chart.render(&mut renderer);
//! assert_eq!(renderer.entry_count(), 3);
//! ```

mod clock;
pub mod fixtures;
mod recording;

pub use clock::*;
pub use recording::*;
