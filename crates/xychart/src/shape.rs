//! Rendering seam: how big an entry is drawn and who draws it.

use glam::DVec2;
use xychart_core::geometry::{Rect, Size};

use crate::data::Entry;
use crate::highlight::Highlight;
use crate::range::RangeSnapshot;
use crate::size;

/// Frame-wide inputs an [`EntryShape`] may size entries from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeContext {
    /// Size of the content rect.
    pub content: Size,
    /// Aggregate ranges of the last min/max pass.
    pub range: RangeSnapshot,
    /// Fraction of the content's shorter side a maximum-size entry spans.
    pub size_factor: f64,
}

/// Strategy that decides the on-screen extent (diameter, in pixels) of an entry.
pub trait EntryShape<E: Entry> {
    fn extent(&self, entry: &E, ctx: &ShapeContext) -> f64;
}

/// Fixed-size marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointShape {
    pub diameter: f64,
}

impl Default for PointShape {
    fn default() -> Self {
        Self { diameter: 6.0 }
    }
}

impl PointShape {
    pub fn new(diameter: f64) -> Self {
        Self { diameter }
    }
}

impl<E: Entry> EntryShape<E> for PointShape {
    fn extent(&self, _entry: &E, _ctx: &ShapeContext) -> f64 {
        self.diameter
    }
}

/// Bubbles sized by [`size::normalize`] against the aggregate size range.
///
/// Entries without a finite size are drawn at the reference size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BubbleShape;

impl<E: Entry> EntryShape<E> for BubbleShape {
    fn extent(&self, entry: &E, ctx: &ShapeContext) -> f64 {
        let reference = size::reference_size(ctx.content, ctx.size_factor);
        match entry.size().filter(|s| s.is_finite()) {
            Some(value) => size::normalize(value, ctx.range.size.min, ctx.range.size.max, reference),
            None => reference,
        }
    }
}

/// Receives draw calls from [`ChartCore::render`](crate::chart::ChartCore::render).
///
/// Centers are chart pixels; extents are diameters in pixels. Entries outside
/// the content rect are culled before they reach the renderer.
pub trait ChartRenderer<E: Entry> {
    fn begin_frame(&mut self, _content_rect: Rect) {}

    fn draw_entry(&mut self, dataset_index: usize, entry_index: usize, entry: &E, center: DVec2, extent: f64);

    fn draw_highlight(&mut self, _highlight: Highlight, _entry: &E, _center: DVec2, _extent: f64) {}

    fn end_frame(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BubbleEntry, XyEntry};
    use crate::range::AxisRange;

    fn context(min: f64, max: f64) -> ShapeContext {
        ShapeContext {
            content: Size::new(400.0, 200.0),
            range: RangeSnapshot {
                size: AxisRange::new(min, max),
                sized_count: 2,
                count: 2,
                ..RangeSnapshot::EMPTY
            },
            size_factor: 0.5,
        }
    }

    #[test]
    fn test_point_shape_is_constant() {
        let shape = PointShape::new(4.0);
        assert_eq!(shape.extent(&XyEntry::new(1.0, 2.0), &context(0.0, 1.0)), 4.0);
    }

    #[test]
    fn test_bubble_shape_scales_with_size() {
        let ctx = context(2.0, 12.0);
        let small = BubbleShape.extent(&BubbleEntry::new(0.0, 0.0, 2.0), &ctx);
        let large = BubbleShape.extent(&BubbleEntry::new(0.0, 0.0, 12.0), &ctx);
        // reference = min(400, 200) * 0.5
        assert!((large - 100.0).abs() < 1e-9);
        assert!((small - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_bubble_shape_without_size_uses_reference() {
        let ctx = context(2.0, 12.0);
        assert!((BubbleShape.extent(&XyEntry::new(0.0, 0.0), &ctx) - 100.0).abs() < 1e-9);
    }
}
