//! Content geometry and the pan/zoom ("touch") matrix.
//!
//! The touch matrix is applied last, in chart pixel space. Every operation
//! that changes it returns a candidate matrix first; only [`Viewport::commit`]
//! stores one, after clamping scale and translation.

use glam::DVec2;
use xychart_core::geometry::{Offsets, Rect, Size};

use crate::affine::AffineTransform2D;

bitflags::bitflags! {
    /// Changes recorded by the viewport since the owner last drained them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewportChanges: u8 {
        /// The touch matrix was replaced.
        const MATRIX = 0b0000_0001;
        /// Chart size or content offsets changed.
        const LAYOUT = 0b0000_0010;
        /// A commit asked for the chart to be redrawn.
        const REDRAW = 0b0000_0100;
    }
}

impl ViewportChanges {
    /// Check if the value/offset matrices must be rebuilt.
    pub fn needs_transformer_rebuild(&self) -> bool {
        self.contains(Self::LAYOUT)
    }

    /// Check if anything visible changed.
    pub fn needs_redraw(&self) -> bool {
        !self.is_empty()
    }
}

/// Owns the content rectangle, the touch matrix, scale limits and drag allowances.
#[derive(Debug, Clone)]
pub struct Viewport {
    touch: AffineTransform2D,
    chart_size: Size,
    offsets: Offsets,
    content_rect: Rect,
    min_scale_x: f64,
    max_scale_x: f64,
    min_scale_y: f64,
    max_scale_y: f64,
    drag_offset_x: f64,
    drag_offset_y: f64,
    changes: ViewportChanges,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            touch: AffineTransform2D::IDENTITY,
            chart_size: Size::ZERO,
            offsets: Offsets::ZERO,
            content_rect: Rect::ZERO,
            min_scale_x: 1.0,
            max_scale_x: f64::MAX,
            min_scale_y: 1.0,
            max_scale_y: f64::MAX,
            drag_offset_x: 0.0,
            drag_offset_y: 0.0,
            changes: ViewportChanges::empty(),
        }
    }

    // --- Layout ---

    /// Set the total chart size. The content rect keeps the current offsets.
    pub fn set_chart_size(&mut self, size: Size) {
        if size == self.chart_size {
            return;
        }
        self.chart_size = size;
        self.update_content_rect();
        tracing::debug!(width = size.width, height = size.height, "Viewport resized");
    }

    /// Inset the content rect from the chart bounds by `offsets`.
    pub fn restrain(&mut self, offsets: Offsets) {
        if offsets == self.offsets {
            return;
        }
        self.offsets = offsets;
        self.update_content_rect();
    }

    fn update_content_rect(&mut self) {
        self.content_rect = Rect::from_size(self.chart_size).inset(&self.offsets);
        self.changes |= ViewportChanges::LAYOUT;
    }

    pub fn chart_size(&self) -> Size {
        self.chart_size
    }

    pub fn offsets(&self) -> Offsets {
        self.offsets
    }

    pub fn content_rect(&self) -> Rect {
        self.content_rect
    }

    pub fn content_center(&self) -> DVec2 {
        self.content_rect.center()
    }

    /// True once the content rect has a non-zero area.
    pub fn has_content(&self) -> bool {
        !self.content_rect.is_empty()
    }

    // --- Touch matrix ---

    pub fn touch_matrix(&self) -> AffineTransform2D {
        self.touch
    }

    pub fn scale_x(&self) -> f64 {
        self.touch.scale_x()
    }

    pub fn scale_y(&self) -> f64 {
        self.touch.scale_y()
    }

    pub fn trans_x(&self) -> f64 {
        self.touch.tx()
    }

    pub fn trans_y(&self) -> f64 {
        self.touch.ty()
    }

    /// Candidate matrix scaled by `(scale_x, scale_y)` about a pixel pivot.
    ///
    /// Each factor is reduced so the resulting scale stays within the
    /// configured limits.
    pub fn zoom(&self, scale_x: f64, scale_y: f64, pivot_x: f64, pivot_y: f64) -> AffineTransform2D {
        let fx = limited_factor(self.scale_x(), scale_x, self.min_scale_x, self.max_scale_x);
        let fy = limited_factor(self.scale_y(), scale_y, self.min_scale_y, self.max_scale_y);
        self.touch
            .then_scale_about(fx, fy, DVec2::new(pivot_x, pivot_y))
    }

    /// Candidate for one zoom-in step about `pivot`.
    pub fn zoom_in(&self, step: f64, pivot: DVec2) -> AffineTransform2D {
        self.zoom(step, step, pivot.x, pivot.y)
    }

    /// Candidate for one zoom-out step about `pivot`; the exact inverse of [`Viewport::zoom_in`].
    pub fn zoom_out(&self, step: f64, pivot: DVec2) -> AffineTransform2D {
        self.zoom(1.0 / step, 1.0 / step, pivot.x, pivot.y)
    }

    /// Candidate with an absolute scale, translation unchanged.
    pub fn set_zoom(&self, scale_x: f64, scale_y: f64) -> AffineTransform2D {
        self.touch.with_scale(
            clamp_scale(scale_x, self.min_scale_x, self.max_scale_x),
            clamp_scale(scale_y, self.min_scale_y, self.max_scale_y),
        )
    }

    /// Candidate after a pixel translation.
    pub fn translate(&self, dx: f64, dy: f64) -> AffineTransform2D {
        self.touch.then_translate(dx, dy)
    }

    /// Candidate that moves the pixel `point` to the content center.
    pub fn center_on(&self, point: DVec2) -> AffineTransform2D {
        let center = self.content_center();
        self.translate(center.x - point.x, center.y - point.y)
    }

    /// Reset all zooming and dragging. Also lowers both minimum scales back to 1.
    pub fn fit_screen(&mut self) -> AffineTransform2D {
        self.min_scale_x = 1.0;
        self.min_scale_y = 1.0;
        AffineTransform2D::IDENTITY
    }

    /// Clamp `matrix` into the scale and translation limits and store it.
    ///
    /// Returns the stored matrix; a `tx`/`ty` differing from the candidate
    /// means the request hit a pan boundary.
    pub fn commit(&mut self, matrix: AffineTransform2D, invalidate: bool) -> AffineTransform2D {
        if !matrix.is_finite() {
            tracing::warn!(?matrix, "Rejected non-finite touch matrix");
            return self.touch;
        }

        let clamped = self.limit(matrix);
        if clamped != self.touch {
            self.touch = clamped;
            self.changes |= ViewportChanges::MATRIX;
        }
        if invalidate {
            self.changes |= ViewportChanges::REDRAW;
        }
        tracing::trace!(
            sx = clamped.scale_x(),
            sy = clamped.scale_y(),
            tx = clamped.tx(),
            ty = clamped.ty(),
            "Viewport commit"
        );
        clamped
    }

    fn limit(&self, matrix: AffineTransform2D) -> AffineTransform2D {
        let sx = clamp_scale(matrix.scale_x(), self.min_scale_x, self.max_scale_x);
        let sy = clamp_scale(matrix.scale_y(), self.min_scale_y, self.max_scale_y);

        let rect = self.content_rect;
        let min_tx = rect.right() - sx * rect.right() - self.drag_offset_x;
        let max_tx = rect.left() - sx * rect.left() + self.drag_offset_x;
        let min_ty = rect.bottom() - sy * rect.bottom() - self.drag_offset_y;
        let max_ty = rect.top() - sy * rect.top() + self.drag_offset_y;

        let tx = matrix.tx().max(min_tx).min(max_tx);
        let ty = matrix.ty().max(min_ty).min(max_ty);

        matrix.with_scale(sx, sy).with_translation(tx, ty)
    }

    /// Drain the change flags accumulated since the last call.
    pub fn take_changes(&mut self) -> ViewportChanges {
        std::mem::take(&mut self.changes)
    }

    pub fn changes(&self) -> ViewportChanges {
        self.changes
    }

    // --- Limits ---

    pub fn min_scale_x(&self) -> f64 {
        self.min_scale_x
    }

    pub fn max_scale_x(&self) -> f64 {
        self.max_scale_x
    }

    pub fn min_scale_y(&self) -> f64 {
        self.min_scale_y
    }

    pub fn max_scale_y(&self) -> f64 {
        self.max_scale_y
    }

    /// Minimum x scale; values below 1 are raised to 1.
    pub fn set_minimum_scale_x(&mut self, scale: f64) {
        self.min_scale_x = sanitize_min(scale);
        self.reclamp();
    }

    /// Minimum y scale; values below 1 are raised to 1.
    pub fn set_minimum_scale_y(&mut self, scale: f64) {
        self.min_scale_y = sanitize_min(scale);
        self.reclamp();
    }

    /// Maximum x scale; 0 removes the limit.
    pub fn set_maximum_scale_x(&mut self, scale: f64) {
        self.max_scale_x = sanitize_max(scale);
        self.reclamp();
    }

    /// Maximum y scale; 0 removes the limit.
    pub fn set_maximum_scale_y(&mut self, scale: f64) {
        self.max_scale_y = sanitize_max(scale);
        self.reclamp();
    }

    pub fn set_min_max_scale_x(&mut self, min: f64, max: f64) {
        self.min_scale_x = sanitize_min(min);
        self.max_scale_x = sanitize_max(max);
        self.reclamp();
    }

    pub fn set_min_max_scale_y(&mut self, min: f64, max: f64) {
        self.min_scale_y = sanitize_min(min);
        self.max_scale_y = sanitize_max(max);
        self.reclamp();
    }

    fn reclamp(&mut self) {
        let touch = self.touch;
        self.commit(touch, false);
    }

    // --- Drag overscroll ---

    pub fn set_drag_offset_x(&mut self, offset: f64) {
        self.drag_offset_x = offset.max(0.0);
    }

    pub fn set_drag_offset_y(&mut self, offset: f64) {
        self.drag_offset_y = offset.max(0.0);
    }

    pub fn drag_offset_x(&self) -> f64 {
        self.drag_offset_x
    }

    pub fn drag_offset_y(&self) -> f64 {
        self.drag_offset_y
    }

    pub fn has_no_drag_offset(&self) -> bool {
        self.drag_offset_x <= 0.0 && self.drag_offset_y <= 0.0
    }

    // --- Zoom predicates ---

    pub fn can_zoom_in_more_x(&self) -> bool {
        self.scale_x() < self.max_scale_x
    }

    pub fn can_zoom_in_more_y(&self) -> bool {
        self.scale_y() < self.max_scale_y
    }

    pub fn can_zoom_out_more_x(&self) -> bool {
        self.scale_x() > self.min_scale_x
    }

    pub fn can_zoom_out_more_y(&self) -> bool {
        self.scale_y() > self.min_scale_y
    }

    pub fn is_fully_zoomed_out_x(&self) -> bool {
        !(self.scale_x() > self.min_scale_x || self.min_scale_x > 1.0)
    }

    pub fn is_fully_zoomed_out_y(&self) -> bool {
        !(self.scale_y() > self.min_scale_y || self.min_scale_y > 1.0)
    }

    pub fn is_fully_zoomed_out(&self) -> bool {
        self.is_fully_zoomed_out_x() && self.is_fully_zoomed_out_y()
    }

    // --- Bounds tests for culling ---

    pub fn is_in_bounds_left(&self, x: f64) -> bool {
        self.content_rect.left() <= x + 1.0
    }

    pub fn is_in_bounds_right(&self, x: f64) -> bool {
        let x = (x * 100.0).floor() / 100.0;
        self.content_rect.right() >= x - 1.0
    }

    pub fn is_in_bounds_top(&self, y: f64) -> bool {
        self.content_rect.top() <= y
    }

    pub fn is_in_bounds_bottom(&self, y: f64) -> bool {
        let y = (y * 100.0).floor() / 100.0;
        self.content_rect.bottom() >= y
    }

    pub fn is_in_bounds_x(&self, x: f64) -> bool {
        self.is_in_bounds_left(x) && self.is_in_bounds_right(x)
    }

    pub fn is_in_bounds_y(&self, y: f64) -> bool {
        self.is_in_bounds_top(y) && self.is_in_bounds_bottom(y)
    }

    pub fn is_in_bounds(&self, point: DVec2) -> bool {
        self.is_in_bounds_x(point.x) && self.is_in_bounds_y(point.y)
    }
}

fn clamp_scale(scale: f64, min: f64, max: f64) -> f64 {
    scale.max(min).min(max)
}

/// Factor that takes `current` as close to `current * requested` as the limits allow.
fn limited_factor(current: f64, requested: f64, min: f64, max: f64) -> f64 {
    if !(current > 0.0) || !requested.is_finite() {
        return 1.0;
    }
    clamp_scale(current * requested, min, max) / current
}

fn sanitize_min(scale: f64) -> f64 {
    if scale.is_finite() { scale.max(1.0) } else { 1.0 }
}

fn sanitize_max(scale: f64) -> f64 {
    if scale == 0.0 || !scale.is_finite() || scale < 0.0 {
        f64::MAX
    } else {
        scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn viewport() -> Viewport {
        let mut vp = Viewport::new();
        vp.set_chart_size(Size::new(200.0, 100.0));
        vp.restrain(Offsets::new(10.0, 10.0, 10.0, 10.0));
        vp.take_changes();
        vp
    }

    #[test]
    fn test_content_rect_from_offsets() {
        let vp = viewport();
        assert_eq!(vp.content_rect(), Rect::new(10.0, 10.0, 180.0, 80.0));
        assert!(vp.has_content());
        assert!(!Viewport::new().has_content());
    }

    #[test]
    fn test_layout_change_flag() {
        let mut vp = Viewport::new();
        vp.set_chart_size(Size::new(10.0, 10.0));
        assert!(vp.take_changes().needs_transformer_rebuild());
        vp.set_chart_size(Size::new(10.0, 10.0));
        assert!(vp.take_changes().is_empty());
    }

    #[test]
    fn test_zoom_does_not_mutate() {
        let vp = viewport();
        let candidate = vp.zoom(2.0, 2.0, 100.0, 50.0);
        assert_eq!(candidate.scale_x(), 2.0);
        assert_eq!(vp.touch_matrix(), AffineTransform2D::IDENTITY);
    }

    #[test]
    fn test_zoom_respects_limits() {
        let mut vp = viewport();
        vp.set_maximum_scale_x(3.0);
        let m = vp.zoom(10.0, 10.0, 0.0, 0.0);
        assert!((m.scale_x() - 3.0).abs() < EPS);
        assert!((m.scale_y() - 10.0).abs() < EPS);

        // Never below the minimum of 1.
        let m = vp.zoom(0.1, 0.1, 0.0, 0.0);
        assert!((m.scale_x() - 1.0).abs() < EPS);
        assert!((m.scale_y() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_commit_clamps_translation_to_drag_offset() {
        let mut vp = viewport();
        vp.set_drag_offset_x(15.0);
        let zoomed = vp.zoom(2.0, 2.0, 100.0, 50.0);
        vp.commit(zoomed, true);

        let rect = vp.content_rect();
        for delta in [-1000.0, -50.0, 0.0, 37.0, 1000.0] {
            let candidate = vp.translate(delta, delta);
            let committed = vp.commit(candidate, false);
            let left = committed.transform_point(DVec2::new(rect.left(), rect.top()));
            let right = committed.transform_point(DVec2::new(rect.right(), rect.bottom()));
            assert!(left.x <= rect.left() + 15.0 + EPS);
            assert!(right.x >= rect.right() - 15.0 - EPS);
            assert!(left.y <= rect.top() + EPS);
            assert!(right.y >= rect.bottom() - EPS);
        }
    }

    #[test]
    fn test_commit_reports_edge_hit() {
        let mut vp = viewport();
        // Not zoomed: no room to pan at all.
        let candidate = vp.translate(25.0, 0.0);
        let committed = vp.commit(candidate, false);
        assert_ne!(candidate.tx(), committed.tx());
        assert_eq!(committed.tx(), 0.0);
    }

    #[test]
    fn test_commit_rejects_non_finite() {
        let mut vp = viewport();
        let stored = vp.commit(AffineTransform2D::scale(f64::NAN, 1.0), true);
        assert_eq!(stored, AffineTransform2D::IDENTITY);
    }

    #[test]
    fn test_zoom_in_then_out_restores_scale() {
        let mut vp = viewport();
        let center = vp.content_center();
        let m = vp.zoom_in(1.4, center);
        vp.commit(m, true);
        assert!((vp.scale_x() - 1.4).abs() < EPS);
        let m = vp.zoom_out(1.4, center);
        vp.commit(m, true);
        assert!((vp.scale_x() - 1.0).abs() < EPS);
        assert!((vp.scale_y() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_zoom_predicates() {
        let mut vp = viewport();
        assert!(vp.is_fully_zoomed_out());
        assert!(!vp.can_zoom_out_more_x());
        assert!(vp.can_zoom_in_more_x());

        let m = vp.zoom(2.0, 1.0, 0.0, 0.0);
        vp.commit(m, false);
        assert!(!vp.is_fully_zoomed_out());
        assert!(vp.can_zoom_out_more_x());
        assert!(!vp.can_zoom_out_more_y());

        vp.set_maximum_scale_x(2.0);
        assert!(!vp.can_zoom_in_more_x());
    }

    #[test]
    fn test_minimum_scale_reclamps() {
        let mut vp = viewport();
        vp.set_minimum_scale_x(4.0);
        assert_eq!(vp.scale_x(), 4.0);
        assert!(!vp.is_fully_zoomed_out_x());

        vp.set_minimum_scale_y(0.2);
        assert_eq!(vp.min_scale_y(), 1.0);

        let identity = vp.fit_screen();
        vp.commit(identity, true);
        assert_eq!(vp.scale_x(), 1.0);
        assert!(vp.is_fully_zoomed_out());
    }

    #[test]
    fn test_zero_maximum_means_unbounded() {
        let mut vp = viewport();
        vp.set_maximum_scale_x(0.0);
        assert_eq!(vp.max_scale_x(), f64::MAX);
    }

    #[test]
    fn test_center_on_moves_point_to_center() {
        let mut vp = viewport();
        let m = vp.zoom(4.0, 4.0, 0.0, 0.0);
        vp.commit(m, false);

        let before = vp.touch_matrix();
        let target = DVec2::new(150.0, 60.0);
        let stored = vp.commit(vp.center_on(target), false);

        let content_point = before.inverse().unwrap().transform_point(target);
        let moved = stored.transform_point(content_point);
        assert!((moved - vp.content_center()).length() < EPS);
    }

    #[test]
    fn test_bounds_predicates() {
        let vp = viewport();
        assert!(vp.is_in_bounds_x(10.0));
        assert!(vp.is_in_bounds_x(9.5));
        assert!(!vp.is_in_bounds_x(5.0));
        assert!(vp.is_in_bounds_y(90.0));
        assert!(!vp.is_in_bounds_y(95.0));
    }
}
