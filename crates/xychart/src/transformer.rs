//! Value space to pixel space mapping.
//!
//! The effective transform applies, in order: the value-to-pixel scale/flip,
//! the content offset placement, then the viewport's live touch matrix.

use glam::DVec2;
use xychart_core::geometry::Size;

use crate::affine::AffineTransform2D;
use crate::viewport::Viewport;

/// Composes the value, offset and touch matrices.
///
/// The first two are rebuilt by the owner on layout or range changes; the
/// touch matrix is read from the [`Viewport`] on every call.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTransformer {
    value_to_px: AffineTransform2D,
    offset: AffineTransform2D,
}

impl CoordinateTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the value-to-pixel matrix from the axis ranges and content size.
    ///
    /// A zero delta produces a zero scale on that axis instead of an infinity.
    pub fn prepare_value_px(&mut self, x_min: f64, delta_x: f64, delta_y: f64, y_min: f64, content: Size) {
        let scale_x = finite_or_zero(content.width / delta_x);
        let scale_y = finite_or_zero(content.height / delta_y);

        self.value_to_px = AffineTransform2D::translation(-x_min, -y_min).then_scale(scale_x, -scale_y);
        tracing::trace!(scale_x, scale_y, x_min, y_min, "Prepared value matrix");
    }

    /// Rebuild the offset matrix that places content inside the chart bounds.
    pub fn prepare_offset(&mut self, inverted: bool, viewport: &Viewport) {
        let offsets = viewport.offsets();
        self.offset = if inverted {
            AffineTransform2D::translation(offsets.left, -offsets.top).then_scale(1.0, -1.0)
        } else {
            AffineTransform2D::translation(offsets.left, viewport.chart_size().height - offsets.bottom)
        };
    }

    pub fn value_to_px(&self) -> AffineTransform2D {
        self.value_to_px
    }

    pub fn offset(&self) -> AffineTransform2D {
        self.offset
    }

    /// The full value-to-pixel transform under the current touch matrix.
    pub fn value_to_pixel_matrix(&self, viewport: &Viewport) -> AffineTransform2D {
        self.value_to_px
            .then(&self.offset)
            .then(&viewport.touch_matrix())
    }

    /// The inverse of [`CoordinateTransformer::value_to_pixel_matrix`].
    ///
    /// Degrades to the identity when the forward transform is singular, e.g.
    /// before the first layout pass.
    pub fn pixel_to_value_matrix(&self, viewport: &Viewport) -> AffineTransform2D {
        let forward = self.value_to_pixel_matrix(viewport);
        match forward.inverse() {
            Some(inverse) => inverse,
            None => {
                tracing::debug!(?forward, "Singular value transform, using identity");
                AffineTransform2D::IDENTITY
            }
        }
    }

    pub fn point_to_pixel(&self, point: DVec2, viewport: &Viewport) -> DVec2 {
        self.value_to_pixel_matrix(viewport).transform_point(point)
    }

    pub fn pixel_to_point(&self, pixel: DVec2, viewport: &Viewport) -> DVec2 {
        self.pixel_to_value_matrix(viewport).transform_point(pixel)
    }

    /// Transform a batch of value points in place.
    pub fn points_to_pixels(&self, points: &mut [DVec2], viewport: &Viewport) {
        let matrix = self.value_to_pixel_matrix(viewport);
        for point in points.iter_mut() {
            *point = matrix.transform_point(*point);
        }
    }

    /// Transform a batch of pixels back into value space in place.
    pub fn pixels_to_points(&self, pixels: &mut [DVec2], viewport: &Viewport) {
        let matrix = self.pixel_to_value_matrix(viewport);
        for pixel in pixels.iter_mut() {
            *pixel = matrix.transform_point(*pixel);
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xychart_core::geometry::Offsets;

    const EPS: f64 = 1e-9;

    fn setup(inverted: bool) -> (CoordinateTransformer, Viewport) {
        let mut viewport = Viewport::new();
        viewport.set_chart_size(Size::new(220.0, 120.0));
        viewport.restrain(Offsets::new(10.0, 5.0, 10.0, 15.0));

        let mut transformer = CoordinateTransformer::new();
        let content = viewport.content_rect().size();
        transformer.prepare_value_px(0.0, 100.0, 50.0, 0.0, content);
        transformer.prepare_offset(inverted, &viewport);
        (transformer, viewport)
    }

    fn assert_close(a: DVec2, b: DVec2) {
        assert!((a - b).length() < EPS, "{a:?} != {b:?}");
    }

    #[test]
    fn test_value_corners_map_to_content_corners() {
        let (t, vp) = setup(false);
        let rect = vp.content_rect();
        // Data y grows upward, pixel y grows downward.
        assert_close(t.point_to_pixel(DVec2::new(0.0, 0.0), &vp), DVec2::new(rect.left(), rect.bottom()));
        assert_close(t.point_to_pixel(DVec2::new(100.0, 50.0), &vp), DVec2::new(rect.right(), rect.top()));
    }

    #[test]
    fn test_inverted_axis_flips_vertically() {
        let (t, vp) = setup(true);
        let rect = vp.content_rect();
        assert_close(t.point_to_pixel(DVec2::new(0.0, 0.0), &vp), DVec2::new(rect.left(), rect.top()));
        assert_close(t.point_to_pixel(DVec2::new(100.0, 50.0), &vp), DVec2::new(rect.right(), rect.bottom()));
    }

    #[test]
    fn test_round_trip_within_content() {
        let (t, mut vp) = setup(false);
        let zoomed = vp.zoom(2.5, 1.5, 80.0, 40.0);
        vp.commit(zoomed, false);

        let rect = vp.content_rect();
        for i in 0..=10 {
            for j in 0..=10 {
                let p = DVec2::new(
                    rect.left() + rect.width * i as f64 / 10.0,
                    rect.top() + rect.height * j as f64 / 10.0,
                );
                let back = t.point_to_pixel(t.pixel_to_point(p, &vp), &vp);
                assert!((back - p).length() < 1e-6);
            }
        }
    }

    #[test]
    fn test_touch_matrix_applied_last() {
        let (t, mut vp) = setup(false);
        let before = t.point_to_pixel(DVec2::new(50.0, 25.0), &vp);
        let zoomed = vp.zoom(2.0, 2.0, 0.0, 0.0);
        let touch = vp.commit(zoomed, false);
        let after = t.point_to_pixel(DVec2::new(50.0, 25.0), &vp);
        // Pan/zoom moves already-placed pixels, no rebuild required.
        assert_close(after, touch.transform_point(before));
    }

    #[test]
    fn test_zero_delta_is_degenerate_not_infinite() {
        let mut t = CoordinateTransformer::new();
        t.prepare_value_px(5.0, 0.0, 0.0, 5.0, Size::new(100.0, 100.0));
        assert!(t.value_to_px().is_finite());
        assert_eq!(t.value_to_px().scale_x(), 0.0);

        // Singular forward matrix: the inverse falls back to identity.
        let vp = Viewport::new();
        assert_eq!(t.pixel_to_point(DVec2::new(3.0, 4.0), &vp), DVec2::new(3.0, 4.0));
    }

    #[test]
    fn test_batch_matches_single() {
        let (t, vp) = setup(false);
        let mut points = [DVec2::new(1.0, 2.0), DVec2::new(30.0, 40.0)];
        let expected: Vec<DVec2> = points.iter().map(|p| t.point_to_pixel(*p, &vp)).collect();
        t.points_to_pixels(&mut points, &vp);
        assert_eq!(points.to_vec(), expected);
        t.pixels_to_points(&mut points, &vp);
        assert_close(points[1], DVec2::new(30.0, 40.0));
    }
}
