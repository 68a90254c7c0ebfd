//! Chart interaction and layout settings.

use xychart_core::geometry::Offsets;

use crate::easing::EasingFunction;
use crate::scheduler::SchedulePolicy;

/// Interaction and layout settings for a [`ChartCore`](crate::chart::ChartCore).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Allow panning with a drag gesture.
    pub drag_enabled: bool,
    pub scale_x_enabled: bool,
    pub scale_y_enabled: bool,
    /// Zoom both axes together on pinch instead of picking one from the touch spread.
    pub pinch_zoom_enabled: bool,
    pub double_tap_to_zoom_enabled: bool,
    pub highlight_per_tap_enabled: bool,
    /// Highlight under the finger while dragging a chart that cannot pan.
    pub highlight_per_drag_enabled: bool,
    /// Keep panning after a drag is released.
    pub drag_deceleration_enabled: bool,
    /// Velocity kept per 1/60 s of inertial panning, clamped to `[0, 0.999]`.
    pub drag_deceleration_friction: f64,
    /// Rescale the y axis to the entries visible after every pan or zoom.
    pub auto_scale_min_max: bool,
    /// Lower bound for every content offset, in pixels.
    pub min_offset: f64,
    /// Added to the computed content offsets.
    pub extra_offsets: Offsets,
    /// Factor of a single zoom-in step.
    pub zoom_step: f64,
    /// Fraction of the content's shorter side a maximum-size bubble spans.
    pub bubble_size_factor: f64,
    pub default_easing: EasingFunction,
    pub schedule_policy: SchedulePolicy,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            drag_enabled: true,
            scale_x_enabled: true,
            scale_y_enabled: true,
            pinch_zoom_enabled: false,
            double_tap_to_zoom_enabled: true,
            highlight_per_tap_enabled: true,
            highlight_per_drag_enabled: true,
            drag_deceleration_enabled: true,
            drag_deceleration_friction: 0.9,
            auto_scale_min_max: false,
            min_offset: 10.0,
            extra_offsets: Offsets::ZERO,
            zoom_step: 1.4,
            bubble_size_factor: 0.2,
            default_easing: EasingFunction::default(),
            schedule_policy: SchedulePolicy::default(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drag(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }

    /// Enable or disable zooming per axis.
    pub fn with_scale(mut self, x: bool, y: bool) -> Self {
        self.scale_x_enabled = x;
        self.scale_y_enabled = y;
        self
    }

    pub fn with_pinch_zoom(mut self, enabled: bool) -> Self {
        self.pinch_zoom_enabled = enabled;
        self
    }

    pub fn with_double_tap_to_zoom(mut self, enabled: bool) -> Self {
        self.double_tap_to_zoom_enabled = enabled;
        self
    }

    pub fn with_highlight_per_tap(mut self, enabled: bool) -> Self {
        self.highlight_per_tap_enabled = enabled;
        self
    }

    pub fn with_highlight_per_drag(mut self, enabled: bool) -> Self {
        self.highlight_per_drag_enabled = enabled;
        self
    }

    /// Enable inertial panning with the given friction.
    pub fn with_deceleration(mut self, enabled: bool, friction: f64) -> Self {
        self.drag_deceleration_enabled = enabled;
        self.drag_deceleration_friction = friction.clamp(0.0, 0.999);
        self
    }

    pub fn with_auto_scale(mut self, enabled: bool) -> Self {
        self.auto_scale_min_max = enabled;
        self
    }

    pub fn with_min_offset(mut self, offset: f64) -> Self {
        self.min_offset = offset;
        self
    }

    pub fn with_extra_offsets(mut self, offsets: Offsets) -> Self {
        self.extra_offsets = offsets;
        self
    }

    /// Set the zoom step. Factors at or below 1 are ignored.
    pub fn with_zoom_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 1.0 {
            self.zoom_step = step;
        }
        self
    }

    pub fn with_bubble_size_factor(mut self, factor: f64) -> Self {
        self.bubble_size_factor = factor;
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.default_easing = easing;
        self
    }

    pub fn with_schedule_policy(mut self, policy: SchedulePolicy) -> Self {
        self.schedule_policy = policy;
        self
    }
}
