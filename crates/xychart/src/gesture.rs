//! Pan, pinch and tap input translated into viewport operations.
//!
//! The host's gesture recognizers call these with chart pixel locations.
//! Pan translations are cumulative since the gesture began; pinch scales are
//! incremental since the previous change.

use glam::DVec2;

use crate::chart::{ChartCore, ChartDirtyFlags};
use crate::data::Entry;
use crate::job::JobAction;
use crate::shape::EntryShape;

/// Which axes a pinch zooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureScaleAxis {
    #[default]
    Both,
    X,
    Y,
}

impl GestureScaleAxis {
    pub fn scales_x(&self) -> bool {
        matches!(self, GestureScaleAxis::Both | GestureScaleAxis::X)
    }

    pub fn scales_y(&self) -> bool {
        matches!(self, GestureScaleAxis::Both | GestureScaleAxis::Y)
    }
}

/// Progress of the gesture in flight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub(crate) is_dragging: bool,
    pub(crate) is_scaling: bool,
    pub(crate) scale_axis: GestureScaleAxis,
    pub(crate) last_pan: DVec2,
}

impl GestureState {
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_scaling(&self) -> bool {
        self.is_scaling
    }

    pub fn scale_axis(&self) -> GestureScaleAxis {
        self.scale_axis
    }
}

impl<E: Entry, S: EntryShape<E>> ChartCore<E, S> {
    /// A pan started at `location` and has moved by `translation` so far.
    ///
    /// The chart pans only when dragging is enabled and there is somewhere
    /// to go: it is zoomed in or has drag offsets. Otherwise the pan
    /// highlights entries as it moves.
    pub fn pan_began(&mut self, location: DVec2, translation: DVec2) {
        self.stop_deceleration();
        if self.data.is_empty() {
            return;
        }

        if self.config.drag_enabled && (!self.viewport.has_no_drag_offset() || !self.viewport.is_fully_zoomed_out()) {
            self.gesture.is_dragging = true;
            if translation != DVec2::ZERO {
                self.perform_pan_change(translation);
            }
            self.gesture.last_pan = translation;
            tracing::trace!(?location, "Pan began");
        } else {
            self.gesture.is_dragging = false;
        }
    }

    /// The pan moved; `translation` is cumulative since [`ChartCore::pan_began`].
    pub fn pan_changed(&mut self, location: DVec2, translation: DVec2) {
        if self.gesture.is_dragging {
            let delta = translation - self.gesture.last_pan;
            self.perform_pan_change(delta);
            self.gesture.last_pan = translation;
        } else if self.config.highlight_per_drag_enabled && !self.data.is_empty() {
            let highlight = self.highlight_by_touch_point(location);
            if highlight != self.last_highlight {
                self.highlight_value(highlight);
            }
        }
    }

    /// The pan ended with `velocity` in pixels per second.
    ///
    /// A released (not cancelled) drag keeps going as an inertial pan when
    /// deceleration is enabled.
    pub fn pan_ended(&mut self, velocity: DVec2, cancelled: bool) {
        if !self.gesture.is_dragging {
            return;
        }
        self.gesture.is_dragging = false;

        if !cancelled && self.config.drag_deceleration_enabled && velocity.is_finite() {
            self.stop_deceleration();
            let id = self.schedule(JobAction::decelerate(velocity, self.config.drag_deceleration_friction));
            tracing::debug!(id, ?velocity, "Deceleration started");
        }
    }

    /// Returns `false` when the pan hit the content edge and nothing moved.
    fn perform_pan_change(&mut self, translation: DVec2) -> bool {
        let original = self.viewport.touch_matrix();
        let candidate = self.viewport.translate(translation.x, translation.y);
        let stored = self.viewport.commit(candidate, true);
        self.dirty |= ChartDirtyFlags::VIEW_CHANGED;
        stored.tx() != original.tx() || stored.ty() != original.ty()
    }

    /// A pinch started with two touches.
    ///
    /// Unless pinch zoom is enabled, the pinch scales the axis along which
    /// the touches are spread further apart.
    pub fn pinch_began(&mut self, touch0: DVec2, touch1: DVec2) {
        self.stop_deceleration();
        let config = &self.config;
        if self.data.is_empty() || !(config.pinch_zoom_enabled || config.scale_x_enabled || config.scale_y_enabled) {
            return;
        }

        self.gesture.is_scaling = true;
        self.gesture.scale_axis = if config.pinch_zoom_enabled {
            GestureScaleAxis::Both
        } else {
            let spread = (touch0 - touch1).abs();
            if spread.x > spread.y {
                GestureScaleAxis::X
            } else {
                GestureScaleAxis::Y
            }
        };
        tracing::trace!(axis = ?self.gesture.scale_axis, "Pinch began");
    }

    /// The pinch scaled by `scale` since the last change, about `location`.
    pub fn pinch_changed(&mut self, scale: f64, location: DVec2) {
        if !self.gesture.is_scaling || !scale.is_finite() || scale <= 0.0 {
            return;
        }

        let zooming_out = scale < 1.0;
        let (more_x, more_y) = if zooming_out {
            (self.viewport.can_zoom_out_more_x(), self.viewport.can_zoom_out_more_y())
        } else {
            (self.viewport.can_zoom_in_more_x(), self.viewport.can_zoom_in_more_y())
        };
        let can_zoom_x = more_x && self.config.scale_x_enabled && self.gesture.scale_axis.scales_x();
        let can_zoom_y = more_y && self.config.scale_y_enabled && self.gesture.scale_axis.scales_y();

        if can_zoom_x || can_zoom_y {
            let candidate = self.viewport.zoom(
                if can_zoom_x { scale } else { 1.0 },
                if can_zoom_y { scale } else { 1.0 },
                location.x,
                location.y,
            );
            self.viewport.commit(candidate, true);
            self.dirty |= ChartDirtyFlags::VIEW_CHANGED;
        }
    }

    pub fn pinch_ended(&mut self) {
        if self.gesture.is_scaling {
            self.gesture.is_scaling = false;
            self.calculate_offsets();
            self.dirty |= ChartDirtyFlags::VIEW_CHANGED;
        }
    }

    /// Highlight the entry nearest to `location`; tapping it again clears it.
    pub fn tap(&mut self, location: DVec2) {
        if self.data.is_empty() || !self.config.highlight_per_tap_enabled {
            return;
        }
        let highlight = self.highlight_by_touch_point(location);
        if highlight.is_none() || highlight == self.last_highlight {
            self.highlight_value(None);
        } else {
            self.highlight_value(highlight);
        }
    }

    /// Zoom in one step about `location` on the axes that may scale.
    pub fn double_tap(&mut self, location: DVec2) {
        if self.data.is_empty() || !self.config.double_tap_to_zoom_enabled {
            return;
        }
        let step = self.config.zoom_step;
        self.zoom(
            if self.config.scale_x_enabled { step } else { 1.0 },
            if self.config.scale_y_enabled { step } else { 1.0 },
            location.x,
            location.y,
        );
    }
}
