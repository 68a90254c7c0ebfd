//! Requested viewport changes and their per-tick state.
//!
//! A [`ViewportJob`] never owns the viewport. Each step receives a
//! [`JobContext`] borrowing the chart's single viewport and transformer.

use glam::DVec2;

use crate::easing::EasingFunction;
use crate::transformer::CoordinateTransformer;
use crate::viewport::Viewport;

/// Identifier handed out by the scheduler.
pub type JobId = u64;

/// How a job is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Applied within the scheduling call.
    Instant,
    /// Interpolated over a fixed duration.
    Animated,
    /// Inertial pan with velocity decay.
    Decelerating,
}

/// Job lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobState {
    Pending,
    Running,
    Completed,
    Cancelled,
}

impl JobState {
    pub fn is_finished(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Cancelled)
    }
}

bitflags::bitflags! {
    /// Follow-up work a job asks of the chart after a step.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct JobEffects: u8 {
        /// The chart must be redrawn.
        const REDRAW = 0b0000_0001;
        /// Content offsets may depend on the new visible range.
        const RECALCULATE_OFFSETS = 0b0000_0010;
    }
}

/// Mutable access to the state a job operates on.
pub struct JobContext<'a> {
    pub viewport: &'a mut Viewport,
    pub transformer: &'a CoordinateTransformer,
}

impl<'a> JobContext<'a> {
    pub fn new(viewport: &'a mut Viewport, transformer: &'a CoordinateTransformer) -> Self {
        Self {
            viewport,
            transformer,
        }
    }

    /// Pan so that the value-space point `value` sits at the content center.
    pub fn center_on_value(&mut self, value: DVec2, invalidate: bool) {
        let pixel = self.transformer.point_to_pixel(value, self.viewport);
        let matrix = self.viewport.center_on(pixel);
        self.viewport.commit(matrix, invalidate);
    }

    /// Set an absolute scale, keeping the current translation.
    pub fn zoom_to(&mut self, scale: DVec2) {
        let matrix = self.viewport.set_zoom(scale.x, scale.y);
        self.viewport.commit(matrix, false);
    }
}

/// Elapsed time, duration and easing of an animated job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    duration: f64,
    elapsed: f64,
    easing: EasingFunction,
}

impl Timeline {
    /// Non-finite or negative durations finish on the first tick.
    pub fn new(duration: f64, easing: EasingFunction) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        Self {
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds and return the new raw phase.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.phase()
    }

    /// Raw progress in `[0, 1]`.
    pub fn phase(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// Progress after easing.
    pub fn eased_phase(&self) -> f64 {
        self.easing.apply(self.phase())
    }

    pub fn is_finished(&self) -> bool {
        self.phase() >= 1.0
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn easing(&self) -> EasingFunction {
        self.easing
    }
}

/// Velocity decay state of an inertial pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deceleration {
    velocity: DVec2,
    friction: f64,
}

impl Deceleration {
    /// Speed in px/s below which the pan stops.
    pub const STOP_VELOCITY: f64 = 0.001;
    /// Friction is applied once per frame at this rate.
    pub const REFERENCE_FPS: f64 = 60.0;

    /// `friction` is clamped to `[0, 0.999]`.
    pub fn new(velocity: DVec2, friction: f64) -> Self {
        let friction = if friction.is_finite() { friction.clamp(0.0, 0.999) } else { 0.0 };
        let velocity = if velocity.is_finite() { velocity } else { DVec2::ZERO };
        Self { velocity, friction }
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn is_stopped(&self) -> bool {
        self.velocity.x.abs() < Self::STOP_VELOCITY && self.velocity.y.abs() < Self::STOP_VELOCITY
    }

    /// Decay, move, and return `true` once the pan has stopped.
    pub fn step(&mut self, dt: f64, ctx: &mut JobContext<'_>) -> bool {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.velocity *= self.friction.powf(dt * Self::REFERENCE_FPS);

        let displacement = self.velocity * dt;
        let candidate = ctx.viewport.translate(displacement.x, displacement.y);
        let stored = ctx.viewport.commit(candidate, true);

        // An axis that hit its pan boundary cannot keep moving.
        if stored.tx() != candidate.tx() {
            self.velocity.x = 0.0;
        }
        if stored.ty() != candidate.ty() {
            self.velocity.y = 0.0;
        }

        self.is_stopped()
    }
}

/// What a job does to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JobAction {
    /// Center the view on a value-space point.
    MoveTo { center: DVec2 },
    /// Set an absolute scale, then center on a value-space point.
    ZoomTo { scale: DVec2, center: DVec2 },
    /// Interpolate the centered value point.
    AnimatedMove {
        origin: DVec2,
        target: DVec2,
        timeline: Timeline,
    },
    /// Interpolate scale and centered value point together.
    AnimatedZoom {
        origin_scale: DVec2,
        target_scale: DVec2,
        origin: DVec2,
        target: DVec2,
        timeline: Timeline,
    },
    /// Inertial pan.
    Decelerate(Deceleration),
}

impl JobAction {
    pub fn move_to(center: DVec2) -> Self {
        JobAction::MoveTo { center }
    }

    pub fn zoom_to(scale: DVec2, center: DVec2) -> Self {
        JobAction::ZoomTo { scale, center }
    }

    pub fn animated_move(origin: DVec2, target: DVec2, duration: f64, easing: EasingFunction) -> Self {
        JobAction::AnimatedMove {
            origin,
            target,
            timeline: Timeline::new(duration, easing),
        }
    }

    pub fn animated_zoom(
        origin_scale: DVec2,
        target_scale: DVec2,
        origin: DVec2,
        target: DVec2,
        duration: f64,
        easing: EasingFunction,
    ) -> Self {
        JobAction::AnimatedZoom {
            origin_scale,
            target_scale,
            origin,
            target,
            timeline: Timeline::new(duration, easing),
        }
    }

    pub fn decelerate(velocity: DVec2, friction: f64) -> Self {
        JobAction::Decelerate(Deceleration::new(velocity, friction))
    }

    pub fn kind(&self) -> JobKind {
        match self {
            JobAction::MoveTo { .. } | JobAction::ZoomTo { .. } => JobKind::Instant,
            JobAction::AnimatedMove { .. } | JobAction::AnimatedZoom { .. } => JobKind::Animated,
            JobAction::Decelerate(_) => JobKind::Decelerating,
        }
    }
}

/// A single requested change to the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportJob {
    id: JobId,
    state: JobState,
    action: JobAction,
}

impl ViewportJob {
    pub fn new(id: JobId, action: JobAction) -> Self {
        Self {
            id,
            state: JobState::Pending,
            action,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn kind(&self) -> JobKind {
        self.action.kind()
    }

    pub fn action(&self) -> &JobAction {
        &self.action
    }

    /// Raw phase of an animated job.
    pub fn phase(&self) -> Option<f64> {
        match &self.action {
            JobAction::AnimatedMove { timeline, .. } | JobAction::AnimatedZoom { timeline, .. } => {
                Some(timeline.phase())
            }
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Stop immediately, leaving the viewport wherever it got to.
    pub fn cancel(&mut self) {
        if !self.state.is_finished() {
            self.state = JobState::Cancelled;
        }
    }

    /// Advance the job by `dt` seconds against `ctx`.
    ///
    /// Instant jobs ignore `dt` and complete in one step.
    pub fn step(&mut self, dt: f64, ctx: &mut JobContext<'_>) -> JobEffects {
        if self.state.is_finished() {
            return JobEffects::empty();
        }
        self.state = JobState::Running;

        let finished = match &mut self.action {
            JobAction::MoveTo { center } => {
                ctx.center_on_value(*center, true);
                true
            }
            JobAction::ZoomTo { scale, center } => {
                ctx.zoom_to(*scale);
                ctx.center_on_value(*center, true);
                true
            }
            JobAction::AnimatedMove {
                origin,
                target,
                timeline,
            } => {
                timeline.advance(dt);
                let center = if timeline.is_finished() {
                    *target
                } else {
                    origin.lerp(*target, timeline.eased_phase())
                };
                ctx.center_on_value(center, true);
                timeline.is_finished()
            }
            JobAction::AnimatedZoom {
                origin_scale,
                target_scale,
                origin,
                target,
                timeline,
            } => {
                timeline.advance(dt);
                let (scale, center) = if timeline.is_finished() {
                    (*target_scale, *target)
                } else {
                    let t = timeline.eased_phase();
                    (origin_scale.lerp(*target_scale, t), origin.lerp(*target, t))
                };
                ctx.zoom_to(scale);
                ctx.center_on_value(center, true);
                timeline.is_finished()
            }
            JobAction::Decelerate(deceleration) => deceleration.step(dt, ctx),
        };

        if finished {
            self.state = JobState::Completed;
            tracing::debug!(id = self.id, kind = ?self.kind(), "Viewport job completed");
            JobEffects::REDRAW | JobEffects::RECALCULATE_OFFSETS
        } else {
            JobEffects::REDRAW
        }
    }
}
