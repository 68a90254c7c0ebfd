//! The chart engine: viewport, transformer, jobs, data and axes behind one owner.
//!
//! [`ChartCore`] holds no thread and performs no I/O. The host forwards
//! layout and input, calls [`ChartCore::tick`] once per frame and, when it
//! returns `true`, [`ChartCore::render`].

use std::sync::mpsc::{Receiver, Sender, channel};

use glam::DVec2;
use xychart_core::geometry::{Offsets, Size};

use crate::affine::AffineTransform2D;
use crate::axis::Axis;
use crate::command::{ChartCommand, ChartHandle};
use crate::config::ChartConfig;
use crate::data::{ChartData, Dataset, Entry};
use crate::easing::EasingFunction;
use crate::error::{ChartError, ChartResult, ensure_finite};
use crate::gesture::GestureState;
use crate::highlight::{Highlight, NearestEntryResolver};
use crate::job::{JobAction, JobContext, JobEffects, JobId, JobState};
use crate::range::{AutoScaleTracker, VisibleWindow};
use crate::scheduler::JobScheduler;
use crate::shape::{ChartRenderer, EntryShape, ShapeContext};
use crate::transformer::CoordinateTransformer;
use crate::viewport::Viewport;

bitflags::bitflags! {
    /// What changed since the last [`ChartCore::render`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChartDirtyFlags: u8 {
        /// Entries or datasets changed.
        const DATA_CHANGED = 0b0000_0001;
        /// Pan or zoom changed.
        const VIEW_CHANGED = 0b0000_0010;
        /// Chart size or content offsets changed.
        const LAYOUT_CHANGED = 0b0000_0100;
        /// The highlighted entry changed.
        const HIGHLIGHT_CHANGED = 0b0000_1000;
        /// Axis ranges were recomputed.
        const AXES_CHANGED = 0b0001_0000;
    }
}

impl ChartDirtyFlags {
    pub fn needs_redraw(&self) -> bool {
        !self.is_empty()
    }
}

/// A pannable, zoomable x/y chart over entries of type `E`, sized by `S`.
pub struct ChartCore<E: Entry, S: EntryShape<E>> {
    pub(crate) config: ChartConfig,
    pub(crate) viewport: Viewport,
    pub(crate) transformer: CoordinateTransformer,
    pub(crate) scheduler: JobScheduler,
    pub(crate) data: ChartData<E>,
    x_axis: Axis,
    y_axis: Axis,
    shape: S,
    pub(crate) dirty: ChartDirtyFlags,
    pub(crate) last_highlight: Option<Highlight>,
    pub(crate) gesture: GestureState,
    custom_offsets: bool,
    label_offsets: Offsets,
    auto_scale: AutoScaleTracker,
    sender: Sender<ChartCommand<E>>,
    receiver: Receiver<ChartCommand<E>>,
}

impl<E: Entry, S: EntryShape<E>> ChartCore<E, S> {
    pub fn new(config: ChartConfig, shape: S) -> Self {
        let (sender, receiver) = channel();
        let mut chart = Self {
            scheduler: JobScheduler::new(config.schedule_policy),
            config,
            viewport: Viewport::new(),
            transformer: CoordinateTransformer::new(),
            data: ChartData::new(),
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            shape,
            dirty: ChartDirtyFlags::empty(),
            last_highlight: None,
            gesture: GestureState::default(),
            custom_offsets: false,
            label_offsets: Offsets::ZERO,
            auto_scale: AutoScaleTracker::new(),
            sender,
            receiver,
        };
        chart.notify_data_set_changed();
        chart
    }

    pub fn with_data(mut self, data: ChartData<E>) -> Self {
        self.set_data(data);
        self
    }

    pub fn with_axes(mut self, x_axis: Axis, y_axis: Axis) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self.notify_data_set_changed();
        self
    }

    // --- Data ---

    /// Replace all data. Clears the highlight.
    pub fn set_data(&mut self, data: ChartData<E>) {
        self.data = data;
        self.last_highlight = None;
        self.auto_scale.reset();
        tracing::debug!(
            datasets = self.data.dataset_count(),
            entries = self.data.entry_count(),
            "Chart data set"
        );
        self.notify_data_set_changed();
    }

    pub fn data(&self) -> &ChartData<E> {
        &self.data
    }

    /// Mutable data access. Call [`ChartCore::notify_data_set_changed`] afterwards.
    pub fn data_mut(&mut self) -> &mut ChartData<E> {
        &mut self.data
    }

    /// Recompute ranges and offsets after the data changed.
    pub fn notify_data_set_changed(&mut self) {
        self.calc_min_max();
        self.calculate_offsets();
        self.dirty |= ChartDirtyFlags::DATA_CHANGED;
    }

    pub fn add_dataset(&mut self, dataset: Dataset<E>) -> usize {
        let index = self.data.add_dataset(dataset);
        self.resolve_axes();
        self.calculate_offsets();
        self.dirty |= ChartDirtyFlags::DATA_CHANGED;
        index
    }

    /// Append an entry, widening the axes to include it.
    pub fn add_entry(&mut self, dataset_index: usize, entry: E) -> ChartResult<usize> {
        let index = self.data.add_entry(dataset_index, entry)?;
        self.resolve_axes();
        self.calculate_offsets();
        self.dirty |= ChartDirtyFlags::DATA_CHANGED;
        Ok(index)
    }

    pub fn remove_entry(&mut self, dataset_index: usize, entry_index: usize) -> ChartResult<E> {
        let removed = self.data.remove_entry(dataset_index, entry_index)?;
        if self
            .last_highlight
            .is_some_and(|h| h.dataset_index == dataset_index && h.entry_index >= entry_index)
        {
            self.last_highlight = None;
        }
        self.resolve_axes();
        self.calculate_offsets();
        self.dirty |= ChartDirtyFlags::DATA_CHANGED;
        Ok(removed)
    }

    fn calc_min_max(&mut self) {
        let window = if self.config.auto_scale_min_max && self.viewport.has_content() {
            self.visible_window()
        } else {
            VisibleWindow::ALL
        };
        self.data.calc_min_max(window);
        self.resolve_axes();
    }

    fn resolve_axes(&mut self) {
        let range = *self.data.range();
        let x = self.x_axis.resolve(range.x);
        let y = self.y_axis.resolve(range.y);
        self.dirty |= ChartDirtyFlags::AXES_CHANGED;
        tracing::trace!(x_min = x.min, x_max = x.max, y_min = y.min, y_max = y.max, "Resolved axes");
    }

    // --- Layout ---

    pub fn set_chart_size(&mut self, size: Size) {
        self.viewport.set_chart_size(size);
        self.calculate_offsets();
        let touch = self.viewport.touch_matrix();
        self.viewport.commit(touch, false);
        self.dirty |= ChartDirtyFlags::LAYOUT_CHANGED;
    }

    /// Space reserved by axis labels and legends, in pixels.
    pub fn set_axis_label_offsets(&mut self, offsets: Offsets) {
        self.label_offsets = offsets;
        self.calculate_offsets();
    }

    /// Recompute content offsets and rebuild the transformer matrices.
    ///
    /// Each computed offset is at least the configured minimum. Custom
    /// offsets set by [`ChartCore::set_view_port_offsets`] are kept as they are.
    pub fn calculate_offsets(&mut self) {
        if !self.custom_offsets {
            let extra = self.config.extra_offsets;
            let labels = self.label_offsets;
            let offsets = Offsets::new(
                extra.left + labels.left,
                extra.top + labels.top,
                extra.right + labels.right,
                extra.bottom + labels.bottom,
            )
            .max(&Offsets::uniform(self.config.min_offset));

            if offsets != self.viewport.offsets() {
                tracing::debug!(?offsets, "Content offsets changed");
            }
            self.viewport.restrain(offsets);
        }
        self.prepare_matrices();
    }

    /// Fix the content offsets, bypassing [`ChartCore::calculate_offsets`].
    pub fn set_view_port_offsets(&mut self, offsets: Offsets) {
        self.custom_offsets = true;
        self.viewport.restrain(offsets);
        self.prepare_matrices();
        self.dirty |= ChartDirtyFlags::LAYOUT_CHANGED;
    }

    pub fn reset_view_port_offsets(&mut self) {
        self.custom_offsets = false;
        self.calculate_offsets();
        self.dirty |= ChartDirtyFlags::LAYOUT_CHANGED;
    }

    fn prepare_matrices(&mut self) {
        let inverted = self.x_axis.is_inverted() || self.y_axis.is_inverted();
        self.transformer.prepare_offset(inverted, &self.viewport);
        self.transformer.prepare_value_px(
            self.x_axis.minimum(),
            self.x_axis.delta(),
            self.y_axis.delta(),
            self.y_axis.minimum(),
            self.viewport.content_rect().size(),
        );
    }

    // --- Zoom ---

    /// Zoom in one step about the content center.
    pub fn zoom_in(&mut self) {
        let matrix = self
            .viewport
            .zoom_in(self.config.zoom_step, self.viewport.content_center());
        self.commit_view(matrix);
    }

    /// Zoom out one step about the content center.
    pub fn zoom_out(&mut self) {
        let matrix = self
            .viewport
            .zoom_out(self.config.zoom_step, self.viewport.content_center());
        self.commit_view(matrix);
    }

    /// Zoom by a factor per axis about a chart pixel.
    pub fn zoom(&mut self, scale_x: f64, scale_y: f64, x: f64, y: f64) {
        let matrix = self.viewport.zoom(scale_x, scale_y, x, y);
        self.commit_view(matrix);
    }

    /// Reset all zooming and dragging.
    pub fn fit_screen(&mut self) {
        let matrix = self.viewport.fit_screen();
        self.commit_view(matrix);
    }

    fn commit_view(&mut self, matrix: AffineTransform2D) {
        self.viewport.commit(matrix, false);
        self.calculate_offsets();
        self.dirty |= ChartDirtyFlags::VIEW_CHANGED;
    }

    pub fn set_scale_minima(&mut self, scale_x: f64, scale_y: f64) {
        self.viewport.set_minimum_scale_x(scale_x);
        self.viewport.set_minimum_scale_y(scale_y);
    }

    /// Largest x range visible at once, in values. Limits zooming out.
    pub fn set_visible_x_range_maximum(&mut self, max_range: f64) -> ChartResult<()> {
        let scale = self.x_axis.delta() / positive_range(max_range)?;
        self.viewport.set_minimum_scale_x(scale);
        Ok(())
    }

    /// Smallest x range visible at once, in values. Limits zooming in.
    pub fn set_visible_x_range_minimum(&mut self, min_range: f64) -> ChartResult<()> {
        let scale = self.x_axis.delta() / positive_range(min_range)?;
        self.viewport.set_maximum_scale_x(scale);
        Ok(())
    }

    pub fn set_visible_x_range(&mut self, min_range: f64, max_range: f64) -> ChartResult<()> {
        let min_range = positive_range(min_range)?;
        let max_range = positive_range(max_range)?;
        if min_range > max_range {
            return Err(ChartError::DegenerateRange {
                min: min_range,
                max: max_range,
            });
        }
        let delta = self.x_axis.delta();
        self.viewport
            .set_min_max_scale_x(delta / max_range, delta / min_range);
        Ok(())
    }

    /// Largest y range visible at once, in values. Limits zooming out.
    pub fn set_visible_y_range_maximum(&mut self, max_range: f64) -> ChartResult<()> {
        let scale = self.y_axis.delta() / positive_range(max_range)?;
        self.viewport.set_minimum_scale_y(scale);
        Ok(())
    }

    /// Smallest y range visible at once, in values. Limits zooming in.
    pub fn set_visible_y_range_minimum(&mut self, min_range: f64) -> ChartResult<()> {
        let scale = self.y_axis.delta() / positive_range(min_range)?;
        self.viewport.set_maximum_scale_y(scale);
        Ok(())
    }

    pub fn set_drag_offset_x(&mut self, offset: f64) {
        self.viewport.set_drag_offset_x(offset);
    }

    pub fn set_drag_offset_y(&mut self, offset: f64) {
        self.viewport.set_drag_offset_y(offset);
    }

    // --- Jobs ---

    pub(crate) fn schedule(&mut self, action: JobAction) -> JobId {
        let mut ctx = JobContext::new(&mut self.viewport, &self.transformer);
        let (id, effects) = self.scheduler.schedule(action, &mut ctx);
        self.apply_effects(effects);
        id
    }

    fn apply_effects(&mut self, effects: JobEffects) {
        if effects.contains(JobEffects::RECALCULATE_OFFSETS) {
            self.calculate_offsets();
        }
        if effects.contains(JobEffects::REDRAW) {
            self.dirty |= ChartDirtyFlags::VIEW_CHANGED;
        }
    }

    /// Values visible across the content rect at the current scale.
    pub fn visible_range(&self) -> DVec2 {
        DVec2::new(
            self.x_axis.delta() / self.viewport.scale_x(),
            self.y_axis.delta() / self.viewport.scale_y(),
        )
    }

    /// The value shown at the content center.
    pub fn center_value(&self) -> DVec2 {
        self.value_by_touch_point(self.viewport.content_center())
    }

    /// Put `x` at the left edge; the vertical position is kept.
    pub fn move_view_to_x(&mut self, x: f64) -> JobId {
        let center = DVec2::new(x + self.visible_range().x / 2.0, self.center_value().y);
        self.schedule(JobAction::move_to(center))
    }

    /// Center the view vertically on `y`; the horizontal position is kept.
    pub fn move_view_to_y(&mut self, y: f64) -> JobId {
        let center = DVec2::new(self.center_value().x, y);
        self.schedule(JobAction::move_to(center))
    }

    /// Put `x` at the left edge and center vertically on `y`.
    pub fn move_view_to(&mut self, x: f64, y: f64) -> JobId {
        let center = self.move_target(x, y);
        self.schedule(JobAction::move_to(center))
    }

    pub fn center_view_to(&mut self, x: f64, y: f64) -> JobId {
        self.schedule(JobAction::move_to(DVec2::new(x, y)))
    }

    /// Set an absolute scale and center on `(x, y)`.
    pub fn zoom_to(&mut self, scale_x: f64, scale_y: f64, x: f64, y: f64) -> JobId {
        self.schedule(JobAction::zoom_to(DVec2::new(scale_x, scale_y), DVec2::new(x, y)))
    }

    /// Animated [`ChartCore::move_view_to`]. `None` uses the configured easing.
    pub fn move_view_to_animated(&mut self, x: f64, y: f64, duration: f64, easing: Option<EasingFunction>) -> JobId {
        let target = self.move_target(x, y);
        let action = JobAction::animated_move(self.center_value(), target, duration, self.easing_or_default(easing));
        self.schedule(action)
    }

    pub fn center_view_to_animated(&mut self, x: f64, y: f64, duration: f64, easing: Option<EasingFunction>) -> JobId {
        let action = JobAction::animated_move(
            self.center_value(),
            DVec2::new(x, y),
            duration,
            self.easing_or_default(easing),
        );
        self.schedule(action)
    }

    /// Animate to an absolute scale centered on `(x, y)`.
    pub fn zoom_and_center_view_animated(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        x: f64,
        y: f64,
        duration: f64,
        easing: Option<EasingFunction>,
    ) -> JobId {
        let action = JobAction::animated_zoom(
            DVec2::new(self.viewport.scale_x(), self.viewport.scale_y()),
            DVec2::new(scale_x, scale_y),
            self.center_value(),
            DVec2::new(x, y),
            duration,
            self.easing_or_default(easing),
        );
        self.schedule(action)
    }

    fn move_target(&self, x: f64, y: f64) -> DVec2 {
        DVec2::new(x + self.visible_range().x / 2.0, y)
    }

    fn easing_or_default(&self, easing: Option<EasingFunction>) -> EasingFunction {
        easing.unwrap_or(self.config.default_easing)
    }

    /// Stop inertial panning.
    pub fn stop_deceleration(&mut self) {
        if self.scheduler.stop_deceleration() {
            tracing::debug!("Deceleration stopped");
        }
    }

    pub fn cancel_job(&mut self, id: JobId) -> bool {
        self.scheduler.cancel(id)
    }

    pub fn cancel_all_jobs(&mut self) {
        self.scheduler.cancel_all();
    }

    pub fn job_state(&self, id: JobId) -> Option<JobState> {
        self.scheduler.state_of(id)
    }

    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    // --- Queries ---

    pub fn value_by_touch_point(&self, pixel: DVec2) -> DVec2 {
        self.transformer.pixel_to_point(pixel, &self.viewport)
    }

    pub fn pixel_for_value(&self, x: f64, y: f64) -> DVec2 {
        self.transformer.point_to_pixel(DVec2::new(x, y), &self.viewport)
    }

    /// The entry nearest to a chart pixel.
    pub fn highlight_by_touch_point(&self, pixel: DVec2) -> Option<Highlight> {
        if self.data.is_empty() {
            tracing::debug!("No data to highlight");
            return None;
        }
        NearestEntryResolver::new(&self.data).resolve(pixel, &self.transformer, &self.viewport)
    }

    pub fn entry_by_touch_point(&self, pixel: DVec2) -> Option<&E> {
        let highlight = self.highlight_by_touch_point(pixel)?;
        self.data.entry_for_highlight(&highlight)
    }

    pub fn dataset_by_touch_point(&self, pixel: DVec2) -> Option<&Dataset<E>> {
        let highlight = self.highlight_by_touch_point(pixel)?;
        self.data.dataset(highlight.dataset_index)
    }

    /// Smallest x value visible at the content's left edge.
    pub fn lowest_visible_x(&self) -> f64 {
        let rect = self.viewport.content_rect();
        self.value_by_touch_point(DVec2::new(rect.left(), rect.bottom())).x
    }

    pub fn highest_visible_x(&self) -> f64 {
        let rect = self.viewport.content_rect();
        self.value_by_touch_point(DVec2::new(rect.right(), rect.bottom())).x
    }

    pub fn lowest_visible_y(&self) -> f64 {
        let rect = self.viewport.content_rect();
        self.value_by_touch_point(DVec2::new(rect.left(), rect.bottom())).y
    }

    pub fn highest_visible_y(&self) -> f64 {
        let rect = self.viewport.content_rect();
        self.value_by_touch_point(DVec2::new(rect.left(), rect.top())).y
    }

    /// The value-space rectangle currently inside the content rect.
    pub fn visible_window(&self) -> VisibleWindow {
        let (lx, hx) = (self.lowest_visible_x(), self.highest_visible_x());
        let (ly, hy) = (self.lowest_visible_y(), self.highest_visible_y());
        VisibleWindow::new(lx.min(hx), lx.max(hx), ly.min(hy), ly.max(hy))
    }

    pub fn scale_x(&self) -> f64 {
        self.viewport.scale_x()
    }

    pub fn scale_y(&self) -> f64 {
        self.viewport.scale_y()
    }

    pub fn is_fully_zoomed_out(&self) -> bool {
        self.viewport.is_fully_zoomed_out()
    }

    // --- Highlight ---

    pub fn highlighted(&self) -> Option<Highlight> {
        self.last_highlight
    }

    /// Highlight an entry, or clear with `None`. Stale references are dropped.
    pub fn highlight_value(&mut self, highlight: Option<Highlight>) {
        let highlight = highlight.filter(|h| {
            let exists = self.data.entry_for_highlight(h).is_some();
            if !exists {
                tracing::warn!(?h, "Ignoring highlight of a missing entry");
            }
            exists
        });
        if highlight != self.last_highlight {
            tracing::debug!(?highlight, "Highlight changed");
            self.last_highlight = highlight;
            self.dirty |= ChartDirtyFlags::HIGHLIGHT_CHANGED;
        }
    }

    // --- Frame ---

    /// Apply queued commands, advance jobs by `dt` seconds and run follow-up
    /// work. Returns `true` when the chart needs to be redrawn.
    pub fn tick(&mut self, dt: f64) -> bool {
        puffin::profile_function!();

        self.drain_commands();

        let effects = {
            let mut ctx = JobContext::new(&mut self.viewport, &self.transformer);
            self.scheduler.tick(dt, &mut ctx)
        };
        self.apply_effects(effects);

        let changes = self.viewport.take_changes();
        if changes.needs_transformer_rebuild() {
            self.prepare_matrices();
            self.dirty |= ChartDirtyFlags::LAYOUT_CHANGED;
        }
        if changes.needs_redraw() {
            self.dirty |= ChartDirtyFlags::VIEW_CHANGED;
        }

        if self.config.auto_scale_min_max {
            self.update_auto_scale();
        }

        tracing::trace!(dt, dirty = ?self.dirty, "Chart tick");
        self.dirty.needs_redraw()
    }

    /// Recompute ranges from the visible entries if the visible window moved.
    ///
    /// Returns `true` when the axes were recomputed.
    pub fn update_auto_scale(&mut self) -> bool {
        if !self.viewport.has_content() || !self.auto_scale.observe(self.visible_window()) {
            return false;
        }
        self.calc_min_max();
        self.calculate_offsets();
        // The axes moved the window; record where it settled.
        self.auto_scale.observe(self.visible_window());
        true
    }

    fn drain_commands(&mut self) {
        while let Ok(command) = self.receiver.try_recv() {
            self.apply_command(command);
        }
    }

    fn apply_command(&mut self, command: ChartCommand<E>) {
        tracing::trace!(?command, "Applying chart command");
        match command {
            ChartCommand::SetChartSize(size) => self.set_chart_size(size),
            ChartCommand::ZoomIn => self.zoom_in(),
            ChartCommand::ZoomOut => self.zoom_out(),
            ChartCommand::Zoom { scale, pivot } => self.zoom(scale.x, scale.y, pivot.x, pivot.y),
            ChartCommand::FitScreen => self.fit_screen(),
            ChartCommand::MoveViewTo(value) => {
                self.move_view_to(value.x, value.y);
            }
            ChartCommand::CenterViewTo(value) => {
                self.center_view_to(value.x, value.y);
            }
            ChartCommand::ZoomTo { scale, center } => {
                self.zoom_to(scale.x, scale.y, center.x, center.y);
            }
            ChartCommand::CenterViewToAnimated {
                target,
                duration,
                easing,
            } => {
                self.center_view_to_animated(target.x, target.y, duration, easing);
            }
            ChartCommand::ZoomAndCenterAnimated {
                scale,
                target,
                duration,
                easing,
            } => {
                self.zoom_and_center_view_animated(scale.x, scale.y, target.x, target.y, duration, easing);
            }
            ChartCommand::StopDeceleration => self.stop_deceleration(),
            ChartCommand::Highlight(highlight) => self.highlight_value(highlight),
            ChartCommand::AddEntry { dataset_index, entry } => {
                if let Err(err) = self.add_entry(dataset_index, entry) {
                    tracing::warn!(%err, "Dropped queued entry");
                }
            }
            ChartCommand::NotifyDataSetChanged => self.notify_data_set_changed(),
        }
    }

    /// Draw every visible entry, then the highlight, and clear the dirty flags.
    ///
    /// An entry is culled when its far corner `center + extent / 2` falls
    /// outside the content rect.
    pub fn render<R: ChartRenderer<E>>(&mut self, renderer: &mut R) {
        puffin::profile_function!();

        renderer.begin_frame(self.viewport.content_rect());

        let matrix = self.transformer.value_to_pixel_matrix(&self.viewport);
        let ctx = self.shape_context();
        let mut drawn = 0usize;
        for (dataset_index, dataset) in self.data.datasets().iter().enumerate() {
            for (entry_index, entry) in dataset.iter().enumerate() {
                if !entry.is_finite() {
                    continue;
                }
                let center = matrix.transform_point(entry.position());
                let extent = self.shape.extent(entry, &ctx);
                if !self.is_drawable(center, extent) {
                    continue;
                }
                renderer.draw_entry(dataset_index, entry_index, entry, center, extent);
                drawn += 1;
            }
        }

        if let Some(highlight) = self.last_highlight
            && let Some(entry) = self.data.entry_for_highlight(&highlight)
        {
            let center = matrix.transform_point(entry.position());
            let extent = self.shape.extent(entry, &ctx);
            if self.is_drawable(center, extent) {
                renderer.draw_highlight(highlight, entry, center, extent);
            }
        }

        renderer.end_frame();
        tracing::trace!(drawn, "Rendered chart frame");
        self.dirty = ChartDirtyFlags::empty();
    }

    fn is_drawable(&self, center: DVec2, extent: f64) -> bool {
        let half = extent / 2.0;
        self.viewport.is_in_bounds_x(center.x + half) && self.viewport.is_in_bounds_y(center.y + half)
    }

    fn shape_context(&self) -> ShapeContext {
        ShapeContext {
            content: self.viewport.content_rect().size(),
            range: *self.data.range(),
            size_factor: self.config.bubble_size_factor,
        }
    }

    // --- Accessors ---

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replace the configuration. Offsets and the schedule policy follow it.
    pub fn set_config(&mut self, config: ChartConfig) {
        self.scheduler.set_policy(config.schedule_policy);
        self.config = config;
        self.auto_scale.reset();
        self.calculate_offsets();
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn transformer(&self) -> &CoordinateTransformer {
        &self.transformer
    }

    pub fn scheduler(&self) -> &JobScheduler {
        &self.scheduler
    }

    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    /// Mutable axis access. Call [`ChartCore::notify_data_set_changed`] afterwards.
    pub fn x_axis_mut(&mut self) -> &mut Axis {
        &mut self.x_axis
    }

    /// Mutable axis access. Call [`ChartCore::notify_data_set_changed`] afterwards.
    pub fn y_axis_mut(&mut self) -> &mut Axis {
        &mut self.y_axis
    }

    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn dirty_flags(&self) -> ChartDirtyFlags {
        self.dirty
    }

    pub fn gesture_state(&self) -> &GestureState {
        &self.gesture
    }
}

impl<E: Entry + Send, S: EntryShape<E>> ChartCore<E, S> {
    /// A handle other threads can use to queue commands for the next tick.
    pub fn handle(&self) -> ChartHandle<E> {
        ChartHandle::new(self.sender.clone())
    }
}

fn positive_range(range: f64) -> ChartResult<f64> {
    let range = ensure_finite(range, "visible range")?;
    if range <= 0.0 {
        return Err(ChartError::DegenerateRange { min: 0.0, max: range });
    }
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::XyEntry;
    use crate::shape::PointShape;

    fn chart() -> ChartCore<XyEntry, PointShape> {
        let data = ChartData::from_datasets(vec![Dataset::with_entries(
            "line",
            (0..=10).map(|i| XyEntry::new(i as f64, (i * i) as f64)).collect(),
        )]);
        let mut chart = ChartCore::new(ChartConfig::default(), PointShape::default()).with_data(data);
        chart.set_chart_size(Size::new(220.0, 120.0));
        chart
    }

    #[test]
    fn test_offsets_respect_minimum() {
        let mut chart = chart();
        assert_eq!(chart.viewport().offsets(), Offsets::uniform(10.0));

        chart.set_axis_label_offsets(Offsets::new(30.0, 0.0, 0.0, 20.0));
        assert_eq!(chart.viewport().offsets(), Offsets::new(30.0, 10.0, 10.0, 20.0));

        chart.set_view_port_offsets(Offsets::uniform(5.0));
        chart.set_axis_label_offsets(Offsets::new(50.0, 0.0, 0.0, 0.0));
        assert_eq!(chart.viewport().offsets(), Offsets::uniform(5.0));

        chart.reset_view_port_offsets();
        assert_eq!(chart.viewport().offsets(), Offsets::new(50.0, 10.0, 10.0, 10.0));
    }

    #[test]
    fn test_axes_span_content() {
        let chart = chart();
        // x: [0, 10] padded by 10% each way
        assert!((chart.lowest_visible_x() - chart.x_axis().minimum()).abs() < 1e-9);
        assert!((chart.highest_visible_x() - chart.x_axis().maximum()).abs() < 1e-9);
        assert!((chart.lowest_visible_y() - chart.y_axis().minimum()).abs() < 1e-9);
        assert!((chart.highest_visible_y() - chart.y_axis().maximum()).abs() < 1e-9);
    }

    #[test]
    fn test_value_pixel_round_trip() {
        let chart = chart();
        let pixel = chart.pixel_for_value(3.0, 9.0);
        let value = chart.value_by_touch_point(pixel);
        assert!((value - DVec2::new(3.0, 9.0)).length() < 1e-9);
    }

    #[test]
    fn test_zoom_in_out_restores_scale() {
        let mut chart = chart();
        chart.zoom_in();
        assert!((chart.scale_x() - 1.4).abs() < 1e-12);
        assert!(!chart.is_fully_zoomed_out());
        chart.zoom_out();
        assert!((chart.scale_x() - 1.0).abs() < 1e-12);
        assert!(chart.is_fully_zoomed_out());
    }

    #[test]
    fn test_visible_x_range_maximum_limits_zoom_out() {
        let mut chart = chart();
        let delta = chart.x_axis().delta();
        chart.set_visible_x_range_maximum(delta / 2.0).unwrap();
        assert!((chart.scale_x() - 2.0).abs() < 1e-9);
        assert!(chart.set_visible_x_range_maximum(0.0).is_err());
        assert!(chart.set_visible_x_range(5.0, 1.0).is_err());
    }

    #[test]
    fn test_center_view_to_is_instant() {
        let mut chart = chart();
        chart.zoom(4.0, 4.0, 0.0, 0.0);
        let id = chart.center_view_to(5.0, 25.0);
        assert_eq!(chart.job_state(id), Some(JobState::Completed));
        let center = chart.center_value();
        assert!((center - DVec2::new(5.0, 25.0)).length() < 1e-6);
    }

    #[test]
    fn test_highlight_value_rejects_missing_entry() {
        let mut chart = chart();
        chart.highlight_value(Some(Highlight::new(0, 99)));
        assert_eq!(chart.highlighted(), None);
        chart.highlight_value(Some(Highlight::new(0, 3)));
        assert_eq!(chart.highlighted(), Some(Highlight::new(0, 3)));

        chart.remove_entry(0, 1).unwrap();
        assert_eq!(chart.highlighted(), None);
    }

    #[test]
    fn test_tick_reports_redraw_once() {
        let mut chart = chart();
        assert!(chart.tick(0.016));
        chart.render(&mut NullRenderer);
        assert!(!chart.tick(0.016));
    }

    struct NullRenderer;

    impl ChartRenderer<XyEntry> for NullRenderer {
        fn draw_entry(&mut self, _: usize, _: usize, _: &XyEntry, _: DVec2, _: f64) {}
    }
}
