//! Headless Session - Driving a chart without a window
//!
//! This example plays a short scripted session against a bubble chart:
//! - A producer thread streams entries through a `ChartHandle`
//! - Pinch, pan and fling gestures move the viewport
//! - An animated zoom is stepped at 60 frames per second
//!
//! Draw calls are reported through `tracing`. Run with
//! `RUST_LOG=debug` to also see viewport jobs start and finish, or with
//! `--features profiling` to serve puffin data on 127.0.0.1:8585.

use std::thread;
use std::time::Duration;

use xychart::{
    BubbleEntry, BubbleShape, ChartConfig, ChartCore, ChartData, ChartRenderer, DVec2, Dataset, EasingFunction,
    Entry, Highlight, Rect, Size,
};
use xychart_core::logging;
use xychart_core::profiling::{ProfilingBackend, init_profiling, new_frame};

const FRAME: f64 = 1.0 / 60.0;

/// Counts what a real renderer would draw.
#[derive(Default)]
struct LogRenderer {
    drawn: usize,
    largest: f64,
}

impl<E: Entry> ChartRenderer<E> for LogRenderer {
    fn begin_frame(&mut self, _content_rect: Rect) {
        self.drawn = 0;
        self.largest = 0.0;
    }

    fn draw_entry(&mut self, _dataset_index: usize, _entry_index: usize, _entry: &E, _center: DVec2, extent: f64) {
        self.drawn += 1;
        self.largest = self.largest.max(extent);
    }

    fn draw_highlight(&mut self, highlight: Highlight, entry: &E, center: DVec2, _extent: f64) {
        tracing::info!(?highlight, x = entry.x(), y = entry.y(), ?center, "Highlight");
    }

    fn end_frame(&mut self) {
        tracing::info!(drawn = self.drawn, largest = self.largest, "Frame");
    }
}

struct Session {
    chart: ChartCore<BubbleEntry, BubbleShape>,
    renderer: LogRenderer,
}

impl Session {
    fn frame(&mut self) {
        new_frame();
        if self.chart.tick(FRAME) {
            self.chart.render(&mut self.renderer);
        }
    }

    fn frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frame();
        }
    }
}

fn main() {
    logging::init();
    #[cfg(feature = "profiling")]
    init_profiling(ProfilingBackend::PuffinHttp);
    #[cfg(not(feature = "profiling"))]
    init_profiling(ProfilingBackend::InProcess);

    let data = ChartData::from_datasets(vec![Dataset::with_entries(
        "population",
        (0..24)
            .map(|i| {
                let x = i as f64;
                BubbleEntry::new(x, (x * 0.4).sin() * 40.0 + 50.0, 1.0 + (i % 7) as f64)
            })
            .collect(),
    )]);

    let config = ChartConfig::default().with_pinch_zoom(true).with_bubble_size_factor(0.15);
    let mut session = Session {
        chart: ChartCore::new(config, BubbleShape).with_data(data),
        renderer: LogRenderer::default(),
    };
    session.chart.set_chart_size(Size::new(800.0, 480.0));
    session.frame();

    // A producer on another thread appends entries; they land on the next tick.
    let handle = session.chart.handle();
    let producer = thread::spawn(move || {
        for i in 24..32 {
            let x = i as f64;
            if let Err(err) = handle.add_entry(0, BubbleEntry::new(x, 50.0 + x, 4.0)) {
                tracing::warn!(%err, "Producer stopped");
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
    });
    if producer.join().is_err() {
        tracing::error!("Producer thread panicked");
    }
    session.frame();
    tracing::info!(entries = session.chart.data().entry_count(), "Streamed entries applied");

    // Pinch out about the middle of the chart.
    let center = session.chart.viewport().content_center();
    session.chart.pinch_began(center - DVec2::new(60.0, 0.0), center + DVec2::new(60.0, 0.0));
    for _ in 0..10 {
        session.chart.pinch_changed(1.1, center);
        session.frame();
    }
    session.chart.pinch_ended();
    tracing::info!(sx = session.chart.scale_x(), sy = session.chart.scale_y(), "Pinched");

    // Drag left, then fling.
    session.chart.pan_began(center, DVec2::ZERO);
    for step in 1..=10 {
        session.chart.pan_changed(center, DVec2::new(-12.0 * step as f64, 0.0));
        session.frame();
    }
    session.chart.pan_ended(DVec2::new(-900.0, 0.0), false);
    let mut fling_frames = 0;
    while !session.chart.is_idle() && fling_frames < 600 {
        session.frame();
        fling_frames += 1;
    }
    tracing::info!(fling_frames, lowest_x = session.chart.lowest_visible_x(), "Fling settled");

    // Tap the entry under the center, then animate back out.
    session.chart.tap(center);
    session.frame();

    session
        .chart
        .zoom_and_center_view_animated(1.0, 1.0, 15.5, 50.0, 0.75, Some(EasingFunction::CubicInOut));
    session.frames(50);
    tracing::info!(
        fully_zoomed_out = session.chart.is_fully_zoomed_out(),
        idle = session.chart.is_idle(),
        "Session finished"
    );
}
