//! Fixed-step frame driver.

use xychart::{ChartCore, Entry, EntryShape};

/// Drives [`ChartCore::tick`] with a constant time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    step: f64,
    elapsed: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new(step: f64) -> Self {
        Self {
            step,
            elapsed: 0.0,
            frames: 0,
        }
    }

    pub fn sixty_fps() -> Self {
        Self::new(1.0 / 60.0)
    }

    /// Advance one frame. Returns whether the chart asked for a redraw.
    pub fn tick<E: Entry, S: EntryShape<E>>(&mut self, chart: &mut ChartCore<E, S>) -> bool {
        self.elapsed += self.step;
        self.frames += 1;
        chart.tick(self.step)
    }

    /// Advance for `seconds`, rounded up to whole frames. Returns the frame count.
    pub fn run_for<E: Entry, S: EntryShape<E>>(&mut self, chart: &mut ChartCore<E, S>, seconds: f64) -> u64 {
        // tolerate rounding in seconds / step, e.g. 1.0 / (1.0 / 60.0)
        let frames = (seconds / self.step - 1e-9).ceil().max(0.0) as u64;
        for _ in 0..frames {
            self.tick(chart);
        }
        frames
    }

    /// Tick until no job is live. Returns the frames taken, or `None` if
    /// jobs were still live after `max_frames`.
    pub fn run_until_idle<E: Entry, S: EntryShape<E>>(
        &mut self,
        chart: &mut ChartCore<E, S>,
        max_frames: u64,
    ) -> Option<u64> {
        for frame in 1..=max_frames {
            self.tick(chart);
            if chart.is_idle() {
                return Some(frame);
            }
        }
        None
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
