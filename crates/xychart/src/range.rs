//! Windowed min/max statistics over datasets.
//!
//! An entry qualifies when `min_x < x <= max_x` and `min_y < y <= max_y`.
//! The lower bound is exclusive: an entry sitting exactly on the window's
//! minimum is not counted.

use crate::data::{Dataset, Entry};

/// A closed `[min, max]` interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const ZERO: Self = Self { min: 0.0, max: 0.0 };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `max - min`.
    pub fn delta(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Widen a zero-width range by 1.0 on each side.
    pub fn padded(&self) -> Self {
        if self.is_degenerate() {
            Self::new(self.min - 1.0, self.max + 1.0)
        } else {
            *self
        }
    }

    pub fn center(&self) -> f64 {
        self.min + self.delta() * 0.5
    }

    fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn merge(&mut self, other: &AxisRange) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

/// The visible data-space rectangle ranges are restricted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleWindow {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for VisibleWindow {
    fn default() -> Self {
        Self::ALL
    }
}

impl VisibleWindow {
    /// Window that admits every finite entry.
    pub const ALL: Self = Self {
        min_x: -f64::MAX,
        max_x: f64::MAX,
        min_y: -f64::MAX,
        max_y: f64::MAX,
    };

    /// Infinite bounds become `-f64::MAX`/`f64::MAX`; NaN widens to the same.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x: finite_bound(min_x, -f64::MAX),
            max_x: finite_bound(max_x, f64::MAX),
            min_y: finite_bound(min_y, -f64::MAX),
            max_y: finite_bound(max_y, f64::MAX),
        }
    }

    /// Half-open inclusion test. NaN coordinates never qualify.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.min_x < x && x <= self.max_x && self.min_y < y && y <= self.max_y
    }
}

fn finite_bound(value: f64, nan_fallback: f64) -> f64 {
    if value.is_nan() {
        nan_fallback
    } else {
        value.clamp(-f64::MAX, f64::MAX)
    }
}

/// x, y and size ranges of the entries that passed the window.
///
/// An empty snapshot has all-zero ranges; check [`RangeSnapshot::is_empty`]
/// rather than reading the zeros as data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeSnapshot {
    pub x: AxisRange,
    pub y: AxisRange,
    pub size: AxisRange,
    /// Entries that passed the window.
    pub count: usize,
    /// Of those, entries with a finite size.
    pub sized_count: usize,
}

impl RangeSnapshot {
    pub const EMPTY: Self = Self {
        x: AxisRange::ZERO,
        y: AxisRange::ZERO,
        size: AxisRange::ZERO,
        count: 0,
        sized_count: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn include<E: Entry>(&mut self, entry: &E) {
        let (x, y) = (entry.x(), entry.y());
        if self.count == 0 {
            self.x = AxisRange::new(x, x);
            self.y = AxisRange::new(y, y);
        } else {
            self.x.include(x);
            self.y.include(y);
        }
        self.count += 1;

        if let Some(size) = entry.size().filter(|s| s.is_finite()) {
            if self.sized_count == 0 {
                self.size = AxisRange::new(size, size);
            } else {
                self.size.include(size);
            }
            self.sized_count += 1;
        }
    }

    fn merge(&mut self, other: &RangeSnapshot) {
        if other.count > 0 {
            if self.count == 0 {
                self.x = other.x;
                self.y = other.y;
            } else {
                self.x.merge(&other.x);
                self.y.merge(&other.y);
            }
            self.count += other.count;
        }
        if other.sized_count > 0 {
            if self.sized_count == 0 {
                self.size = other.size;
            } else {
                self.size.merge(&other.size);
            }
            self.sized_count += other.sized_count;
        }
    }
}

/// Range of the entries of one dataset that pass `window`.
///
/// Entries with a non-finite x or y are skipped.
pub fn compute_dataset_range<E: Entry>(entries: &[E], window: &VisibleWindow) -> RangeSnapshot {
    let mut snapshot = RangeSnapshot::EMPTY;
    for entry in entries {
        if entry.is_finite() && window.contains(entry.x(), entry.y()) {
            snapshot.include(entry);
        }
    }
    snapshot
}

/// Min-of-mins and max-of-maxes over dataset snapshots.
///
/// Empty snapshots do not contribute, so a dataset with nothing visible never
/// drags the aggregate toward zero.
pub fn compute_aggregate_range<'a>(snapshots: impl IntoIterator<Item = &'a RangeSnapshot>) -> RangeSnapshot {
    let mut aggregate = RangeSnapshot::EMPTY;
    for snapshot in snapshots {
        aggregate.merge(snapshot);
    }
    aggregate
}

/// Per-dataset and aggregate snapshots for the last window.
#[derive(Debug, Clone, Default)]
pub struct RangeAggregator {
    window: VisibleWindow,
    datasets: Vec<RangeSnapshot>,
    aggregate: RangeSnapshot,
}

impl RangeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute every snapshot for `window`.
    pub fn recompute<E: Entry>(&mut self, datasets: &[Dataset<E>], window: VisibleWindow) -> &RangeSnapshot {
        puffin::profile_scope!("RangeAggregator::recompute");

        self.window = window;
        self.datasets.clear();
        self.datasets
            .extend(datasets.iter().map(|set| compute_dataset_range(set.entries(), &window)));
        self.aggregate = compute_aggregate_range(&self.datasets);

        tracing::trace!(
            x_min = self.aggregate.x.min,
            x_max = self.aggregate.x.max,
            y_min = self.aggregate.y.min,
            y_max = self.aggregate.y.max,
            count = self.aggregate.count,
            "Ranges recomputed"
        );
        &self.aggregate
    }

    /// Track a newly added dataset under the current window.
    pub fn push_dataset<E: Entry>(&mut self, entries: &[E]) {
        let snapshot = compute_dataset_range(entries, &self.window);
        self.aggregate.merge(&snapshot);
        self.datasets.push(snapshot);
    }

    /// Widen the snapshots of `dataset_index` with a newly added entry.
    pub fn include<E: Entry>(&mut self, dataset_index: usize, entry: &E) {
        if !entry.is_finite() || !self.window.contains(entry.x(), entry.y()) {
            return;
        }
        if let Some(snapshot) = self.datasets.get_mut(dataset_index) {
            snapshot.include(entry);
            self.aggregate.include(entry);
        }
    }

    pub fn window(&self) -> &VisibleWindow {
        &self.window
    }

    pub fn aggregate(&self) -> &RangeSnapshot {
        &self.aggregate
    }

    pub fn dataset(&self, index: usize) -> Option<&RangeSnapshot> {
        self.datasets.get(index)
    }
}

/// Detects changes of the visible window between auto-scale passes.
#[derive(Debug, Clone, Default)]
pub struct AutoScaleTracker {
    last: Option<VisibleWindow>,
}

impl AutoScaleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `window` and return `true` if any of its four bounds changed.
    pub fn observe(&mut self, window: VisibleWindow) -> bool {
        let changed = self.last != Some(window);
        self.last = Some(window);
        changed
    }

    /// Forget the last window so the next observation reports a change.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
