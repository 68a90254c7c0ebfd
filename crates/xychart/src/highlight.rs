//! Nearest-entry lookup for touch points.

use glam::DVec2;

use crate::data::{ChartData, Entry};
use crate::range::AxisRange;
use crate::transformer::CoordinateTransformer;
use crate::viewport::Viewport;

/// Reference to an entry by position. Never owns the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Highlight {
    pub dataset_index: usize,
    pub entry_index: usize,
}

impl Highlight {
    pub fn new(dataset_index: usize, entry_index: usize) -> Self {
        Self {
            dataset_index,
            entry_index,
        }
    }
}

/// Finds the entry closest to a query point across every dataset.
///
/// Distances are normalized per axis by the aggregate data range so axes
/// with different units weigh equally: `(dx / x_range)^2 + (dy / y_range)^2`.
/// A zero or non-finite range divides by 1.0, i.e. that axis uses the raw
/// distance. The scan is exhaustive and the first entry wins ties.
pub struct NearestEntryResolver<'a, E: Entry> {
    data: &'a ChartData<E>,
    x_scale: f64,
    y_scale: f64,
}

impl<'a, E: Entry> NearestEntryResolver<'a, E> {
    pub fn new(data: &'a ChartData<E>) -> Self {
        let range = data.range();
        Self {
            data,
            x_scale: normalizer(&range.x),
            y_scale: normalizer(&range.y),
        }
    }

    /// Normalized squared distance between a query and an entry.
    pub fn distance(&self, query: DVec2, entry: &E) -> f64 {
        let dx = (query.x - entry.x()).abs() / self.x_scale;
        let dy = (query.y - entry.y()).abs() / self.y_scale;
        dx * dx + dy * dy
    }

    /// Nearest entry to a value-space point.
    pub fn resolve_value(&self, query: DVec2) -> Option<Highlight> {
        puffin::profile_scope!("NearestEntryResolver::resolve_value");

        if !query.is_finite() {
            tracing::warn!(?query, "Ignoring non-finite highlight query");
            return None;
        }

        let mut best: Option<(Highlight, f64)> = None;
        for (dataset_index, dataset) in self.data.datasets().iter().enumerate() {
            for (entry_index, entry) in dataset.iter().enumerate() {
                if !entry.is_finite() {
                    continue;
                }
                let distance = self.distance(query, entry);
                if best.is_none_or(|(_, min)| distance < min) {
                    best = Some((Highlight::new(dataset_index, entry_index), distance));
                }
            }
        }
        best.map(|(highlight, _)| highlight)
    }

    /// Nearest entry to a pixel, inverse-mapped through `transformer`.
    pub fn resolve(&self, pixel: DVec2, transformer: &CoordinateTransformer, viewport: &Viewport) -> Option<Highlight> {
        self.resolve_value(transformer.pixel_to_point(pixel, viewport))
    }
}

fn normalizer(range: &AxisRange) -> f64 {
    let delta = range.delta().abs();
    if delta > 0.0 && delta.is_finite() { delta } else { 1.0 }
}
