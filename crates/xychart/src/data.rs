//! Entries, datasets and the chart data container.
//!
//! Entries are read through the [`Entry`] trait. Bubble sizes are an optional
//! capability exposed by [`Entry::size`], so consumers never need to know the
//! concrete entry type.

use glam::DVec2;

use crate::error::{ChartError, ChartResult, IndexKind};
use crate::highlight::Highlight;
use crate::range::{RangeAggregator, RangeSnapshot, VisibleWindow};

/// A single data point.
pub trait Entry: Clone + std::fmt::Debug {
    fn x(&self) -> f64;

    fn y(&self) -> f64;

    /// Magnitude for size-encoded entries, `None` when the entry has no size.
    fn size(&self) -> Option<f64> {
        None
    }

    fn position(&self) -> DVec2 {
        DVec2::new(self.x(), self.y())
    }

    fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite()
    }
}

/// Plain x/y entry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XyEntry {
    pub x: f64,
    pub y: f64,
}

impl XyEntry {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Entry for XyEntry {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl From<(f64, f64)> for XyEntry {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Entry carrying a magnitude, rendered as a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BubbleEntry {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl BubbleEntry {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self { x, y, size }
    }
}

impl Entry for BubbleEntry {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn size(&self) -> Option<f64> {
        Some(self.size)
    }
}

impl From<(f64, f64, f64)> for BubbleEntry {
    fn from((x, y, size): (f64, f64, f64)) -> Self {
        Self::new(x, y, size)
    }
}

/// An ordered sequence of entries. An entry's index is its position.
#[derive(Debug, Clone)]
pub struct Dataset<E: Entry> {
    label: String,
    entries: Vec<E>,
}

impl<E: Entry> Dataset<E> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entries(label: impl Into<String>, entries: Vec<E>) -> Self {
        Self {
            label: label.into(),
            entries,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry. Returns its index.
    pub fn push(&mut self, entry: E) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Insert keeping x non-decreasing, after any entries with an equal x.
    ///
    /// Assumes the dataset is already ordered by x. Returns the new index.
    pub fn insert_ordered(&mut self, entry: E) -> usize {
        let x = entry.x();
        let index = self.entries.partition_point(|e| e.x() <= x);
        self.entries.insert(index, entry);
        index
    }

    pub fn remove(&mut self, index: usize) -> ChartResult<E> {
        if index >= self.entries.len() {
            return Err(ChartError::OutOfBoundsIndex {
                kind: IndexKind::Entry,
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// All datasets of a chart plus their cached ranges.
#[derive(Debug, Clone)]
pub struct ChartData<E: Entry> {
    datasets: Vec<Dataset<E>>,
    ranges: RangeAggregator,
}

impl<E: Entry> Default for ChartData<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entry> ChartData<E> {
    pub fn new() -> Self {
        Self {
            datasets: Vec::new(),
            ranges: RangeAggregator::new(),
        }
    }

    /// Build from datasets and compute ranges over everything.
    pub fn from_datasets(datasets: Vec<Dataset<E>>) -> Self {
        let mut data = Self {
            datasets,
            ranges: RangeAggregator::new(),
        };
        data.calc_min_max(VisibleWindow::ALL);
        data
    }

    pub fn datasets(&self) -> &[Dataset<E>] {
        &self.datasets
    }

    pub fn dataset(&self, index: usize) -> Option<&Dataset<E>> {
        self.datasets.get(index)
    }

    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    /// Total number of entries across all datasets.
    pub fn entry_count(&self) -> usize {
        self.datasets.iter().map(Dataset::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Add a dataset, widening the cached ranges. Returns its index.
    pub fn add_dataset(&mut self, dataset: Dataset<E>) -> usize {
        self.ranges.push_dataset(dataset.entries());
        self.datasets.push(dataset);
        self.datasets.len() - 1
    }

    /// Remove a dataset. Cached ranges are recomputed.
    pub fn remove_dataset(&mut self, index: usize) -> ChartResult<Dataset<E>> {
        self.check_dataset(index)?;
        let removed = self.datasets.remove(index);
        self.recalculate();
        Ok(removed)
    }

    /// Append an entry to a dataset, widening the cached ranges.
    pub fn add_entry(&mut self, dataset_index: usize, entry: E) -> ChartResult<usize> {
        self.check_dataset(dataset_index)?;
        self.ranges.include(dataset_index, &entry);
        Ok(self.datasets[dataset_index].push(entry))
    }

    /// Insert an entry in x order, widening the cached ranges.
    pub fn add_entry_ordered(&mut self, dataset_index: usize, entry: E) -> ChartResult<usize> {
        self.check_dataset(dataset_index)?;
        self.ranges.include(dataset_index, &entry);
        Ok(self.datasets[dataset_index].insert_ordered(entry))
    }

    /// Remove an entry. Cached ranges are recomputed.
    pub fn remove_entry(&mut self, dataset_index: usize, entry_index: usize) -> ChartResult<E> {
        self.check_dataset(dataset_index)?;
        let removed = self.datasets[dataset_index].remove(entry_index)?;
        self.recalculate();
        Ok(removed)
    }

    /// Look up the entry a highlight refers to.
    pub fn entry_for_highlight(&self, highlight: &Highlight) -> Option<&E> {
        self.datasets
            .get(highlight.dataset_index)?
            .get(highlight.entry_index)
    }

    /// Recompute every range restricted to `window`.
    pub fn calc_min_max(&mut self, window: VisibleWindow) -> &RangeSnapshot {
        self.ranges.recompute(&self.datasets, window)
    }

    fn recalculate(&mut self) {
        let window = *self.ranges.window();
        self.ranges.recompute(&self.datasets, window);
    }

    /// Aggregate range over all datasets.
    pub fn range(&self) -> &RangeSnapshot {
        self.ranges.aggregate()
    }

    pub fn dataset_range(&self, index: usize) -> Option<&RangeSnapshot> {
        self.ranges.dataset(index)
    }

    pub fn ranges(&self) -> &RangeAggregator {
        &self.ranges
    }

    fn check_dataset(&self, index: usize) -> ChartResult<()> {
        if index < self.datasets.len() {
            Ok(())
        } else {
            Err(ChartError::OutOfBoundsIndex {
                kind: IndexKind::Dataset,
                index,
                len: self.datasets.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_capability() {
        assert_eq!(XyEntry::new(1.0, 2.0).size(), None);
        assert_eq!(BubbleEntry::new(1.0, 2.0, 3.0).size(), Some(3.0));
        assert!(!XyEntry::new(f64::NAN, 2.0).is_finite());
    }

    #[test]
    fn test_insert_ordered() {
        let mut set = Dataset::with_entries(
            "a",
            vec![XyEntry::new(1.0, 0.0), XyEntry::new(3.0, 0.0), XyEntry::new(3.0, 1.0)],
        );
        assert_eq!(set.insert_ordered(XyEntry::new(2.0, 0.0)), 1);
        assert_eq!(set.insert_ordered(XyEntry::new(3.0, 2.0)), 4);
        assert_eq!(set.insert_ordered(XyEntry::new(0.0, 0.0)), 0);
        let xs: Vec<f64> = set.iter().map(|e| e.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut set = Dataset::<XyEntry>::new("empty");
        assert_eq!(
            set.remove(0),
            Err(ChartError::OutOfBoundsIndex {
                kind: IndexKind::Entry,
                index: 0,
                len: 0
            })
        );
    }

    #[test]
    fn test_add_entry_widens_range() {
        let mut data = ChartData::from_datasets(vec![Dataset::with_entries(
            "a",
            vec![XyEntry::new(1.0, 1.0), XyEntry::new(2.0, 4.0)],
        )]);
        assert_eq!(data.range().x.max, 2.0);

        data.add_entry(0, XyEntry::new(10.0, -3.0)).unwrap();
        assert_eq!(data.range().x.max, 10.0);
        assert_eq!(data.range().y.min, -3.0);
        assert_eq!(data.entry_count(), 3);

        assert!(matches!(
            data.add_entry(3, XyEntry::new(0.0, 0.0)),
            Err(ChartError::OutOfBoundsIndex { kind: IndexKind::Dataset, .. })
        ));
    }

    #[test]
    fn test_remove_entry_recomputes_range() {
        let mut data = ChartData::from_datasets(vec![Dataset::with_entries(
            "a",
            vec![XyEntry::new(1.0, 1.0), XyEntry::new(9.0, 9.0)],
        )]);
        data.remove_entry(0, 1).unwrap();
        assert_eq!(data.range().x.max, 1.0);
        assert!(data.remove_entry(0, 5).is_err());
    }

    #[test]
    fn test_entry_for_highlight() {
        let mut data = ChartData::new();
        data.add_dataset(Dataset::with_entries("a", vec![BubbleEntry::new(1.0, 2.0, 3.0)]));
        let entry = data.entry_for_highlight(&Highlight::new(0, 0));
        assert_eq!(entry, Some(&BubbleEntry::new(1.0, 2.0, 3.0)));
        assert_eq!(data.entry_for_highlight(&Highlight::new(0, 1)), None);
        assert_eq!(data.entry_for_highlight(&Highlight::new(2, 0)), None);
    }
}
