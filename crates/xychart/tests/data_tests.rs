//! Range aggregation, nearest-entry lookup and bubble sizing.

use xychart::{
    AxisRange, BubbleEntry, ChartConfig, ChartCore, ChartData, DVec2, Dataset, Highlight, NearestEntryResolver,
    PointShape, RangeAggregator, RangeSnapshot, Size, VisibleWindow, XyEntry, compute_aggregate_range,
    compute_dataset_range, size,
};
use xychart_core::math::approx_eq;
use xychart_test_utils::fixtures;

fn xy(points: &[(f64, f64)]) -> Vec<XyEntry> {
    points.iter().copied().map(XyEntry::from).collect()
}

#[test]
fn test_empty_dataset_range_is_zero() {
    let snapshot = compute_dataset_range::<XyEntry>(&[], &VisibleWindow::ALL);
    assert_eq!(snapshot, RangeSnapshot::EMPTY);
    assert_eq!(snapshot.x, AxisRange::ZERO);
    assert_eq!(snapshot.y, AxisRange::ZERO);
    assert!(snapshot.is_empty());
}

#[test]
fn test_single_entry_range() {
    let snapshot = compute_dataset_range(&xy(&[(5.0, 5.0)]), &VisibleWindow::ALL);
    assert_eq!(snapshot.x, AxisRange::new(5.0, 5.0));
    assert_eq!(snapshot.y, AxisRange::new(5.0, 5.0));
    assert_eq!(snapshot.count, 1);
}

#[test]
fn test_window_is_half_open() {
    let entries = xy(&[(0.0, 5.0), (10.0, 5.0), (5.0, 0.0), (5.0, 10.0), (7.0, 7.0)]);
    let window = VisibleWindow::new(0.0, 10.0, 0.0, 10.0);
    let snapshot = compute_dataset_range(&entries, &window);

    // lower bounds exclusive, upper bounds inclusive
    assert_eq!(snapshot.count, 3);
    assert_eq!(snapshot.x, AxisRange::new(5.0, 10.0));
    assert_eq!(snapshot.y, AxisRange::new(5.0, 10.0));
}

#[test]
fn test_infinite_window_bounds_are_finite() {
    let window = VisibleWindow::new(f64::NEG_INFINITY, f64::INFINITY, f64::NAN, f64::INFINITY);
    assert_eq!(window, VisibleWindow::ALL);
    let snapshot = compute_dataset_range(&xy(&[(-1e300, 1e300)]), &window);
    assert_eq!(snapshot.count, 1);
}

#[test]
fn test_non_finite_entries_are_skipped() {
    let entries = xy(&[(1.0, 2.0), (f64::NAN, 100.0), (3.0, f64::INFINITY), (-4.0, 0.5)]);
    let snapshot = compute_dataset_range(&entries, &VisibleWindow::ALL);
    assert_eq!(snapshot.count, 2);
    assert_eq!(snapshot.x, AxisRange::new(-4.0, 1.0));
    assert_eq!(snapshot.y, AxisRange::new(0.5, 2.0));
}

#[test]
fn test_size_range_follows_window() {
    let entries = vec![
        BubbleEntry::new(1.0, 1.0, 4.0),
        BubbleEntry::new(2.0, 2.0, 9.0),
        BubbleEntry::new(3.0, 3.0, 1.0),
    ];
    let snapshot = compute_dataset_range(&entries, &VisibleWindow::new(0.0, 2.0, 0.0, 2.0));
    assert_eq!(snapshot.size, AxisRange::new(4.0, 9.0));
    assert_eq!(snapshot.sized_count, 2);
}

#[test]
fn test_aggregate_ignores_empty_datasets() {
    let a = compute_dataset_range(&xy(&[(1.0, 10.0), (2.0, 20.0)]), &VisibleWindow::ALL);
    let b = compute_dataset_range(&xy(&[(-5.0, 15.0)]), &VisibleWindow::ALL);
    let empty = RangeSnapshot::EMPTY;

    let aggregate = compute_aggregate_range([&a, &empty, &b]);
    assert_eq!(aggregate.x, AxisRange::new(-5.0, 2.0));
    assert_eq!(aggregate.y, AxisRange::new(10.0, 20.0));
    assert_eq!(aggregate.count, 3);

    assert_eq!(compute_aggregate_range([&empty, &empty]), RangeSnapshot::EMPTY);
}

#[test]
fn test_aggregator_tracks_per_dataset_snapshots() {
    let data = fixtures::two_datasets();
    let mut aggregator = RangeAggregator::new();
    let aggregate = *aggregator.recompute(data.datasets(), VisibleWindow::new(-1.0, 6.0, -1.0, 6.0));

    assert_eq!(aggregate.x, AxisRange::new(0.0, 5.0));
    assert_eq!(aggregator.dataset(0).map(|s| s.count), Some(1));
    assert_eq!(aggregator.dataset(1).map(|s| s.y), Some(AxisRange::new(5.0, 5.0)));
    assert_eq!(aggregator.dataset(2), None);
}

#[test]
fn test_resolver_picks_closest_across_datasets() {
    let data = fixtures::two_datasets();
    let resolver = NearestEntryResolver::new(&data);

    assert_eq!(resolver.resolve_value(DVec2::new(5.1, 5.1)), Some(Highlight::new(1, 0)));
    assert_eq!(resolver.resolve_value(DVec2::new(9.0, 8.0)), Some(Highlight::new(0, 1)));
    assert_eq!(resolver.resolve_value(DVec2::new(-3.0, 1.0)), Some(Highlight::new(0, 0)));
}

#[test]
fn test_resolver_through_pixels() {
    let mut chart = ChartCore::new(ChartConfig::default(), PointShape::default()).with_data(fixtures::two_datasets());
    chart.set_chart_size(Size::new(320.0, 240.0));

    let pixel = chart.pixel_for_value(5.1, 5.1);
    assert_eq!(chart.highlight_by_touch_point(pixel), Some(Highlight::new(1, 0)));
    assert_eq!(chart.entry_by_touch_point(pixel), Some(&XyEntry::new(5.0, 5.0)));
    assert_eq!(chart.dataset_by_touch_point(pixel).map(|d| d.label()), Some("d1"));
}

#[test]
fn test_resolver_ties_go_to_first_scanned() {
    let data = ChartData::from_datasets(vec![
        Dataset::with_entries("a", xy(&[(0.0, 0.0), (2.0, 0.0)])),
        Dataset::with_entries("b", xy(&[(1.0, 0.0)])),
        Dataset::with_entries("c", xy(&[(1.0, 0.0)])),
    ]);
    let resolver = NearestEntryResolver::new(&data);

    // equidistant from both entries of "a"
    assert_eq!(resolver.resolve_value(DVec2::new(1.0, 5.0)).map(|h| h.dataset_index), Some(1));
    // co-located duplicates in "b" and "c"
    assert_eq!(resolver.resolve_value(DVec2::new(1.0, 0.0)), Some(Highlight::new(1, 0)));
    // exactly between the two entries of "a" along x, on a degenerate y range
    let single = ChartData::from_datasets(vec![Dataset::with_entries("a", xy(&[(0.0, 0.0), (2.0, 0.0)]))]);
    assert_eq!(
        NearestEntryResolver::new(&single).resolve_value(DVec2::new(1.0, 0.0)),
        Some(Highlight::new(0, 0))
    );
}

#[test]
fn test_resolver_degenerate_ranges_do_not_produce_nan() {
    let data = ChartData::from_datasets(vec![Dataset::with_entries("flat", xy(&[(3.0, 0.0), (3.0, 10.0)]))]);
    let resolver = NearestEntryResolver::new(&data);
    let distance = resolver.distance(DVec2::new(4.0, 4.0), &XyEntry::new(3.0, 0.0));
    assert!(distance.is_finite());
    assert_eq!(resolver.resolve_value(DVec2::new(3.0, 4.0)), Some(Highlight::new(0, 0)));

    let point = ChartData::from_datasets(vec![Dataset::with_entries("one", xy(&[(5.0, 5.0)]))]);
    assert_eq!(
        NearestEntryResolver::new(&point).resolve_value(DVec2::new(100.0, -100.0)),
        Some(Highlight::new(0, 0))
    );
}

#[test]
fn test_resolver_without_entries() {
    let empty = ChartData::<XyEntry>::new();
    assert_eq!(NearestEntryResolver::new(&empty).resolve_value(DVec2::ZERO), None);

    let hollow = ChartData::from_datasets(vec![Dataset::<XyEntry>::new("empty")]);
    assert_eq!(NearestEntryResolver::new(&hollow).resolve_value(DVec2::ZERO), None);
    assert_eq!(NearestEntryResolver::new(&fixtures::two_datasets()).resolve_value(DVec2::NAN), None);
}

#[test]
fn test_normalize_minimum_is_sixty_percent() {
    let reference = 80.0;
    let (min, max) = (2.0, 12.0);
    let delta = max - min;
    let extend = delta * 1.5;

    let smallest = size::normalize(min, min, max, reference);
    assert!(approx_eq(smallest, reference * extend / (delta + extend), 1e-12));
    assert!(approx_eq(smallest, 48.0, 1e-12));
    assert!(approx_eq(size::normalize(max, min, max, reference), reference, 1e-12));
}

#[test]
fn test_normalize_all_equal_sizes() {
    for value in [0.0, 1.0, -3.0, 250.0] {
        assert_eq!(size::normalize(value, 0.0, 0.0, 40.0), 40.0);
    }
    assert_eq!(size::normalize(7.0, 7.0, 7.0, 40.0), 40.0);
}

#[test]
fn test_reference_size_uses_shorter_side() {
    assert_eq!(size::reference_size(Size::new(400.0, 200.0), 0.2), 40.0);
    assert_eq!(size::reference_size(Size::new(90.0, 300.0), 0.5), 45.0);
}
