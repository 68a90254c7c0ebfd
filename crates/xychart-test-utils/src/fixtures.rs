//! Deterministic datasets for tests and benchmarks.

use xychart::{BubbleEntry, ChartData, Dataset, XyEntry};

/// `d0 = [(0, 0), (10, 10)]`, `d1 = [(5, 5)]`.
pub fn two_datasets() -> ChartData<XyEntry> {
    ChartData::from_datasets(vec![
        Dataset::with_entries("d0", vec![XyEntry::new(0.0, 0.0), XyEntry::new(10.0, 10.0)]),
        Dataset::with_entries("d1", vec![XyEntry::new(5.0, 5.0)]),
    ])
}

/// `y = x^2` sampled at `x = 0..count`.
pub fn parabola(count: usize) -> ChartData<XyEntry> {
    ChartData::from_datasets(vec![Dataset::with_entries(
        "parabola",
        (0..count)
            .map(|i| {
                let x = i as f64;
                XyEntry::new(x, x * x)
            })
            .collect(),
    )])
}

/// Three bubbles with sizes 2, 7 and 12.
pub fn bubbles() -> ChartData<BubbleEntry> {
    ChartData::from_datasets(vec![Dataset::with_entries(
        "bubbles",
        vec![
            BubbleEntry::new(1.0, 1.0, 2.0),
            BubbleEntry::new(2.0, 3.0, 7.0),
            BubbleEntry::new(3.0, 2.0, 12.0),
        ],
    )])
}

/// `datasets` datasets of `per_dataset` entries scattered over `[0, 1000)^2`.
///
/// Uses a fixed linear congruential sequence so runs are repeatable.
pub fn scattered(datasets: usize, per_dataset: usize) -> ChartData<XyEntry> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (state >> 11) as f64 / (1u64 << 53) as f64 * 1000.0
    };

    ChartData::from_datasets(
        (0..datasets)
            .map(|d| {
                let entries = (0..per_dataset).map(|_| XyEntry::new(next(), next())).collect();
                Dataset::with_entries(format!("set-{d}"), entries)
            })
            .collect(),
    )
}
