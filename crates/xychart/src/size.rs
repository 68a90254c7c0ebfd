//! Bubble size normalization.

use xychart_core::geometry::Size;

/// Map a raw magnitude into a rendering length.
///
/// The value range is widened by 1.5x its own width below `min_size`, so the
/// smallest entry still renders at 60% of `reference` rather than near zero:
///
/// `factor = |(size - min + 1.5 * delta) / (2.5 * delta)|`, `delta = max - min`.
///
/// `max_size == 0` gives a factor of 1. So does `max_size == min_size`,
/// where the formula would divide by zero.
pub fn normalize(entry_size: f64, min_size: f64, max_size: f64, reference: f64) -> f64 {
    let delta = max_size - min_size;
    let extend = delta * 1.5;
    let denominator = delta + extend;

    let factor = if max_size == 0.0 || denominator == 0.0 {
        1.0
    } else {
        ((entry_size - min_size + extend) / denominator).abs()
    };
    reference * factor
}

/// Reference length for bubbles: the shorter content side times `factor`.
pub fn reference_size(content: Size, factor: f64) -> f64 {
    content.width.abs().min(content.height.abs()) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_is_not_zero() {
        let r = 100.0;
        let result = normalize(2.0, 2.0, 12.0, r);
        let delta = 10.0;
        let extend = delta * 1.5;
        assert!((result - r * extend / (delta + extend)).abs() < 1e-9);
        assert!((result - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_maximum_is_reference() {
        assert!((normalize(12.0, 2.0, 12.0, 80.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_zero_sizes() {
        for x in [-3.0, 0.0, 1.0, 1e9] {
            assert_eq!(normalize(x, 0.0, 0.0, 42.0), 42.0);
        }
    }

    #[test]
    fn test_equal_nonzero_sizes() {
        assert_eq!(normalize(5.0, 5.0, 5.0, 42.0), 42.0);
    }

    #[test]
    fn test_reference_size() {
        assert_eq!(reference_size(Size::new(300.0, 200.0), 0.25), 50.0);
    }
}
