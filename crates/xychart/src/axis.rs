//! Axis configuration and resolved axis ranges.

use crate::error::{ChartError, ChartResult, ensure_finite};
use crate::range::AxisRange;

/// User-facing axis settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisConfig {
    /// Fixed minimum; `None` follows the data.
    pub custom_min: Option<f64>,
    /// Fixed maximum; `None` follows the data.
    pub custom_max: Option<f64>,
    /// Fraction of the range added above the data maximum.
    pub space_top: f64,
    /// Fraction of the range added below the data minimum.
    pub space_bottom: f64,
    /// Draw from top to bottom instead of bottom to top.
    pub inverted: bool,
    pub enabled: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            custom_min: None,
            custom_max: None,
            space_top: 0.1,
            space_bottom: 0.1,
            inverted: false,
            enabled: true,
        }
    }
}

impl AxisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the axis minimum.
    pub fn with_custom_min(mut self, min: f64) -> Self {
        self.custom_min = Some(min);
        self
    }

    /// Fix the axis maximum.
    pub fn with_custom_max(mut self, max: f64) -> Self {
        self.custom_max = Some(max);
        self
    }

    /// Set the space fractions added above and below the data.
    pub fn with_space(mut self, top: f64, bottom: f64) -> Self {
        self.space_top = top;
        self.space_bottom = bottom;
        self
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// An axis and the range it resolved to on the last [`Axis::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    config: AxisConfig,
    minimum: f64,
    maximum: f64,
}

impl Default for Axis {
    fn default() -> Self {
        Self::new(AxisConfig::default())
    }
}

impl Axis {
    pub fn new(config: AxisConfig) -> Self {
        Self {
            config,
            minimum: 0.0,
            maximum: 0.0,
        }
    }

    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AxisConfig {
        &mut self.config
    }

    /// Fix both ends of the axis.
    pub fn set_custom_range(&mut self, min: f64, max: f64) -> ChartResult<()> {
        let min = ensure_finite(min, "axis minimum")?;
        let max = ensure_finite(max, "axis maximum")?;
        if min >= max {
            return Err(ChartError::DegenerateRange { min, max });
        }
        self.config.custom_min = Some(min);
        self.config.custom_max = Some(max);
        Ok(())
    }

    /// Follow the data again on both ends.
    pub fn reset_custom_range(&mut self) {
        self.config.custom_min = None;
        self.config.custom_max = None;
    }

    /// Resolve the axis range from the observed data range.
    ///
    /// Custom bounds win over the data. A degenerate range is padded by one
    /// unit each way before the space fractions are applied.
    pub fn resolve(&mut self, observed: AxisRange) -> AxisRange {
        let min = self.config.custom_min.unwrap_or(observed.min);
        let max = self.config.custom_max.unwrap_or(observed.max);
        let padded = AxisRange::new(min, max).padded();
        let range = padded.delta().abs();

        self.minimum = self
            .config
            .custom_min
            .unwrap_or(padded.min - range * self.config.space_bottom);
        self.maximum = self
            .config
            .custom_max
            .unwrap_or(padded.max + range * self.config.space_top);
        self.range()
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn range(&self) -> AxisRange {
        AxisRange::new(self.minimum, self.maximum)
    }

    /// Width of the resolved range.
    pub fn delta(&self) -> f64 {
        (self.maximum - self.minimum).abs()
    }

    pub fn is_inverted(&self) -> bool {
        self.config.inverted
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_applies_space_fractions() {
        let mut axis = Axis::default();
        let range = axis.resolve(AxisRange::new(0.0, 10.0));
        assert!((range.min + 1.0).abs() < 1e-12);
        assert!((range.max - 11.0).abs() < 1e-12);
        assert!((axis.delta() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_pads_degenerate_range() {
        let mut axis = Axis::new(AxisConfig::new().with_space(0.0, 0.0));
        let range = axis.resolve(AxisRange::new(5.0, 5.0));
        assert_eq!(range, AxisRange::new(4.0, 6.0));
    }

    #[test]
    fn test_custom_bounds_win() {
        let mut axis = Axis::new(AxisConfig::new().with_custom_min(0.0));
        let range = axis.resolve(AxisRange::new(3.0, 13.0));
        assert_eq!(range.min, 0.0);
        // space fraction of the range between the custom min and the data max
        assert!((range.max - 14.3).abs() < 1e-9);
    }

    #[test]
    fn test_set_custom_range_rejects_degenerate() {
        let mut axis = Axis::default();
        assert_eq!(
            axis.set_custom_range(2.0, 2.0),
            Err(ChartError::DegenerateRange { min: 2.0, max: 2.0 })
        );
        assert!(axis.set_custom_range(f64::NAN, 2.0).is_err());
        assert!(axis.set_custom_range(-1.0, 2.0).is_ok());
        assert_eq!(axis.resolve(AxisRange::new(100.0, 200.0)), AxisRange::new(-1.0, 2.0));

        axis.reset_custom_range();
        assert_eq!(axis.config().custom_min, None);
    }
}
