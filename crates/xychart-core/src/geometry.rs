//! Pixel-space geometry value types.

use crate::math::DVec2;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The shorter side.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// True when either side is zero or negative.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Insets from each edge of a rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Offsets {
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same inset on all four edges.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Offsets) -> Self {
        Self {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Axis-aligned rectangle in pixel space, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left)
    pub x: f64,
    /// Y position (top)
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Shrink the rect by per-edge offsets. Width and height never go negative.
    pub fn inset(&self, offsets: &Offsets) -> Self {
        Self {
            x: self.x + offsets.left,
            y: self.y + offsets.top,
            width: (self.width - offsets.left - offsets.right).max(0.0),
            height: (self.height - offsets.top - offsets.bottom).max(0.0),
        }
    }

    /// Check if a point is inside the rect (edges inclusive).
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_clamps_to_zero() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let inner = rect.inset(&Offsets::new(10.0, 5.0, 20.0, 5.0));
        assert_eq!(inner, Rect::new(10.0, 5.0, 70.0, 40.0));

        let collapsed = rect.inset(&Offsets::uniform(80.0));
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.height, 0.0);
        assert!(collapsed.is_empty());
    }

    #[test]
    fn test_contains_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(DVec2::new(10.0, 30.0)));
        assert!(!rect.contains(DVec2::new(9.9, 15.0)));
        assert_eq!(rect.center(), DVec2::new(20.0, 20.0));
    }

    #[test]
    fn test_offsets_max() {
        let a = Offsets::new(1.0, 5.0, 3.0, 0.0);
        let b = Offsets::uniform(2.0);
        assert_eq!(a.max(&b), Offsets::new(2.0, 5.0, 3.0, 2.0));
    }
}
