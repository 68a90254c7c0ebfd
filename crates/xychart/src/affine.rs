//! 2D affine transformations.
//!
//! Matrix layout follows the row-vector convention used by most 2D graphics
//! APIs: `x' = a*x + c*y + tx`, `y' = b*x + d*y + ty`.

use glam::{DAffine2, DMat2, DVec2};

/// An immutable 2x3 affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform2D {
    inner: DAffine2,
}

impl Default for AffineTransform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform2D {
    /// Identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        inner: DAffine2::IDENTITY,
    };

    /// Create from the six matrix components.
    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self {
            inner: DAffine2::from_mat2_translation(
                DMat2::from_cols(DVec2::new(a, b), DVec2::new(c, d)),
                DVec2::new(tx, ty),
            ),
        }
    }

    pub fn from_daffine2(inner: DAffine2) -> Self {
        Self { inner }
    }

    /// Create a translation transform.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Create a non-uniform scale transform.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Combine two transforms (self then other).
    pub fn then(&self, other: &AffineTransform2D) -> Self {
        Self {
            inner: other.inner * self.inner,
        }
    }

    /// Add a translation after this transform.
    pub fn then_translate(&self, tx: f64, ty: f64) -> Self {
        self.then(&Self::translation(tx, ty))
    }

    /// Add a scale after this transform.
    pub fn then_scale(&self, sx: f64, sy: f64) -> Self {
        self.then(&Self::scale(sx, sy))
    }

    /// Scale about a pivot point, applied after this transform.
    pub fn then_scale_about(&self, sx: f64, sy: f64, pivot: DVec2) -> Self {
        self.then_translate(-pivot.x, -pivot.y)
            .then_scale(sx, sy)
            .then_translate(pivot.x, pivot.y)
    }

    /// Transform a point.
    pub fn transform_point(&self, point: DVec2) -> DVec2 {
        self.inner.transform_point2(point)
    }

    /// Transform a vector (ignores translation).
    pub fn transform_vector(&self, vector: DVec2) -> DVec2 {
        self.inner.transform_vector2(vector)
    }

    pub fn a(&self) -> f64 {
        self.inner.matrix2.x_axis.x
    }

    pub fn b(&self) -> f64 {
        self.inner.matrix2.x_axis.y
    }

    pub fn c(&self) -> f64 {
        self.inner.matrix2.y_axis.x
    }

    pub fn d(&self) -> f64 {
        self.inner.matrix2.y_axis.y
    }

    pub fn tx(&self) -> f64 {
        self.inner.translation.x
    }

    pub fn ty(&self) -> f64 {
        self.inner.translation.y
    }

    /// Horizontal scale component (`a`).
    pub fn scale_x(&self) -> f64 {
        self.a()
    }

    /// Vertical scale component (`d`).
    pub fn scale_y(&self) -> f64 {
        self.d()
    }

    /// Same linear part, different translation.
    pub fn with_translation(&self, tx: f64, ty: f64) -> Self {
        Self::new(self.a(), self.b(), self.c(), self.d(), tx, ty)
    }

    /// Same translation and shear, different diagonal scale.
    pub fn with_scale(&self, sx: f64, sy: f64) -> Self {
        Self::new(sx, self.b(), self.c(), sy, self.tx(), self.ty())
    }

    pub fn determinant(&self) -> f64 {
        self.a() * self.d() - self.b() * self.c()
    }

    pub fn is_finite(&self) -> bool {
        self.inner.is_finite()
    }

    /// Get the inverse transform, if it exists.
    ///
    /// Computed in closed form; returns `None` for singular or non-finite matrices.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() || !self.is_finite() {
            return None;
        }

        let (a, b, c, d, tx, ty) = (self.a(), self.b(), self.c(), self.d(), self.tx(), self.ty());
        Some(Self::new(
            d / det,
            -b / det,
            -c / det,
            a / det,
            (c * ty - d * tx) / det,
            (b * tx - a * ty) / det,
        ))
    }

    pub fn as_daffine2(&self) -> &DAffine2 {
        &self.inner
    }
}

impl std::ops::Mul<DVec2> for AffineTransform2D {
    type Output = DVec2;

    fn mul(self, rhs: DVec2) -> DVec2 {
        self.transform_point(rhs)
    }
}
