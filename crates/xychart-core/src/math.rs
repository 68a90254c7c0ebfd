//! Double precision math types from `glam`.
//!
//! Chart values are `f64`; pixel coordinates share the same precision so the
//! value/pixel round trip stays exact to within floating epsilon.

pub use glam::{DAffine2, DMat2, DVec2};

/// Approximate equality with an absolute tolerance.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Component-wise [`approx_eq`].
#[inline]
pub fn approx_eq_vec(a: DVec2, b: DVec2, epsilon: f64) -> bool {
    approx_eq(a.x, b.x, epsilon) && approx_eq(a.y, b.y, epsilon)
}
