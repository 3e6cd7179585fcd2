//! Floating-point abstraction trait for generic effect math.

use core::cmp::PartialOrd;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Trait abstracting the floating-point operations the effects need.
///
/// Implemented for `f32` and `f64` on top of `libm`, so the crate stays
/// usable without `std`.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + core::fmt::Debug
{
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Half (0.5).
    fn half() -> Self;
    /// Two (2.0).
    fn two() -> Self;
    /// Pi (~3.14159).
    fn pi() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Sine.
    fn sin(self) -> Self;
    /// Cosine.
    fn cos(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Minimum of two values.
    fn min(self, other: Self) -> Self;
    /// Maximum of two values.
    fn max(self, other: Self) -> Self;
    /// Convert from f32 (for constants and configuration).
    fn from_f32(v: f32) -> Self;
    /// Convert from f64 (for millisecond timestamps).
    fn from_f64(v: f64) -> Self;
    /// Narrow to f32, for handing values to a host surface.
    fn to_f32(self) -> f32;
    /// Arctangent of y/x, with correct quadrant.
    fn atan2(y: Self, x: Self) -> Self;
    /// Floating-point remainder with the sign of `self` (C `fmod`).
    fn fmod(self, rhs: Self) -> Self;
    /// `false` for NaN and the infinities.
    fn is_finite(self) -> bool;

    /// Clamp self to [min, max].
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Euclidean remainder, always in `[0, rhs)` for positive `rhs`.
    ///
    /// Rounding can land a tiny negative input exactly on `rhs`; that case
    /// folds to zero so the half-open range holds.
    fn rem_euclid(self, rhs: Self) -> Self {
        let mut r = self.fmod(rhs);
        if r < Self::zero() {
            r = r + rhs;
        }
        if r >= rhs {
            Self::zero()
        } else {
            r
        }
    }

    /// Radians to degrees.
    fn to_degrees(self) -> Self {
        self * Self::from_f32(180.0) / Self::pi()
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn pi() -> Self { core::f32::consts::PI }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn sin(self) -> Self { libm::sinf(self) }
    fn cos(self) -> Self { libm::cosf(self) }
    fn abs(self) -> Self { libm::fabsf(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f32(v: f32) -> Self { v }
    fn from_f64(v: f64) -> Self { v as f32 }
    fn to_f32(self) -> f32 { self }
    fn atan2(y: Self, x: Self) -> Self { libm::atan2f(y, x) }
    fn fmod(self, rhs: Self) -> Self { libm::fmodf(self, rhs) }
    fn is_finite(self) -> bool { f32::is_finite(self) }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn pi() -> Self { core::f64::consts::PI }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn sin(self) -> Self { libm::sin(self) }
    fn cos(self) -> Self { libm::cos(self) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f32(v: f32) -> Self { v as f64 }
    fn from_f64(v: f64) -> Self { v }
    fn to_f32(self) -> f32 { self as f32 }
    fn atan2(y: Self, x: Self) -> Self { libm::atan2(y, x) }
    fn fmod(self, rhs: Self) -> Self { libm::fmod(self, rhs) }
    fn is_finite(self) -> bool { f64::is_finite(self) }
}
