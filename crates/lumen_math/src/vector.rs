//! Fixed-dimension vector capability shared by the 3D and 4D scene types.
//!
//! The tracer only needs dot products, arithmetic and normalization, so it is
//! written against this trait instead of a concrete glam type. Cross products
//! stay on `DVec3` where true 3D geometry is required.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use glam::{DVec3, DVec4};
use thiserror::Error;

/// Errors raised by degenerate geometry.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("Cannot normalize a vector of length {0}")]
    ZeroLength(f64),
}

/// Result type for geometric operations.
pub type MathResult<T> = Result<T, MathError>;

/// A point or direction in N-dimensional space.
pub trait Vector:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Neg<Output = Self>
{
    /// The origin.
    const ZERO: Self;

    /// Number of components.
    const DIM: usize;

    /// Build a vector from the first three components; the rest are zero.
    fn from_xyz(x: f64, y: f64, z: f64) -> Self;

    /// Dot product.
    fn dot(self, other: Self) -> f64;

    /// Euclidean length.
    #[inline]
    fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Return the unit vector pointing the same way.
    ///
    /// Fails for zero-length (or non-finite) input, since no direction exists.
    fn try_unit(self) -> MathResult<Self> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Ok(self * (1.0 / len))
        } else {
            Err(MathError::ZeroLength(len))
        }
    }
}

impl Vector for DVec3 {
    const ZERO: Self = DVec3::ZERO;
    const DIM: usize = 3;

    #[inline]
    fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        DVec3::new(x, y, z)
    }

    #[inline]
    fn dot(self, other: Self) -> f64 {
        DVec3::dot(self, other)
    }
}

impl Vector for DVec4 {
    const ZERO: Self = DVec4::ZERO;
    const DIM: usize = 4;

    #[inline]
    fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        DVec4::new(x, y, z, 0.0)
    }

    #[inline]
    fn dot(self, other: Self) -> f64 {
        DVec4::dot(self, other)
    }
}
