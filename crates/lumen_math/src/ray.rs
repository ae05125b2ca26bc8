use crate::{MathResult, Vector};

/// A ray with an origin and a unit-length direction.
///
/// Rays are generic over the point type so the same tracer works in 3D and
/// 4D scenes. The direction is normalized on construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray<V> {
    pub origin: V,
    pub direction: V,
}

impl<V: Vector> Ray<V> {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Fails if `direction` has zero length.
    pub fn new(origin: V, direction: V) -> MathResult<Self> {
        Ok(Self {
            origin,
            direction: direction.try_unit()?,
        })
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> V {
        self.origin
    }

    /// Get the (unit) direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> V {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + direction * t
    #[inline]
    pub fn at(&self, t: f64) -> V {
        self.origin + self.direction * t
    }
}
