//! Pinhole camera for primary ray generation.

use lumen_math::{MathResult, Ray, Vector};
use serde::{Deserialize, Serialize};

/// Camera at the world origin looking down -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov: 30.0,
        }
    }
}

impl Camera {
    pub fn new(width: u32, height: u32, fov: f64) -> Self {
        Self { width, height, fov }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Generate the ray through the center of pixel (i, j).
    ///
    /// `j` counts rows from the bottom of the image, so `j = 0` looks down
    /// the negative y side of the view.
    pub fn primary_ray<V: Vector>(&self, i: u32, j: u32) -> MathResult<Ray<V>> {
        let angle = (self.fov.to_radians() / 2.0).tan();

        let x = (2.0 * ((i as f64 + 0.5) / self.width as f64) - 1.0) * angle * self.aspect_ratio();
        let y = (2.0 * ((j as f64 + 0.5) / self.height as f64) - 1.0) * angle;

        Ray::new(V::ZERO, V::from_xyz(x, y, -1.0))
    }
}
