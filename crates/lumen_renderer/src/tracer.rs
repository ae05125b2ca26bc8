//! Recursive ray tracer.
//!
//! Shades the nearest sphere along a ray with either:
//! - Fresnel-weighted reflection and refraction for reflective or
//!   transparent spheres, recursing up to a fixed depth
//! - Lambertian lighting from every light sphere, with binary shadow rays

use std::cell::Cell;

use lumen_math::{DVec3, Ray, Vector};
use serde::{Deserialize, Serialize};

use crate::renderer::RenderResult;
use crate::sphere::{Color, Sphere};

/// Default recursion bound for reflection and refraction rays.
pub const MAX_RAY_DEPTH: u32 = 5;

/// Default offset along the normal for secondary ray origins.
pub const BIAS: f64 = 1e-4;

/// Default color for rays that escape the scene.
pub const BACKGROUND: Color = DVec3::new(0.0, 0.2, 0.2);

/// Default index of refraction for transparent spheres.
pub const INDEX_OF_REFRACTION: f64 = 1.1;

/// Tracer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Maximum reflection/refraction recursion depth
    pub max_depth: u32,
    /// Offset applied to secondary ray origins to avoid self-intersection
    pub bias: f64,
    /// Color returned when a ray doesn't hit anything
    pub background: Color,
    /// Index of refraction used for every transparent sphere
    pub ior: f64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_RAY_DEPTH,
            bias: BIAS,
            background: BACKGROUND,
            ior: INDEX_OF_REFRACTION,
        }
    }
}

impl TraceConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ior(mut self, ior: f64) -> Self {
        self.ior = ior;
        self
    }
}

/// Blend from `a` to `b` by `t`.
#[inline]
fn mix(a: f64, b: f64, t: f64) -> f64 {
    b * t + a * (1.0 - t)
}

/// Evaluates the color seen along rays through a sphere scene.
///
/// Counts every traced ray (primary and secondary) for render statistics.
#[derive(Debug, Default)]
pub struct Tracer {
    config: TraceConfig,
    rays_traced: Cell<u64>,
}

impl Tracer {
    pub fn new(config: TraceConfig) -> Self {
        Self {
            config,
            rays_traced: Cell::new(0),
        }
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Number of calls to [`Tracer::trace`] so far, recursive ones included.
    pub fn rays_traced(&self) -> u64 {
        self.rays_traced.get()
    }

    /// Compute the color seen by a ray.
    ///
    /// `depth` is the recursion level of this ray; primary rays start at 0.
    /// Fails only on degenerate geometry, e.g. a hit exactly at a
    /// sphere's center.
    pub fn trace<V: Vector>(
        &self,
        ray: &Ray<V>,
        scene: &[Sphere<V>],
        depth: u32,
    ) -> RenderResult<Color> {
        self.rays_traced.set(self.rays_traced.get() + 1);

        let Some((index, t)) = nearest_hit(ray, scene) else {
            return Ok(self.config.background);
        };
        let sphere = &scene[index];

        let phit = ray.at(t);
        let mut nhit = (phit - sphere.center()).try_unit()?;

        // Leaving the sphere: shade against the inner side
        let mut inside = false;
        if ray.direction().dot(nhit) > 0.0 {
            nhit = -nhit;
            inside = true;
        }

        let surface_color = if sphere.is_dielectric() && depth < self.config.max_depth {
            self.shade_dielectric(ray, scene, depth, sphere, phit, nhit, inside)?
        } else {
            self.shade_diffuse(scene, index, phit, nhit)?
        };

        Ok(surface_color + sphere.emission())
    }

    #[allow(clippy::too_many_arguments)]
    fn shade_dielectric<V: Vector>(
        &self,
        ray: &Ray<V>,
        scene: &[Sphere<V>],
        depth: u32,
        sphere: &Sphere<V>,
        phit: V,
        nhit: V,
        inside: bool,
    ) -> RenderResult<Color> {
        let direction = ray.direction();
        let bias = self.config.bias;

        let facing_ratio = -direction.dot(nhit);
        let fresnel = mix((1.0 - facing_ratio).powi(3), 1.0, sphere.reflection());

        let reflect_dir = direction - nhit * (2.0 * direction.dot(nhit));
        let reflect_ray = Ray::new(phit + nhit * bias, reflect_dir)?;
        let reflection = self.trace(&reflect_ray, scene, depth + 1)?;

        let mut refraction = Color::ZERO;
        if sphere.transparency() > 0.0 {
            let ior = self.config.ior;
            let eta = if inside { ior } else { 1.0 / ior };
            let cosi = -nhit.dot(direction);
            let k = 1.0 - eta * eta * (1.0 - cosi * cosi);

            // k < 0 is total internal reflection: nothing is transmitted
            if k >= 0.0 {
                let refract_dir = direction * eta + nhit * (eta * cosi - k.sqrt());
                let refract_ray = Ray::new(phit - nhit * bias, refract_dir)?;
                refraction = self.trace(&refract_ray, scene, depth + 1)?;
            }
        }

        Ok((reflection * fresnel + refraction * (1.0 - fresnel) * sphere.transparency())
            * sphere.surface())
    }

    fn shade_diffuse<V: Vector>(
        &self,
        scene: &[Sphere<V>],
        index: usize,
        phit: V,
        nhit: V,
    ) -> RenderResult<Color> {
        let sphere = &scene[index];
        let shadow_origin = phit + nhit * self.config.bias;
        let mut color = Color::ZERO;

        for (light_index, light) in scene.iter().enumerate() {
            if light_index == index || !light.is_light() {
                continue;
            }

            let shadow_ray = Ray::new(shadow_origin, light.center() - phit)?;

            // Any other sphere along the way blocks the light completely
            let occluded = scene
                .iter()
                .enumerate()
                .any(|(i, other)| i != light_index && other.intersect(&shadow_ray).is_some());
            if occluded {
                continue;
            }

            let lambert = nhit.dot(shadow_ray.direction()).max(0.0);
            color += sphere.surface() * lambert * light.emission();
        }

        Ok(color)
    }
}

/// Index of the sphere hit first along the ray, and the hit distance.
fn nearest_hit<V: Vector>(ray: &Ray<V>, scene: &[Sphere<V>]) -> Option<(usize, f64)> {
    let mut nearest = None;
    let mut t_near = f64::INFINITY;

    for (i, sphere) in scene.iter().enumerate() {
        if let Some(hit) = sphere.intersect(ray) {
            let t = hit.nearest();
            if t < t_near {
                t_near = t;
                nearest = Some((i, t));
            }
        }
    }

    nearest
}
