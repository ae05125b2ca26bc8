//! Sphere primitive for ray tracing.

use lumen_math::{DVec3, Ray, Vector};

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

/// Near and far distances where a ray crosses a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub t0: f64,
    pub t1: f64,
}

impl Intersection {
    /// The first non-negative distance.
    ///
    /// When the ray starts inside the sphere `t0` is negative and the exit
    /// point `t1` is used instead.
    #[inline]
    pub fn nearest(&self) -> f64 {
        if self.t0 < 0.0 {
            self.t1
        } else {
            self.t0
        }
    }
}

/// A sphere with its surface material.
///
/// A sphere with non-zero emission acts as a light source.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere<V> {
    center: V,
    radius: f64,
    radius2: f64,
    surface: Color,
    emission: Color,
    transparency: f64,
    reflection: f64,
}

impl<V: Vector> Sphere<V> {
    /// Create a diffuse sphere.
    ///
    /// The radius isn't validated; zero or negative radii give geometrically
    /// meaningless results.
    pub fn new(center: V, radius: f64, surface: Color) -> Self {
        Self {
            center,
            radius,
            radius2: radius * radius,
            surface,
            emission: Color::ZERO,
            transparency: 0.0,
            reflection: 0.0,
        }
    }

    /// Create a light source with no surface color of its own.
    pub fn light(center: V, radius: f64, emission: Color) -> Self {
        Self::new(center, radius, Color::ZERO).with_emission(emission)
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency;
        self
    }

    pub fn with_reflection(mut self, reflection: f64) -> Self {
        self.reflection = reflection;
        self
    }

    #[inline]
    pub fn center(&self) -> V {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn surface(&self) -> Color {
        self.surface
    }

    #[inline]
    pub fn emission(&self) -> Color {
        self.emission
    }

    #[inline]
    pub fn transparency(&self) -> f64 {
        self.transparency
    }

    #[inline]
    pub fn reflection(&self) -> f64 {
        self.reflection
    }

    /// True if the sphere emits light.
    #[inline]
    pub fn is_light(&self) -> bool {
        self.emission != Color::ZERO
    }

    /// True if the sphere reflects or refracts instead of shading diffusely.
    #[inline]
    pub fn is_dielectric(&self) -> bool {
        self.transparency > 0.0 || self.reflection > 0.0
    }

    /// Intersect a ray with the sphere.
    ///
    /// The ray direction must be normalized. Spheres whose center lies behind
    /// the ray origin are never hit, even if the origin is inside them.
    pub fn intersect(&self, ray: &Ray<V>) -> Option<Intersection> {
        let l = self.center - ray.origin();
        let tca = l.dot(ray.direction());
        if tca < 0.0 {
            return None;
        }

        // Squared distance from the center to the ray line
        let d2 = l.dot(l) - tca * tca;
        if d2 > self.radius2 {
            return None;
        }

        let thc = (self.radius2 - d2).sqrt();
        Some(Intersection {
            t0: tca - thc,
            t1: tca + thc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::DVec4;

    fn ray(origin: DVec3, direction: DVec3) -> Ray<DVec3> {
        Ray::new(origin, direction).unwrap()
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, Color::ONE);
        let hit = sphere.intersect(&ray(DVec3::ZERO, -DVec3::Z)).unwrap();

        assert!((hit.t0 - 4.0).abs() < 1e-12);
        assert!((hit.t1 - 6.0).abs() < 1e-12);
        assert_eq!(hit.nearest(), hit.t0);
    }

    #[test]
    fn test_hit_distance_from_offset_origin() {
        let center = DVec3::new(3.0, -2.0, 7.0);
        let origin = DVec3::new(-4.0, 5.0, 1.0);
        let sphere = Sphere::new(center, 2.5, Color::ONE);

        let hit = sphere.intersect(&ray(origin, center - origin)).unwrap();
        let expected = (center - origin).length() - 2.5;
        assert!((hit.t0 - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, Color::ONE);

        // Closest approach is 1.5 > radius
        let passing = ray(DVec3::new(1.5, 0.0, 0.0), -DVec3::Z);
        assert!(sphere.intersect(&passing).is_none());

        // Pointing away from the sphere
        assert!(sphere.intersect(&ray(DVec3::ZERO, DVec3::Z)).is_none());
    }

    #[test]
    fn test_tangent_ray_hits() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, Color::ONE);
        let hit = sphere.intersect(&ray(DVec3::new(1.0, 0.0, 0.0), -DVec3::Z)).unwrap();

        assert_eq!(hit.t0, hit.t1);
    }

    #[test]
    fn test_origin_inside_sphere() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, -0.5), 2.0, Color::ONE);
        let hit = sphere.intersect(&ray(DVec3::ZERO, -DVec3::Z)).unwrap();

        assert!(hit.t0 < 0.0);
        assert!((hit.nearest() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_center_behind_origin_is_ignored() {
        // The origin is inside, but the center is behind it along the ray
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, 0.5), 2.0, Color::ONE);
        assert!(sphere.intersect(&ray(DVec3::ZERO, -DVec3::Z)).is_none());
    }

    #[test]
    fn test_material_predicates() {
        let diffuse = Sphere::new(DVec3::ZERO, 1.0, Color::ONE);
        assert!(!diffuse.is_light());
        assert!(!diffuse.is_dielectric());

        let light = Sphere::light(DVec3::ZERO, 1.0, Color::splat(3.0));
        assert!(light.is_light());
        assert_eq!(light.surface(), Color::ZERO);

        assert!(diffuse.clone().with_reflection(0.5).is_dielectric());
        assert!(diffuse.with_transparency(0.1).is_dielectric());
    }

    #[test]
    fn test_4d_sphere() {
        let sphere = Sphere::new(DVec4::new(0.0, 0.0, -5.0, 0.0), 1.0, Color::ONE);
        let ray = Ray::new(DVec4::ZERO, DVec4::new(0.0, 0.0, -1.0, 0.0)).unwrap();
        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.t0 - 4.0).abs() < 1e-12);

        // Displaced along w, out of reach of rays in the w = 0 subspace
        let shifted = Sphere::new(DVec4::new(0.0, 0.0, -5.0, 2.0), 1.0, Color::ONE);
        assert!(shifted.intersect(&ray).is_none());
    }
}
