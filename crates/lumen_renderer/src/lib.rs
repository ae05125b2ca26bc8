//! Lumen Renderer - Recursive Sphere Ray Tracing
//!
//! A Whitted-style ray tracer over spheres: diffuse spheres lit by emissive
//! spheres with hard shadows, plus reflective and transparent spheres with
//! Fresnel blending. Output goes into a [`lumen_core::Bitmap`].
//!
//! The tracer is generic over [`Vector`], so the same code renders scenes
//! in 3D (`DVec3`) or 4D (`DVec4`) space.

mod camera;
mod renderer;
mod scene;
mod sphere;
mod tracer;

pub use camera::Camera;
pub use renderer::{color_to_rgb8, render, RenderError, RenderResult};
pub use scene::{SceneDescription, SceneError, SceneResult, SphereDescription};
pub use sphere::{Color, Intersection, Sphere};
pub use tracer::{TraceConfig, Tracer, BACKGROUND, BIAS, INDEX_OF_REFRACTION, MAX_RAY_DEPTH};

/// Re-export vector and ray types from lumen_math
pub use lumen_math::{DVec3, DVec4, Ray, Vector};
