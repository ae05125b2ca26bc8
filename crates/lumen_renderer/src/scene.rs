//! Scene descriptions: spheres, camera and tracer settings in one value.
//!
//! A description can be built in code or loaded from JSON, then turned into
//! an image with [`SceneDescription::render`]:
//!
//! ```json
//! {
//!   "name": "two spheres",
//!   "camera": { "width": 320, "height": 240, "fov": 30.0 },
//!   "trace": { "max_depth": 3 },
//!   "spheres": [
//!     { "center": [0.0, 0.0, -20.0], "radius": 4.0, "surface": [1.0, 0.0, 0.0] },
//!     { "center": [0.0, 20.0, -30.0], "radius": 3.0, "emission": [3.0, 3.0, 3.0] }
//!   ]
//! }
//! ```
//!
//! Omitted sections fall back to their defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use lumen_core::Bitmap;
use lumen_math::{DVec3, Interval};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{render, Camera, Color, RenderResult, Sphere, TraceConfig, Tracer};

/// Errors that can occur while loading or checking a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid sphere {index}: {reason}")]
    InvalidSphere { index: usize, reason: String },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Serializable sphere parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: DVec3,
    pub radius: f64,
    #[serde(default)]
    pub surface: Color,
    #[serde(default)]
    pub emission: Color,
    #[serde(default)]
    pub transparency: f64,
    #[serde(default)]
    pub reflection: f64,
}

impl SphereDescription {
    pub fn to_sphere(&self) -> Sphere<DVec3> {
        Sphere::new(self.center, self.radius, self.surface)
            .with_emission(self.emission)
            .with_transparency(self.transparency)
            .with_reflection(self.reflection)
    }

    fn check(&self) -> Result<(), String> {
        if !(self.radius > 0.0) {
            return Err(format!("radius must be positive, got {}", self.radius));
        }
        for (name, value) in [
            ("transparency", self.transparency),
            ("reflection", self.reflection),
        ] {
            if !Interval::UNIT.contains(value) {
                return Err(format!("{name} must be within [0, 1], got {value}"));
            }
        }
        Ok(())
    }
}

/// Everything needed to render one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub name: String,
    pub camera: Camera,
    pub trace: TraceConfig,
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Load a scene from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let scene: SceneDescription = serde_json::from_reader(BufReader::new(file))?;

        log::debug!(
            "Loaded scene: {} ({} spheres) from {}",
            scene.name,
            scene.spheres.len(),
            path.display()
        );
        Ok(scene)
    }

    /// Parse a scene from a JSON string.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the scene as pretty-printed JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check radii and material coefficients.
    ///
    /// Rendering never calls this; scenes with odd values still render,
    /// just not meaningfully.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            sphere
                .check()
                .map_err(|reason| SceneError::InvalidSphere { index, reason })?;
        }
        Ok(())
    }

    /// Build the sphere list the tracer works on.
    pub fn spheres(&self) -> Vec<Sphere<DVec3>> {
        self.spheres.iter().map(SphereDescription::to_sphere).collect()
    }

    /// Render the scene with its own camera and tracer settings.
    pub fn render(&self) -> RenderResult<Bitmap> {
        let tracer = Tracer::new(self.trace.clone());
        render(&self.camera, &self.spheres(), &tracer)
    }

    /// Green floor, red and blue spheres, and one white light.
    pub fn default_scene() -> Self {
        let sphere = |center: [f64; 3], radius: f64, surface: [f64; 3]| SphereDescription {
            center: DVec3::from_array(center),
            radius,
            surface: Color::from_array(surface),
            emission: Color::ZERO,
            transparency: 0.0,
            reflection: 0.0,
        };

        Self {
            name: "default".to_string(),
            camera: Camera::default(),
            trace: TraceConfig::default(),
            spheres: vec![
                sphere([0.0, -10004.0, -20.0], 10000.0, [0.0, 1.0, 0.0]),
                sphere([0.0, 0.0, -20.0], 4.0, [1.0, 0.0, 0.0]),
                sphere([5.0, -1.0, -15.0], 2.0, [0.0, 0.0, 1.0]),
                SphereDescription {
                    emission: Color::splat(3.0),
                    ..sphere([0.0, 20.0, -30.0], 3.0, [0.0, 0.0, 0.0])
                },
            ],
        }
    }
}
