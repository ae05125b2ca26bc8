//! Raster loop: one primary ray per pixel into a bitmap.

use std::time::Instant;

use lumen_core::{Bitmap, BitmapError, Rgb8};
use lumen_math::{Interval, MathError, Vector};
use thiserror::Error;

use crate::{Camera, Color, Sphere, Tracer};

/// Errors that abort a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Degenerate geometry: {0}")]
    Geometry(#[from] MathError),

    #[error("Bitmap error: {0}")]
    Bitmap(#[from] BitmapError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Convert a color to 8-bit channels.
///
/// Channels are clamped to [0, 1] and scaled to [0, 255], truncating.
pub fn color_to_rgb8(color: Color) -> Rgb8 {
    let channel = |c: f64| (Interval::UNIT.clamp(c) * 255.0) as u8;
    Rgb8::new(channel(color.x), channel(color.y), channel(color.z))
}

/// Render the scene to a new bitmap.
///
/// Single-threaded. Either the whole frame is produced or the first error
/// aborts it. No file I/O happens here.
pub fn render<V: Vector>(
    camera: &Camera,
    scene: &[Sphere<V>],
    tracer: &Tracer,
) -> RenderResult<Bitmap> {
    let mut image = Bitmap::new(camera.width, camera.height)?;

    log::info!(
        "Rendering {}x{} ({} spheres, {}D, max depth {})",
        camera.width,
        camera.height,
        scene.len(),
        V::DIM,
        tracer.config().max_depth
    );
    let start = Instant::now();
    let rays_before = tracer.rays_traced();

    for i in 0..camera.width {
        for j in 0..camera.height {
            let ray = camera.primary_ray::<V>(i, j)?;
            let color = tracer.trace(&ray, scene, 0)?;

            // Bitmap rows count from the top, camera rows from the bottom
            image.set(i, camera.height - 1 - j, color_to_rgb8(color));
        }
    }

    log::info!(
        "Rendered in {:?} ({} rays)",
        start.elapsed(),
        tracer.rays_traced() - rays_before
    );

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceConfig;
    use lumen_math::{DVec3, DVec4};

    const BACKGROUND_PIXEL: Rgb8 = Rgb8::new(0, 51, 51);

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::ZERO), Rgb8::BLACK);
        assert_eq!(color_to_rgb8(Color::ONE), Rgb8::new(255, 255, 255));
        assert_eq!(color_to_rgb8(Color::new(0.0, 0.2, 0.2)), BACKGROUND_PIXEL);

        // Truncates toward zero
        assert_eq!(color_to_rgb8(Color::new(0.999, 0.5, 0.0039)), Rgb8::new(254, 127, 0));
    }

    #[test]
    fn test_color_clamping() {
        assert_eq!(
            color_to_rgb8(Color::new(1.5, 300.0, 1.0000001)),
            Rgb8::new(255, 255, 255)
        );
        assert_eq!(color_to_rgb8(Color::new(-0.5, -1e9, 0.0)), Rgb8::BLACK);
        assert_eq!(color_to_rgb8(Color::new(f64::NAN, 0.0, 0.0)), Rgb8::BLACK);
    }

    #[test]
    fn test_render_empty_scene() {
        let camera = Camera::new(5, 3, 60.0);
        let image = render::<DVec3>(&camera, &[], &Tracer::default()).unwrap();

        assert_eq!((image.width(), image.height()), (5, 3));
        assert!(image.pixels().iter().all(|&p| p == BACKGROUND_PIXEL));
    }

    #[test]
    fn test_render_orientation() {
        // A light above the view axis shows up in the top rows only
        let scene = vec![Sphere::light(DVec3::new(0.0, 1.5, -10.0), 0.8, Color::ONE)];
        let camera = Camera::new(16, 12, 30.0);
        let image = render(&camera, &scene, &Tracer::default()).unwrap();

        let white = Rgb8::new(255, 255, 255);
        let top_half = (0..6).flat_map(|y| (0..16).map(move |x| (x, y)));
        let bottom_half = (6..12).flat_map(|y| (0..16).map(move |x| (x, y)));

        assert!(top_half.into_iter().any(|(x, y)| image.get(x, y) == white));
        assert!(bottom_half.into_iter().all(|(x, y)| image.get(x, y) == BACKGROUND_PIXEL));
    }

    #[test]
    fn test_render_counts_rays() {
        let tracer = Tracer::default();
        let camera = Camera::new(4, 4, 30.0);
        render::<DVec3>(&camera, &[], &tracer).unwrap();
        assert_eq!(tracer.rays_traced(), 16);
    }

    #[test]
    fn test_render_invalid_resolution() {
        let camera = Camera::new(0, 10, 30.0);
        let result = render::<DVec3>(&camera, &[], &Tracer::default());
        assert!(matches!(result, Err(RenderError::Bitmap(_))));
    }

    #[test]
    fn test_render_4d_matches_3d() {
        let scene3 = vec![
            Sphere::new(DVec3::new(0.0, -10004.0, -20.0), 10000.0, Color::new(0.2, 0.2, 0.2)),
            Sphere::new(DVec3::new(0.0, 0.0, -20.0), 4.0, Color::new(1.0, 0.32, 0.36))
                .with_reflection(1.0)
                .with_transparency(0.5),
            Sphere::light(DVec3::new(0.0, 20.0, -30.0), 3.0, Color::splat(3.0)),
        ];
        let scene4: Vec<Sphere<DVec4>> = scene3
            .iter()
            .map(|s| {
                Sphere::new(s.center().extend(0.0), s.radius(), s.surface())
                    .with_emission(s.emission())
                    .with_reflection(s.reflection())
                    .with_transparency(s.transparency())
            })
            .collect();

        let camera = Camera::new(16, 12, 30.0);
        let tracer = Tracer::new(TraceConfig::default());
        let image3 = render(&camera, &scene3, &tracer).unwrap();
        let image4 = render(&camera, &scene4, &tracer).unwrap();

        let diff = image3.diff(&image4).unwrap();
        assert!(diff.max_channel_delta <= 1, "{diff:?}");
    }
}
