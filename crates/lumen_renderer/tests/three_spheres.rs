//! End-to-end render of a small floor, sphere and light scene.

use lumen_core::Rgb8;
use lumen_renderer::{render, Camera, Color, DVec3, Ray, Sphere, Tracer};

const WIDTH: u32 = 16;
const HEIGHT: u32 = 12;
const RED_SPHERE: Option<usize> = Some(1);
const NOTHING: Option<usize> = None;

fn scene(light_emission: Color) -> Vec<Sphere<DVec3>> {
    vec![
        Sphere::new(DVec3::new(0.0, -10004.0, -20.0), 10000.0, Color::splat(0.2)),
        Sphere::new(DVec3::new(0.0, 0.0, -20.0), 4.0, Color::new(1.0, 0.0, 0.0)),
        Sphere::new(DVec3::new(0.0, 20.0, -30.0), 3.0, Color::ZERO).with_emission(light_emission),
    ]
}

/// Bitmap coordinates of every pixel whose primary ray first lands on
/// sphere `target`, or hits nothing when `target` is `None`.
fn pixels_hitting(
    camera: &Camera,
    scene: &[Sphere<DVec3>],
    target: Option<usize>,
) -> Vec<(u32, u32)> {
    let mut pixels = Vec::new();
    for i in 0..camera.width {
        for j in 0..camera.height {
            let ray: Ray<DVec3> = camera.primary_ray(i, j).unwrap();
            let nearest = scene
                .iter()
                .enumerate()
                .filter_map(|(index, s)| s.intersect(&ray).map(|hit| (index, hit.nearest())))
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(index, _)| index);

            if nearest == target {
                pixels.push((i, camera.height - 1 - j));
            }
        }
    }
    pixels
}

#[test]
fn test_three_sphere_render() {
    let _ = env_logger::builder().is_test(true).try_init();

    let camera = Camera::new(WIDTH, HEIGHT, 30.0);
    let scene = scene(Color::splat(3.0));
    let image = render(&camera, &scene, &Tracer::default()).unwrap();

    assert_eq!((image.width(), image.height()), (WIDTH, HEIGHT));

    // Every ray that misses the scene shows the background
    let background = pixels_hitting(&camera, &scene, NOTHING);
    assert!(background.contains(&(0, 0)));
    assert!(background.iter().all(|&(x, y)| image.get(x, y) == Rgb8::new(0, 51, 51)));

    let red = pixels_hitting(&camera, &scene, RED_SPHERE);
    assert!(!red.is_empty());
    assert!(red.iter().all(|&(x, y)| {
        let p = image.get(x, y);
        p.g == 0 && p.b == 0
    }));
    assert!(red.iter().any(|&(x, y)| image.get(x, y).r > 0));
}

#[test]
fn test_dark_light_leaves_red_sphere_black() {
    let camera = Camera::new(WIDTH, HEIGHT, 30.0);
    let scene = scene(Color::ZERO);
    let image = render(&camera, &scene, &Tracer::default()).unwrap();

    let red = pixels_hitting(&camera, &scene, RED_SPHERE);
    assert!(!red.is_empty());
    assert!(red.iter().all(|&(x, y)| image.get(x, y) == Rgb8::BLACK));
}

#[test]
fn test_render_encodes_to_bmp() {
    let camera = Camera::new(WIDTH, HEIGHT, 30.0);
    let image = render(&camera, &scene(Color::splat(3.0)), &Tracer::default()).unwrap();

    let bytes = image.encode().unwrap();
    assert_eq!(&bytes[..2], b"BM");
    // 16 pixels * 3 bytes = 48, already a multiple of 4
    assert_eq!(bytes.len(), 54 + 48 * HEIGHT as usize);

    let decoded = lumen_core::Bitmap::decode(&bytes).unwrap();
    assert!(decoded.diff(&image).unwrap().is_identical());
}
