use anyhow::{bail, Context, Result};
use clap::Parser;
use lumen_core::Bitmap;
use lumen_renderer::SceneDescription;

mod cli;

use cli::{Args, Command, RenderArgs};

/// Load the scene to render and apply command line overrides.
fn build_scene(args: &RenderArgs) -> Result<SceneDescription> {
    let mut scene = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => SceneDescription::default_scene(),
    };

    if let Some(width) = args.width {
        scene.camera.width = width;
    }
    if let Some(height) = args.height {
        scene.camera.height = height;
    }
    if let Some(fov) = args.fov {
        scene.camera.fov = fov;
    }
    if let Some(max_depth) = args.max_depth {
        scene.trace.max_depth = max_depth;
    }

    Ok(scene)
}

fn run_render(args: &RenderArgs) -> Result<()> {
    let scene = build_scene(args)?;

    // Odd materials still render, so only warn
    if let Err(e) = scene.validate() {
        log::warn!("{}", e);
    }

    let image = scene.render().context("Render failed")?;
    image
        .write(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Saved {}", args.output.display());
    Ok(())
}

fn run_inspect(path: &std::path::Path) -> Result<()> {
    let image =
        Bitmap::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    println!("{}", image.file_header);
    println!("{}", image.info_header);
    Ok(())
}

fn run_diff(a: &std::path::Path, b: &std::path::Path) -> Result<()> {
    let first = Bitmap::read(a).with_context(|| format!("Failed to read {}", a.display()))?;
    let second = Bitmap::read(b).with_context(|| format!("Failed to read {}", b.display()))?;

    let diff = first.diff(&second)?;
    println!("Differing pixels: {}", diff.differing_pixels);
    println!("Max channel delta: {}", diff.max_channel_delta);

    if !diff.is_identical() {
        bail!("Images differ");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    match &args.command {
        Command::Render(render) => run_render(render),
        Command::Inspect { file } => run_inspect(file),
        Command::Diff { a, b } => run_diff(a, b),
        Command::Scene => {
            println!("{}", SceneDescription::default_scene().to_json()?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str, extension: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "lumen_cli_{}_{}.{}",
            name,
            std::process::id(),
            extension
        ))
    }

    fn render_args(scene: Option<PathBuf>) -> RenderArgs {
        RenderArgs {
            scene,
            output: PathBuf::from("render.bmp"),
            width: None,
            height: None,
            fov: None,
            max_depth: None,
        }
    }

    #[test]
    fn test_default_scene_without_file() {
        let scene = build_scene(&render_args(None)).unwrap();
        assert_eq!(scene, SceneDescription::default_scene());
    }

    #[test]
    fn test_flags_override_scene_file() {
        let path = temp_path("override_scene", "json");
        std::fs::write(
            &path,
            r#"{ "camera": { "width": 100, "height": 50, "fov": 60.0 }, "trace": { "max_depth": 4 } }"#,
        )
        .unwrap();

        let mut args = render_args(Some(path.clone()));
        args.width = Some(20);
        args.max_depth = Some(1);
        let scene = build_scene(&args).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(scene.camera.width, 20);
        assert_eq!(scene.camera.height, 50);
        assert_eq!(scene.camera.fov, 60.0);
        assert_eq!(scene.trace.max_depth, 1);
    }

    #[test]
    fn test_missing_scene_file() {
        let args = render_args(Some(PathBuf::from("/nonexistent/lumen/scene.json")));
        assert!(build_scene(&args).is_err());
    }

    #[test]
    fn test_render_then_inspect_and_diff() {
        let output = temp_path("render", "bmp");

        let mut args = render_args(None);
        args.output = output.clone();
        args.width = Some(8);
        args.height = Some(6);
        run_render(&args).unwrap();

        assert!(run_inspect(&output).is_ok());
        assert!(run_diff(&output, &output).is_ok());

        let mut blank = Bitmap::new(8, 6).unwrap();
        blank.set(0, 0, lumen_core::Rgb8::new(255, 255, 255));
        let other = temp_path("blank", "bmp");
        blank.write(&other).unwrap();
        assert!(run_diff(&output, &other).is_err());

        std::fs::remove_file(&output).ok();
        std::fs::remove_file(&other).ok();
    }
}
