use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Sphere ray tracer with a 24-bit BMP writer")]
pub struct Args {
    /// Set the logging level
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a scene to a BMP file
    Render(RenderArgs),

    /// Print the headers of a BMP file
    Inspect {
        file: PathBuf,
    },

    /// Compare two BMP files pixel by pixel
    Diff {
        a: PathBuf,
        b: PathBuf,
    },

    /// Print the built-in scene as JSON
    Scene,
}

#[derive(clap::Args)]
pub struct RenderArgs {
    /// Scene file (JSON); the built-in scene is used when omitted
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "render.bmp")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f64>,

    /// Maximum reflection/refraction depth
    #[arg(long)]
    pub max_depth: Option<u32>,
}
