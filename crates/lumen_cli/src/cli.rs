use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log verbosity accepted on the command line.
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

/// Built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Random field of small spheres around three large ones, with motion blur
    BouncingSpheres,
    /// Two large spheres sharing one checker texture
    CheckeredSpheres,
    /// A globe wrapped in an image texture
    Earth,
    /// One sphere on a ground sphere, shaded by surface normal
    Normals,
}

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "A Monte Carlo ray tracer writing plain PPM images")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "bouncing-spheres")]
    pub scene: SceneKind,

    /// Output PPM path, "-" for stdout
    #[arg(short, long, default_value = "image.ppm")]
    pub output: String,

    /// JSON camera configuration overriding the scene's camera
    #[arg(short, long)]
    pub camera: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for scene generation and sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Image used by the earth scene
    #[arg(long, default_value = "earthmap.jpg")]
    pub texture: PathBuf,

    /// Shade by surface normal instead of materials
    #[arg(long)]
    pub normals: bool,

    /// Logging level, overriding RUST_LOG (default: RUST_LOG, else info)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}
