use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

/// Built-in demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Three shaded spheres on a checkered floor
    Spheres,
    /// Rotated textured boxes under a directional light
    Boxes,
    /// A sphere between two facing mirrors
    Mirrors,
}

#[derive(Debug, Parser)]
#[command(name = "arbor")]
#[command(about = "Recursive ray tracer for Arbor scene graphs")]
pub struct Args {
    /// Demo scene to render
    #[arg(long, value_enum, default_value = "spheres")]
    pub scene: SceneChoice,

    /// JSON render configuration; explicit flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f32>,

    /// Load or replace a texture, e.g. --texture floor=images/tiles.png
    #[arg(long = "texture", value_name = "NAME=PATH", value_parser = parse_texture)]
    pub textures: Vec<(String, PathBuf)>,

    /// Render scanlines on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Output PNG path
    #[arg(short, long, default_value = "arbor.png")]
    pub output: PathBuf,
}

fn parse_texture(arg: &str) -> Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got '{}'", arg)),
    }
}
