use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use arbor_core::TextureTable;
use arbor_renderer::{render, render_parallel, RenderConfig};
use clap::Parser;

mod cli;
mod scenes;

use cli::Args;

/// Start from the config file (or defaults) and apply explicit flags on top.
fn load_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => RenderConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(fov) = args.fov {
        config.fov_degrees = fov;
    }

    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<RenderConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Procedural scene textures first, then the scene manifest, then the
/// command line, each replacing earlier textures of the same name.
fn load_textures(demo: &mut scenes::Demo, args: &Args) -> Result<TextureTable> {
    let mut textures = TextureTable::new();

    for (name, texture) in demo.textures.drain(..) {
        textures.insert(name, texture);
    }

    let manifest = demo.scene.textures.iter();
    let overrides = args.textures.iter().map(|(name, path)| (name, path));
    for (name, path) in manifest.chain(overrides) {
        textures
            .load(name, path)
            .with_context(|| format!("Failed to load texture '{}'", name))?;
    }

    log::debug!("Textures available: {:?}", textures.names());
    Ok(textures)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Arbor");

    let config = load_config(&args)?;
    let mut demo = scenes::build(args.scene);
    let textures = load_textures(&mut demo, &args)?;

    let image = if args.parallel {
        render_parallel(&demo.scene, &textures, demo.modelview, &config)?
    } else {
        render(&demo.scene, &textures, demo.modelview, &config)?
    };

    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("arbor-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "width": 100, "height": 50, "max_depth": 2 }"#).unwrap();

        let args = Args::try_parse_from([
            "arbor",
            "--config",
            path.to_str().unwrap(),
            "--height",
            "80",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.width, 100);
        assert_eq!(config.height, 80);
        assert_eq!(config.max_depth, 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let args = Args::try_parse_from(["arbor", "--fov", "0"]).unwrap();
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let args = Args::try_parse_from(["arbor", "--config", "/nonexistent/arbor.json"]).unwrap();
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_missing_texture_file() {
        let args =
            Args::try_parse_from(["arbor", "--texture", "checker=/nonexistent/checker.png"])
                .unwrap();
        let mut demo = scenes::build(args.scene);
        let err = load_textures(&mut demo, &args).unwrap_err();
        assert!(err.to_string().contains("checker"));
    }

    #[test]
    fn test_scene_textures_loaded() {
        let args = Args::try_parse_from(["arbor", "--scene", "boxes"]).unwrap();
        let mut demo = scenes::build(args.scene);
        let textures = load_textures(&mut demo, &args).unwrap();

        assert!(textures.contains("tiles"));
        assert!(textures.contains("white"));
        assert!(demo.textures.is_empty());
        assert_eq!(args.output, PathBuf::from("arbor.png"));
    }
}
