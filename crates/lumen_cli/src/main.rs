//! lumen - render a built-in scene to a plain PPM image.

mod cli;
mod logger;
mod ppm;
mod scenes;

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{render_with, Camera, CameraConfig, RenderMode, RenderOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::Args;

/// Overlay the fields present in a JSON camera file onto `base`.
fn load_camera(base: CameraConfig, path: &Path) -> Result<CameraConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read camera file {}", path.display()))?;
    let overrides: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse camera file {}", path.display()))?;

    let mut merged = serde_json::to_value(base)?;
    match (&mut merged, overrides) {
        (serde_json::Value::Object(fields), serde_json::Value::Object(new_fields)) => {
            fields.extend(new_fields);
        }
        _ => anyhow::bail!("Camera file {} must hold a JSON object", path.display()),
    }

    serde_json::from_value(merged)
        .with_context(|| format!("Invalid camera settings in {}", path.display()))
}

/// Apply command-line overrides, which win over both scene and file.
fn apply_overrides(mut config: CameraConfig, args: &Args) -> CameraConfig {
    if let Some(width) = args.width {
        config.image_width = width;
    }
    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if args.normals {
        config.render_mode = RenderMode::Normals;
    }
    config
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.map(Into::into));

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("Seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let start = Instant::now();
    let scene = scenes::build(args.scene, &args.texture, &mut rng);
    log::info!("Scene built in {:?}", start.elapsed());

    let mut config = scene.camera;
    if let Some(path) = &args.camera {
        config = load_camera(config, path)?;
    }
    let config = apply_overrides(config, &args);
    let camera = Camera::new(&config);

    let options = RenderOptions {
        seed: Some(seed),
        cancel: None,
    };
    let image = render_with(&camera, &scene.world, &options)?;

    ppm::save_ppm(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output))?;
    log::info!("Saved to {}", args.output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_file_overlays_scene_camera() {
        let path = std::env::temp_dir().join("lumen_camera_overlay.json");
        fs::write(&path, r#"{ "samples_per_pixel": 8, "vfov": 45.0 }"#).unwrap();

        let base = CameraConfig::default().with_resolution(320, 2.0);
        let config = load_camera(base, &path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.samples_per_pixel, 8);
        assert_eq!(config.vfov, 45.0);
        // Untouched fields keep the scene's values
        assert_eq!(config.image_width, 320);
        assert_eq!(config.aspect_ratio, 2.0);
    }

    #[test]
    fn test_camera_file_must_be_object() {
        let path = std::env::temp_dir().join("lumen_camera_array.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = load_camera(CameraConfig::default(), &path);
        let _ = fs::remove_file(&path);

        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let args = Args::parse_from(["lumen", "--width", "64", "--samples", "4", "--normals"]);
        let config = apply_overrides(CameraConfig::default().with_quality(100, 50), &args);

        assert_eq!(config.image_width, 64);
        assert_eq!(config.samples_per_pixel, 4);
        assert_eq!(config.max_depth, 50);
        assert_eq!(config.render_mode, RenderMode::Normals);
    }
}
