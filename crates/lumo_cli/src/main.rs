//! `lumo` - render a JSON scene description to PPM (and optionally PNG).
//!
//! Usage: `lumo <scene.json> [output.ppm] [--png <file.png>]`
//!
//! Verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use lumo_core::SceneDescription;
use lumo_renderer::{render_with_progress, save_png, save_ppm, Camera, Hittable, RenderConfig, Scene};

const USAGE: &str = "Usage: lumo <scene.json> [output.ppm] [--png <file.png>]";

/// Parsed command line.
#[derive(Debug)]
struct Args {
    scene: PathBuf,
    ppm: PathBuf,
    png: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut positional = Vec::new();
        let mut png = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--png" => {
                    let path = args.next().context("--png expects a file name")?;
                    png = Some(PathBuf::from(path));
                }
                "-h" | "--help" => bail!(USAGE),
                flag if flag.starts_with("--") => bail!("Unknown option '{}'\n{}", flag, USAGE),
                _ => positional.push(PathBuf::from(arg)),
            }
        }

        let mut positional = positional.into_iter();
        let scene = positional.next().context(USAGE)?;
        let ppm = positional.next().unwrap_or_else(|| PathBuf::from("output.ppm"));
        if let Some(extra) = positional.next() {
            bail!("Unexpected argument '{}'\n{}", extra.display(), USAGE);
        }

        Ok(Self { scene, ppm, png })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse(std::env::args().skip(1))?;

    let description = SceneDescription::load(&args.scene)
        .with_context(|| format!("Failed to load scene description {}", args.scene.display()))?;

    let start = Instant::now();
    let meshes = description.load_meshes().context("Failed to load meshes")?;
    let scene = Scene::from_meshes(meshes);
    for geometry in scene.geometry() {
        log::debug!(
            "  {}: {} triangles, material '{}'",
            geometry.name(),
            geometry.triangle_count(),
            geometry.material().name
        );
    }
    log::info!(
        "Loaded {} meshes ({} triangles) in {:.2?}",
        scene.len(),
        scene.triangle_count(),
        start.elapsed()
    );

    let settings = &description.render;
    let camera = Camera::from_description(&description.camera, settings.width, settings.height);
    let config = RenderConfig::from(settings);

    log::info!(
        "Rendering {}x{} @ {} spp, {} bounces",
        camera.image_width,
        camera.image_height,
        config.samples,
        config.max_bounces
    );

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} buckets ({eta})")?,
    );

    let start = Instant::now();
    let image = render_with_progress(&scene, &camera, &config, |_, finished, total| {
        progress.set_length(total as u64);
        progress.set_position(finished as u64);
    });
    progress.finish_and_clear();
    log::info!("Render done in {:.2?}", start.elapsed());

    save_ppm(&image, &args.ppm).with_context(|| format!("Failed to write {}", args.ppm.display()))?;
    log::info!("Saved {}", args.ppm.display());

    if let Some(png) = &args.png {
        save_png(&image, png).with_context(|| format!("Failed to write {}", png.display()))?;
        log::info!("Saved {}", png.display());
    }

    Ok(())
}
