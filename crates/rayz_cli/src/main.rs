mod scenes;
mod settings;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scenes::SceneSetup;
use settings::{SceneKind, Settings};
use std::time::Instant;

fn build_scene(settings: &Settings) -> Result<SceneSetup> {
    match settings.scene {
        SceneKind::Random => {
            let mut rng = StdRng::seed_from_u64(settings.seed);
            scenes::random_scene(&mut rng, &settings.texture_dir)
        }
        SceneKind::Cornell => Ok(scenes::cornell_box()),
        SceneKind::Simple => Ok(scenes::simple_scene()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    log::info!("Starting Rayz: {:?} scene", settings.scene);

    let scene = build_scene(&settings)?;
    let config = settings.render_config(scene.background);
    let camera = scene
        .camera
        .with_aspect_ratio(config.aspect_ratio())
        .build();
    log::info!("Scene ready: {} objects", scene.world.len());

    let start = Instant::now();
    let image = rayz_renderer::render(&camera, &scene.world, &config);
    log::info!("Render finished in {:.2?}", start.elapsed());

    if settings.outputs.is_empty() {
        log::warn!("No output paths configured; image discarded");
    }
    for path in &settings.outputs {
        image
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
