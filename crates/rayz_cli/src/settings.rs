//! Command-line render settings, read from an optional JSON file.

use anyhow::{Context, Result};
use rayz_renderer::{RenderConfig, DEFAULT_BUCKET_SIZE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Deepest bounce chain a settings file may request. Each bounce is one
/// level of `ray_color` recursion on the render thread's stack.
pub const MAX_DEPTH_LIMIT: u32 = 100;

/// Which built-in scene to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Spheres on a checkered ground, with motion blur and depth of field
    Random,
    /// The Cornell box with two rotated boxes
    #[default]
    Cornell,
    /// One diffuse sphere under a white sky
    Simple,
}

/// Everything the `rayz` binary needs to produce an image.
///
/// Missing fields take their default, so `{}` is a valid settings file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scene: SceneKind,
    pub width: u32,
    /// Defaults to `width` at a 16:9 aspect ratio
    pub height: Option<u32>,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub seed: u64,
    pub bucket_size: u32,
    /// Every image is written to each path; the extension picks the format
    pub outputs: Vec<PathBuf>,
    /// Directory searched for image textures
    pub texture_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: SceneKind::default(),
            width: 400,
            height: None,
            samples_per_pixel: 200,
            max_depth: 50,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
            outputs: vec![PathBuf::from("image1.bmp"), PathBuf::from("image1.jpg")],
            texture_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Parse a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text)?;
        if settings.width == 0 || settings.height == Some(0) {
            anyhow::bail!("Image dimensions must be non-zero");
        }
        if settings.max_depth > MAX_DEPTH_LIMIT {
            anyhow::bail!(
                "max_depth {} exceeds the limit of {}",
                settings.max_depth,
                MAX_DEPTH_LIMIT
            );
        }
        Ok(settings)
    }

    pub fn image_height(&self) -> u32 {
        self.height.unwrap_or((self.width * 9 / 16).max(1))
    }

    /// Renderer configuration for a scene with the given background.
    pub fn render_config(&self, background: rayz_renderer::Color) -> RenderConfig {
        RenderConfig {
            image_width: self.width,
            image_height: self.image_height(),
            samples_per_pixel: self.samples_per_pixel,
            max_depth: self.max_depth,
            background,
            seed: self.seed,
            bucket_size: self.bucket_size,
        }
    }
}
