//! Core path tracing renderer.
//!
//! Implements unidirectional Monte Carlo path tracing with:
//! - Recursive ray tracing with a hard bounce limit
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction on output

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::image_io::{save_rgb8, ImageIoResult};
use crate::random::gen_f32;
use crate::{Camera, Color, HitRecord, Hittable};
use rand::RngCore;
use rayon::prelude::*;
use rayz_math::{Interval, Ray};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Offset applied to the start of every secondary ray's search range so a
/// surface does not re-hit itself through rounding error.
pub const SELF_INTERSECTION_BIAS: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels
    pub image_width: u32,
    /// Output height in pixels
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Radiance returned by rays that escape the scene
    pub background: Color,
    /// Base seed; each bucket derives its own stream from it
    pub seed: u64,
    /// Edge length of a render bucket in pixels
    pub bucket_size: u32,
}

impl RenderConfig {
    /// Width over height, as the camera viewport expects it.
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height.max(1) as f32
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 200,
            max_depth: 50,
            background: Color::ZERO,
            seed: 0,
            bucket_size: crate::bucket::DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Compute the radiance arriving along a ray.
///
/// Traces the ray through the scene, adding each surface's emission and
/// multiplying by its attenuation at every bounce. Paths still alive after
/// `depth` bounces contribute nothing.
pub fn ray_color(
    ray: &Ray,
    background: Color,
    world: &dyn Hittable,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    // Bounce budget exhausted
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();
    if !world.hit(
        ray,
        Interval::new(SELF_INTERSECTION_BIAS, f32::INFINITY),
        &mut rec,
    ) {
        return background;
    }

    let emitted = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            emitted
                + result.attenuation
                    * ray_color(&result.scattered, background, world, depth - 1, rng)
        }
        None => emitted,
    }
}

/// Sum of `samples_per_pixel` radiance samples for pixel (x, y).
///
/// Row 0 is the top of the image. The result is not averaged; see
/// [`color_to_rgb8`].
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width_fac = 1.0 / config.image_width.saturating_sub(1).max(1) as f32;
    let height_fac = 1.0 / config.image_height.saturating_sub(1).max(1) as f32;
    let row_from_bottom = config.image_height.saturating_sub(1).saturating_sub(y) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) * width_fac;
        let t = (row_from_bottom + gen_f32(rng)) * height_fac;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, config.background, world, config.max_depth, rng);
    }

    pixel_color
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a summed sample color to 8-bit RGB.
///
/// Averages over `samples`, gamma corrects, and quantizes. NaN channels,
/// which a degenerate path can produce, become black.
pub fn color_to_rgb8(sum: Color, samples: u32) -> [u8; 3] {
    let scale = 1.0 / samples.max(1) as f32;
    let channel = |c: f32| {
        let c = if c.is_nan() { 0.0 } else { c * scale };
        (256.0 * Interval::COLOR.clamp(linear_to_gamma(c))) as u8
    };
    [channel(sum.x), channel(sum.y), channel(sum.z)]
}

/// Accumulated sample sums for a whole image, row-major from the top.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Summed color at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Mean linear color at (x, y).
    pub fn average(&self, x: u32, y: u32) -> Color {
        self.get(x, y) / self.samples_per_pixel.max(1) as f32
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Convert to packed RGB bytes (gamma corrected).
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb8(*color, self.samples_per_pixel))
            .collect()
    }

    /// Encode to `path`; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ImageIoResult<()> {
        save_rgb8(path, self.width, self.height, &self.to_rgb8())
    }
}

/// Render the entire scene, buckets in parallel.
///
/// The result depends only on the scene, camera and `config` (including its
/// seed), never on the number of threads.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let buckets = generate_buckets(config.image_width, config.image_height, config.bucket_size);
    let total = buckets.len();
    let finished = AtomicUsize::new(0);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} buckets",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth,
        total
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, camera, world, config);
            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {} finished ({}/{})", bucket.index, done, total);
            result
        })
        .collect();

    let mut image = ImageBuffer::new(
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
    );
    for result in &results {
        image.write_bucket(result);
    }
    image
}
