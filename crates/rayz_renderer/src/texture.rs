//! Textures: spatially varying colors looked up at a hit.

use crate::image_io::ImageData;
use crate::perlin::Perlin;
use crate::Color;
use rayz_math::{Interval, Vec3};
use std::sync::Arc;

/// Maps surface coordinates and a hit point to a color.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A single constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.color
    }
}

/// Solid 3D checkerboard driven by the sign of sin(10x)·sin(10y)·sin(10z).
///
/// A negative product selects `odd`, zero or positive selects `even`.
pub struct CheckerTexture {
    odd: Arc<dyn Texture>,
    even: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(odd: Arc<dyn Texture>, even: Arc<dyn Texture>) -> Self {
        Self { odd, even }
    }

    pub fn from_colors(odd: Color, even: Color) -> Self {
        Self::new(
            Arc::new(SolidColor::new(odd)),
            Arc::new(SolidColor::new(even)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Marble-like pattern built from Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    const TURBULENCE_DEPTH: u32 = 7;

    /// `scale` is the stripe frequency along z.
    pub fn new(scale: f32) -> Self {
        Self {
            noise: Perlin::new(),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        let phase = self.scale * p.z + 10.0 * self.noise.turb(p, Self::TURBULENCE_DEPTH);
        Color::ONE * 0.5 * (1.0 + phase.sin())
    }
}

/// Texture sampled from a decoded image by (u, v).
pub struct ImageTexture {
    image: Arc<ImageData>,
}

impl ImageTexture {
    /// Color returned for an image without pixels, easy to spot in a render.
    pub const MISSING: Color = Color::new(0.0, 1.0, 1.0);

    pub fn new(image: Arc<ImageData>) -> Self {
        Self { image }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        if self.image.is_empty() {
            return Self::MISSING;
        }

        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        // Image rows run top to bottom
        let v = 1.0 - unit.clamp(v);

        // u = 1.0 and v = 0.0 land one past the edge; pixel() clamps them
        let i = (u * self.image.width() as f32) as u32;
        let j = (v * self.image.height() as f32) as u32;

        let [r, g, b] = self.image.pixel(i, j);
        Color::new(r as f32, g as f32, b as f32) / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Color = Color::new(0.2, 0.3, 0.1);
    const B: Color = Color::new(0.9, 0.9, 0.9);

    #[test]
    fn test_solid_color_ignores_inputs() {
        let tex = SolidColor::new(Color::new(1.0, 0.5, 0.0));
        assert_eq!(tex.value(0.0, 1.0, Vec3::splat(100.0)), Color::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_checker_origin_is_even() {
        let tex = CheckerTexture::from_colors(A, B);
        assert_eq!(tex.value(0.0, 0.0, Vec3::ZERO), B);
    }

    #[test]
    fn test_checker_zero_product_boundary_is_even() {
        // sin(0) on y and z makes the product exactly zero, which counts as even
        let tex = CheckerTexture::from_colors(A, B);
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(0.05, 0.0, 0.0)), B);
    }

    #[test]
    fn test_checker_negative_product_is_odd() {
        let tex = CheckerTexture::from_colors(A, B);
        // sin(2) * sin(2) * sin(-2) < 0
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(0.2, 0.2, -0.2)), A);
        // sin(2)^3 > 0
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(0.2, 0.2, 0.2)), B);
    }

    #[test]
    fn test_noise_texture_is_deterministic_and_in_range() {
        let a = NoiseTexture::new(4.0);
        let b = NoiseTexture::new(4.0);

        for i in 0..100 {
            let p = Vec3::new(i as f32 * 0.31, 1.0 - i as f32 * 0.07, i as f32 * 0.13);
            let value = a.value(0.0, 0.0, p);
            assert_eq!(value, b.value(0.0, 0.0, p));
            assert!(value.x >= 0.0 && value.x <= 1.0);
            assert_eq!(value.x, value.y);
            assert_eq!(value.y, value.z);
        }
    }

    fn two_by_two() -> Arc<ImageData> {
        let data = vec![
            255, 0, 0, 0, 255, 0, // top row: red, green
            0, 0, 255, 255, 255, 255, // bottom row: blue, white
        ];
        Arc::new(ImageData::new(2, 2, data).unwrap())
    }

    #[test]
    fn test_image_texture_maps_v_to_rows_from_bottom() {
        let tex = ImageTexture::new(two_by_two());

        assert_eq!(tex.value(0.25, 0.75, Vec3::ZERO), Color::new(1.0, 0.0, 0.0));
        assert_eq!(tex.value(0.75, 0.75, Vec3::ZERO), Color::new(0.0, 1.0, 0.0));
        assert_eq!(tex.value(0.25, 0.25, Vec3::ZERO), Color::new(0.0, 0.0, 1.0));
        assert_eq!(tex.value(0.75, 0.25, Vec3::ZERO), Color::ONE);
    }

    #[test]
    fn test_image_texture_clamps_out_of_range_uv() {
        let tex = ImageTexture::new(two_by_two());

        assert_eq!(tex.value(1.0, 0.0, Vec3::ZERO), Color::ONE);
        assert_eq!(tex.value(-3.0, 7.0, Vec3::ZERO), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_empty_image_texture_is_cyan() {
        let tex = ImageTexture::new(Arc::new(ImageData::default()));
        assert_eq!(tex.value(0.5, 0.5, Vec3::ZERO), ImageTexture::MISSING);
    }
}
