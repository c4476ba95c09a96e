//! Image decoding for image textures and encoding of finished renders.
//!
//! Both directions go through the `image` crate. Failures surface as
//! [`ImageIoError`] so a missing texture is reported instead of silently
//! rendering with a blank one.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while loading or saving images.
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("Failed to save image: {0}")]
    SaveError(String),

    #[error("Invalid image data: expected {expected} bytes for {width}x{height} RGB, got {actual}")]
    InvalidData {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type ImageIoResult<T> = Result<T, ImageIoError>;

/// Decoded 8-bit RGB image, row-major, top row first.
#[derive(Clone, Debug, Default)]
pub struct ImageData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageData {
    pub const BYTES_PER_PIXEL: usize = 3;

    /// Wrap raw RGB8 bytes. The length must be `width * height * 3`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ImageIoResult<Self> {
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(ImageIoError::InvalidData {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode an image file (any format the `image` crate understands).
    pub fn load(path: impl AsRef<Path>) -> ImageIoResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            ImageIoError::LoadError(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path.display(),
            width,
            height,
            rgb.as_raw().len() as f32 / 1024.0
        );

        Self::new(width, height, rgb.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// RGB bytes at integer coordinates, clamped to the image bounds.
    ///
    /// Must not be called on an empty image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width.saturating_sub(1)) as usize;
        let y = y.min(self.height.saturating_sub(1)) as usize;
        let idx = (y * self.width as usize + x) * Self::BYTES_PER_PIXEL;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

/// Encode an RGB8 buffer to `path`; the format follows the file extension.
pub fn save_rgb8(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    data: &[u8],
) -> ImageIoResult<()> {
    let path = path.as_ref();
    image::save_buffer(path, data, width, height, image::ColorType::Rgb8).map_err(|e| {
        ImageIoError::SaveError(format!("Failed to write {}: {}", path.display(), e))
    })?;

    log::info!("Saved {}x{} image to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        assert!(ImageData::new(2, 2, vec![0; 12]).is_ok());

        let err = ImageData::new(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            ImageIoError::InvalidData {
                expected: 12,
                actual: 11,
                ..
            }
        ));
    }

    #[test]
    fn test_pixel_clamps_to_bounds() {
        let data = vec![
            1, 2, 3, 4, 5, 6, //
            7, 8, 9, 10, 11, 12,
        ];
        let image = ImageData::new(2, 2, data).unwrap();

        assert_eq!(image.pixel(0, 0), [1, 2, 3]);
        assert_eq!(image.pixel(1, 1), [10, 11, 12]);
        assert_eq!(image.pixel(5, 9), [10, 11, 12]);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = ImageData::load("definitely/not/here/earthmap.jpg").unwrap_err();
        assert!(matches!(err, ImageIoError::LoadError(_)));
        assert!(err.to_string().contains("earthmap.jpg"));
    }

    #[test]
    fn test_save_and_reload_png() {
        let path = std::env::temp_dir().join(format!("rayz_image_io_{}.png", std::process::id()));
        let data = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];

        save_rgb8(&path, 2, 2, &data).unwrap();
        let loaded = ImageData::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.width(), 2);
        assert_eq!(loaded.height(), 2);
        assert_eq!(loaded.pixel(1, 0), [0, 255, 0]);
    }
}
