// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading and PNG export.
//!
//! Background images are decoded off the UI thread and handed over as
//! raw RGBA pixels, ready for an egui texture. Undo history keeps drawn
//! layers as in-memory PNG bytes.

use crate::models::tool::FieldKind;
use anyhow::{Context, Result};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageResult, RgbaImage};
use std::path::Path;

/// A decoded background image.
pub struct LoadedImage {
    pub kind: FieldKind,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    pub fn into_rgba(self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels)
    }
}

/// Decode an image file into RGBA pixels.
pub fn load_image(path: &Path, kind: FieldKind) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(LoadedImage {
        kind,
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// Write a raster as PNG.
pub fn save_png(img: &RgbaImage, path: &Path) -> ImageResult<()> {
    img.save_with_format(path, ImageFormat::Png)
}

/// Compress a raster into PNG bytes.
pub fn encode_png(img: &RgbaImage) -> ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new_with_quality(&mut bytes, CompressionType::Default, FilterType::Adaptive).write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Inverse of [`encode_png`].
pub fn decode_png(bytes: &[u8]) -> ImageResult<RgbaImage> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_save_then_load_keeps_pixels() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([10, 20, 30, 255]));
        let path = std::env::temp_dir().join(format!("taktiktafel_media_{}.png", std::process::id()));
        save_png(&img, &path).unwrap();

        let loaded = load_image(&path, FieldKind::Half).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.kind, FieldKind::Half);
        assert_eq!((loaded.width, loaded.height), (3, 2));
        assert_eq!(loaded.into_rgba().unwrap(), img);
    }

    #[test]
    fn test_encoded_layer_decodes_exactly() {
        let mut img = RgbaImage::new(64, 32);
        img.put_pixel(5, 6, Rgba([229, 57, 53, 255]));
        img.put_pixel(40, 20, Rgba([10, 20, 30, 128]));

        let bytes = encode_png(&img).unwrap();
        assert!(bytes.len() < img.as_raw().len());
        assert_eq!(decode_png(&bytes).unwrap(), img);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_image(Path::new("/nonexistent/field.png"), FieldKind::Full).is_err());
    }
}
