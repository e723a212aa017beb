use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use super::ScanError;

pub const UPSCALE_FACTOR: u32 = 2;
/// Intensity the contrast stretch pivots around.
pub const CONTRAST_MIDPOINT: f32 = 128.0;
pub const CONTRAST_FACTOR: f32 = 1.5;
/// Upper bound on either side of the upscaled image.
pub const MAX_DIMENSION: u32 = 8192;

/// Upscales, grays and contrast-stretches a poster, returning PNG bytes
/// suited to the recognizer.
pub fn normalize_contrast(bytes: &[u8]) -> Result<Vec<u8>, ScanError> {
    let decoded = image::load_from_memory(bytes)?;

    let width = scaled(decoded.width())?;
    let height = scaled(decoded.height())?;

    let mut gray = decoded
        .resize_exact(width, height, FilterType::Triangle)
        .into_luma8();
    for pixel in gray.pixels_mut() {
        pixel.0[0] = stretch(pixel.0[0]);
    }

    let mut encoded = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(gray).write_to(&mut encoded, ImageFormat::Png)?;
    Ok(encoded.into_inner())
}

fn scaled(side: u32) -> Result<u32, ScanError> {
    side.checked_mul(UPSCALE_FACTOR)
        .filter(|value| *value <= MAX_DIMENSION)
        .ok_or(ScanError::TooLarge)
}

fn stretch(value: u8) -> u8 {
    let remapped = (f32::from(value) - CONTRAST_MIDPOINT) * CONTRAST_FACTOR + CONTRAST_MIDPOINT;
    remapped.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn png_of(width: u32, height: u32, shade: u8) -> Vec<u8> {
        let img = GrayImage::from_pixel(width, height, Luma([shade]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_stretch_pivots_on_midpoint() {
        assert_eq!(stretch(128), 128);
        assert_eq!(stretch(200), 236);
        assert_eq!(stretch(40), 0);
        assert_eq!(stretch(255), 255);
    }

    #[test]
    fn test_output_is_upscaled_and_stretched() {
        let png = normalize_contrast(&png_of(4, 3, 200)).unwrap();
        let out = image::load_from_memory(&png).unwrap().into_luma8();

        assert_eq!(out.dimensions(), (8, 6));
        assert_eq!(out.get_pixel(0, 0).0[0], 236);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = normalize_contrast(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ScanError::Decode(_)));
    }
}
