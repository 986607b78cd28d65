//! Image decoding through the `image` crate.

use image::ImageError;
use snapmark_core::elements::Bitmap;
use snapmark_core::error::DecodeError;
use snapmark_core::loader::ImageDecoder;

/// Decodes PNG, JPEG and WebP into straight-alpha RGBA8 bitmaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let decoded = image::load_from_memory(bytes).map_err(|err| {
            log::warn!("Failed to decode image: {}", err);
            match err {
                ImageError::Unsupported(_) => DecodeError::Unsupported,
                other => DecodeError::Malformed(other.to_string()),
            }
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("Decoded {}x{} image", width, height);
        Bitmap::from_rgba8(width, height, rgba.into_raw())
            .ok_or_else(|| DecodeError::Malformed("pixel buffer size mismatch".to_string()))
    }
}
