//! Decoded raster images shared between elements and the renderer.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identifier of a decoded bitmap, used as the renderer's cache key.
pub type BitmapId = Uuid;

/// A decoded RGBA8 image with straight (non-premultiplied) alpha.
///
/// Cloning is cheap: the pixel buffer is shared.
#[derive(Clone)]
pub struct Bitmap {
    id: BitmapId,
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl Bitmap {
    /// Wrap an RGBA8 buffer. Returns `None` if the buffer length does not
    /// match `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if pixels.len() != expected {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// A single-color bitmap.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            id: Uuid::new_v4(),
            width,
            height,
            pixels: pixels.into(),
        }
    }

    pub fn id(&self) -> BitmapId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Natural size as floating point.
    pub fn size(&self) -> kurbo::Size {
        kurbo::Size::new(self.width as f64, self.height as f64)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        Self::solid(0, 0, [0, 0, 0, 0])
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba8_checks_length() {
        assert!(Bitmap::from_rgba8(2, 2, vec![0; 16]).is_some());
        assert!(Bitmap::from_rgba8(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_solid_fills_every_pixel() {
        let bitmap = Bitmap::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(bitmap.pixels().len(), 24);
        assert!(bitmap.pixels().chunks(4).all(|px| px == [1, 2, 3, 4]));
        assert!(!bitmap.is_empty());
        assert!(Bitmap::default().is_empty());
    }

    #[test]
    fn test_clone_shares_identity() {
        let bitmap = Bitmap::solid(1, 1, [0; 4]);
        let copy = bitmap.clone();
        assert_eq!(bitmap, copy);
        assert_ne!(bitmap, Bitmap::solid(1, 1, [0; 4]));
    }
}
