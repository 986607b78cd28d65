//! Image element for overlaying raster images.

use super::{Bitmap, ElementId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An overlay image drawn scaled into its rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Decoded pixels; not part of the serialized form.
    #[serde(skip)]
    pub bitmap: Bitmap,
}

impl Image {
    /// Create an image element displayed at `width` x `height`.
    pub fn new(position: Point, width: f64, height: f64, bitmap: Bitmap) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            bitmap,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_rect_uses_display_size() {
        let bitmap = Bitmap::solid(400, 200, [255; 4]);
        let image = Image::new(Point::new(10.0, 10.0), 200.0, 100.0, bitmap);
        assert_eq!(image.as_rect(), Rect::new(10.0, 10.0, 210.0, 110.0));
        assert_eq!(image.bitmap.width(), 400);
    }
}
