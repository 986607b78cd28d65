//! Element definitions for the annotation scene.

mod bitmap;
mod blur;
mod image;
mod solid_box;
mod text;

pub use bitmap::{Bitmap, BitmapId};
pub use blur::BlurRegion;
pub use image::Image;
pub use solid_box::SolidBox;
pub use text::Text;

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Minimum width and height an element can be resized to.
pub const MIN_ELEMENT_SIZE: f64 = 10.0;

/// One visual object on the canvas.
///
/// The variant decides which fields exist: a blur region has no color and a
/// box has no blur radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Element {
    Text(Text),
    Box(SolidBox),
    Blur(BlurRegion),
    Image(Image),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Text(e) => e.id(),
            Element::Box(e) => e.id(),
            Element::Blur(e) => e.id(),
            Element::Image(e) => e.id(),
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::Box(_) => "box",
            Element::Blur(_) => "blur",
            Element::Image(_) => "image",
        }
    }

    /// Anchor position: the baseline origin for text, the top-left corner otherwise.
    pub fn position(&self) -> Point {
        match self {
            Element::Text(e) => e.position,
            Element::Box(e) => e.position,
            Element::Blur(e) => e.position,
            Element::Image(e) => e.position,
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Element::Text(e) => e.position = position,
            Element::Box(e) => e.position = position,
            Element::Blur(e) => e.position = position,
            Element::Image(e) => e.position = position,
        }
    }

    /// Move the element by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        let position = self.position() + delta;
        self.set_position(position);
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_box(&self) -> Option<&SolidBox> {
        match self {
            Element::Box(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_blur(&self) -> Option<&BlurRegion> {
        match self {
            Element::Blur(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Element::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Text> for Element {
    fn from(text: Text) -> Self {
        Element::Text(text)
    }
}

impl From<SolidBox> for Element {
    fn from(solid_box: SolidBox) -> Self {
        Element::Box(solid_box)
    }
}

impl From<BlurRegion> for Element {
    fn from(blur: BlurRegion) -> Self {
        Element::Blur(blur)
    }
}

impl From<Image> for Element {
    fn from(image: Image) -> Self {
        Element::Image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_moves_anchor() {
        let mut element = Element::from(SolidBox::new(Point::new(10.0, 20.0), 100.0, 50.0));
        element.translate(Vec2::new(5.0, -5.0));
        assert_eq!(element.position(), Point::new(15.0, 15.0));

        let mut text = Element::from(Text::new(Point::new(0.0, 40.0), "hi"));
        text.translate(Vec2::new(1.0, 1.0));
        assert_eq!(text.position(), Point::new(1.0, 41.0));
    }

    #[test]
    fn test_variant_accessors() {
        let blur = Element::from(BlurRegion::new(Point::ZERO, 100.0, 100.0));
        assert_eq!(blur.kind(), "blur");
        assert!(blur.as_blur().is_some());
        assert!(blur.as_box().is_none());
        assert!(blur.as_text().is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = SolidBox::new(Point::ZERO, 10.0, 10.0);
        let b = SolidBox::new(Point::ZERO, 10.0, 10.0);
        assert_ne!(a.id(), b.id());
    }
}
