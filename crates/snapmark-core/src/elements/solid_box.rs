//! Solid filled box.

use super::ElementId;
use crate::style::{SerializableColor, StyleSettings};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A filled rectangle with an optional outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidBox {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub color: SerializableColor,
    pub border_color: SerializableColor,
    /// Outline width (0 = no outline).
    pub border_size: f64,
}

impl SolidBox {
    /// Create a black box without outline.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            color: SerializableColor::black(),
            border_color: SerializableColor::black(),
            border_size: 0.0,
        }
    }

    /// Apply colors and outline width from the style settings.
    pub fn with_style(mut self, style: &StyleSettings) -> Self {
        self.color = style.color;
        self.border_color = style.border_color;
        self.border_size = style.border_size.max(0.0);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }

    pub fn has_border(&self) -> bool {
        self.border_size > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_rect() {
        let b = SolidBox::new(Point::new(200.0, 150.0), 100.0, 50.0);
        assert_eq!(b.as_rect(), Rect::new(200.0, 150.0, 300.0, 200.0));
    }

    #[test]
    fn test_with_style_clamps_border() {
        let style = StyleSettings {
            border_size: -3.0,
            ..StyleSettings::default()
        };
        let b = SolidBox::new(Point::ZERO, 10.0, 10.0).with_style(&style);
        assert_eq!(b.border_size, 0.0);
        assert!(!b.has_border());
    }
}
