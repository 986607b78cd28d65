//! Text element.

use super::ElementId;
use crate::style::{FontSpec, SerializableColor, StyleSettings, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single-line text label.
///
/// The font string is derived from `font_family` and `font_size` whenever it
/// is needed, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ElementId,
    /// Left end of the baseline.
    pub position: Point,
    pub content: String,
    pub font_family: String,
    /// Font size in pixels; also the height of the text's bounds.
    pub font_size: f64,
    pub color: SerializableColor,
    pub border_color: SerializableColor,
    /// Outline width (0 = no outline).
    pub border_size: f64,
}

impl Text {
    /// Create a text element with the default font and colors.
    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content: content.into(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            color: SerializableColor::black(),
            border_color: SerializableColor::black(),
            border_size: 0.0,
        }
    }

    /// Apply font and colors from the style settings.
    pub fn with_style(mut self, style: &StyleSettings) -> Self {
        self.font_family = style.font_family.clone();
        self.font_size = style.font_size;
        self.color = style.color;
        self.border_color = style.border_color;
        self.border_size = style.border_size.max(0.0);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn font(&self) -> FontSpec<'_> {
        FontSpec::new(&self.font_family, self.font_size)
    }

    /// CSS-style font string, e.g. `20px Arial`.
    pub fn font_string(&self) -> String {
        self.font().to_string()
    }

    /// Whether the outline should be drawn.
    pub fn has_border(&self) -> bool {
        self.border_size > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_creation() {
        let text = Text::new(Point::new(200.0, 150.0), "Hello");
        assert_eq!(text.content, "Hello");
        assert_eq!(text.font_size, 20.0);
        assert!(!text.has_border());
    }

    #[test]
    fn test_font_string_follows_size() {
        let mut text = Text::new(Point::ZERO, "x");
        text.font_size = 42.0;
        text.font_family = "Verdana".to_string();
        assert_eq!(text.font_string(), "42px Verdana");
    }

    #[test]
    fn test_with_style() {
        let style = StyleSettings {
            font_family: "Georgia".to_string(),
            font_size: 30.0,
            color: SerializableColor::new(255, 0, 0, 255),
            border_size: 2.0,
            ..StyleSettings::default()
        };
        let text = Text::new(Point::ZERO, "x").with_style(&style);
        assert_eq!(text.font_string(), "30px Georgia");
        assert_eq!(text.color, style.color);
        assert!(text.has_border());
    }
}
