//! Element bounds and text measurement.

use crate::elements::{Element, Text};
use crate::style::FontSpec;
use kurbo::{Point, Rect};

/// Width factor used by [`ApproximateMetrics`] for proportional fonts.
pub const DEFAULT_CHAR_WIDTH_FACTOR: f64 = 0.55;

/// Width factor used by [`ApproximateMetrics`] for monospace families.
pub const MONOSPACE_CHAR_WIDTH_FACTOR: f64 = 0.6;

/// Measures rendered text width for a font.
///
/// Implementations must return the same width for the same inputs: bounds,
/// hit testing and handles all depend on it.
pub trait TextMeasure {
    fn measure_text_width(&self, content: &str, font: &FontSpec<'_>) -> f64;
}

/// Font-free width estimate: widest line length times font size times a
/// per-family factor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMetrics;

impl ApproximateMetrics {
    fn width_factor(family: &str) -> f64 {
        let family = family.to_ascii_lowercase();
        if family.contains("mono") || family.contains("courier") || family.contains("consol") {
            MONOSPACE_CHAR_WIDTH_FACTOR
        } else {
            DEFAULT_CHAR_WIDTH_FACTOR
        }
    }
}

impl TextMeasure for ApproximateMetrics {
    fn measure_text_width(&self, content: &str, font: &FontSpec<'_>) -> f64 {
        let max_chars = content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        max_chars as f64 * font.size * Self::width_factor(font.family)
    }
}

/// Bounds of a text element: the box sits above-right of the baseline
/// origin, one font size tall and one measured width wide.
pub fn text_bounds(text: &Text, measure: &dyn TextMeasure) -> Rect {
    let width = measure.measure_text_width(&text.content, &text.font());
    Rect::from_origin_size(
        Point::new(text.position.x, text.position.y - text.font_size),
        (width, text.font_size),
    )
}

/// Axis-aligned bounding box of any element.
pub fn bounds(element: &Element, measure: &dyn TextMeasure) -> Rect {
    match element {
        Element::Text(text) => text_bounds(text, measure),
        Element::Box(solid_box) => solid_box.as_rect(),
        Element::Blur(blur) => blur.as_rect(),
        Element::Image(image) => image.as_rect(),
    }
}

/// Point-in-rect test that includes all four edges.
pub fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Every character is 10 units wide regardless of font.
#[cfg(test)]
pub(crate) struct FixedWidth;

#[cfg(test)]
impl TextMeasure for FixedWidth {
    fn measure_text_width(&self, content: &str, _font: &FontSpec<'_>) -> f64 {
        content.chars().count() as f64 * 10.0
    }
}
