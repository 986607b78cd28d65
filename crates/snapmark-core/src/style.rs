//! Colors, fonts and the current style settings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Serializable color representation (RGBA8, straight alpha).
///
/// Serialized as a `#rrggbbaa` hex string; `#rgb` and `#rrggbb` are accepted
/// on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn blue() -> Self {
        Self::new(0, 0, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(0..1)? * 17;
                let g = channel(1..2)? * 17;
                let b = channel(2..3)? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Some(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbbaa`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid hex color: {value}"))
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

/// Default font family for new text.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Default font size for new text in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;

/// Default blur radius for new blur regions.
pub const DEFAULT_BLUR_RADIUS: f64 = 5.0;

/// Default brush width.
pub const DEFAULT_BRUSH_SIZE: f64 = 5.0;

/// A font selection: family name plus pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec<'a> {
    pub family: &'a str,
    pub size: f64,
}

impl<'a> FontSpec<'a> {
    pub fn new(family: &'a str, size: f64) -> Self {
        Self { family, size }
    }
}

impl fmt::Display for FontSpec<'_> {
    /// CSS-style font string, e.g. `20px Arial`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// The style controls consulted when elements are created or restyled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Fill color for text and boxes.
    pub color: SerializableColor,
    pub font_family: String,
    pub font_size: f64,
    /// Outline color for text and boxes.
    pub border_color: SerializableColor,
    /// Outline width (0 = no outline).
    pub border_size: f64,
    pub blur_radius: f64,
    pub brush_size: f64,
    pub brush_color: SerializableColor,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            border_color: SerializableColor::black(),
            border_size: 0.0,
            blur_radius: DEFAULT_BLUR_RADIUS,
            brush_size: DEFAULT_BRUSH_SIZE,
            brush_color: SerializableColor::black(),
        }
    }
}

impl StyleSettings {
    /// The font new text would be created with.
    pub fn font(&self) -> FontSpec<'_> {
        FontSpec::new(&self.font_family, self.font_size)
    }
}
