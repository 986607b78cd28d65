//! Font lookup, text measurement and glyph outlines.
//!
//! Faces are found through `fontdb` and shaped with `rusttype`. Font sizes
//! are em sizes in pixels, the way a canvas font string reads.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use kurbo::Point;
use rusttype::{point as rt_point, Font, OutlineBuilder, Scale};
use snapmark_core::geometry::{ApproximateMetrics, TextMeasure};
use snapmark_core::style::FontSpec;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tiny_skia::{Path, PathBuilder};

/// Text measurement that can also produce fillable glyph outlines.
pub trait GlyphOutlines: TextMeasure {
    /// Outline of `content` with its baseline starting at `origin`, or `None`
    /// when no glyphs can be drawn.
    fn text_path(&self, content: &str, font: &FontSpec<'_>, origin: Point) -> Option<Path>;
}

/// Approximate metrics draw nothing.
impl GlyphOutlines for ApproximateMetrics {
    fn text_path(&self, _content: &str, _font: &FontSpec<'_>, _origin: Point) -> Option<Path> {
        None
    }
}

/// Fonts from the system font directories plus any registered from bytes.
///
/// Lookups are cached per family name. A family that cannot be found falls
/// back to the sans-serif face, then to any loaded face; with no faces at
/// all, widths come from [`ApproximateMetrics`] and no glyphs are drawn.
pub struct SystemFonts {
    db: Database,
    cache: RefCell<HashMap<String, Option<Rc<Font<'static>>>>>,
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemFonts {
    /// Load the fonts installed on this system.
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces", db.len());
        Self::from_database(db)
    }

    /// A font set with no faces; add some with [`load_font_data`](Self::load_font_data).
    pub fn empty() -> Self {
        Self::from_database(Database::new())
    }

    fn from_database(db: Database) -> Self {
        Self {
            db,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Register a TrueType/OpenType font from memory.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
        self.cache.borrow_mut().clear();
    }

    /// Number of loaded faces.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    fn font(&self, family: &str) -> Option<Rc<Font<'static>>> {
        let family = family.trim().trim_matches(|c| c == '"' || c == '\'');
        if let Some(cached) = self.cache.borrow().get(family) {
            return cached.clone();
        }
        let font = self.lookup(family).map(Rc::new);
        if font.is_none() {
            log::warn!("No font face available for family '{}'", family);
        }
        self.cache.borrow_mut().insert(family.to_string(), font.clone());
        font
    }

    fn lookup(&self, family: &str) -> Option<Font<'static>> {
        let requested = match family.to_ascii_lowercase().as_str() {
            "sans-serif" => Family::SansSerif,
            "serif" => Family::Serif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            _ => Family::Name(family),
        };
        let id = self
            .db
            .query(&query(&[requested]))
            .or_else(|| self.db.query(&query(&[Family::SansSerif])))
            .or_else(|| self.db.faces().next().map(|face| face.id))?;

        self.db
            .with_face_data(id, |data, index| Font::try_from_vec_and_index(data.to_vec(), index))
            .flatten()
    }
}

fn query<'a>(families: &'a [Family<'a>]) -> Query<'a> {
    Query {
        families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    }
}

/// rusttype scale for an em size in pixels.
fn em_scale(font: &Font<'_>, size: f64) -> Scale {
    let metrics = font.v_metrics_unscaled();
    let units_per_em = f32::from(font.units_per_em().max(1));
    Scale::uniform(size as f32 * (metrics.ascent - metrics.descent) / units_per_em)
}

impl TextMeasure for SystemFonts {
    fn measure_text_width(&self, content: &str, font: &FontSpec<'_>) -> f64 {
        let Some(face) = self.font(font.family) else {
            return ApproximateMetrics.measure_text_width(content, font);
        };
        let scale = em_scale(&face, font.size);
        face.layout(content, scale, rt_point(0.0, 0.0))
            .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
            .fold(0.0_f32, f32::max) as f64
    }
}

impl GlyphOutlines for SystemFonts {
    fn text_path(&self, content: &str, font: &FontSpec<'_>, origin: Point) -> Option<Path> {
        let face = self.font(font.family)?;
        let scale = em_scale(&face, font.size);
        let mut sink = PathSink::default();
        for glyph in face.layout(content, scale, rt_point(origin.x as f32, origin.y as f32)) {
            let position = glyph.position();
            sink.offset = (position.x, position.y);
            glyph.unpositioned().build_outline(&mut sink);
        }
        sink.builder.finish()
    }
}

/// Collects glyph outlines (y-down, relative to the glyph origin) into a
/// tiny-skia path, shifted by the glyph's position.
#[derive(Default)]
struct PathSink {
    builder: PathBuilder,
    offset: (f32, f32),
}

impl OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x + self.offset.0, y + self.offset.1);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x + self.offset.0, y + self.offset.1);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (dx, dy) = self.offset;
        self.builder.quad_to(x1 + dx, y1 + dy, x + dx, y + dy);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (dx, dy) = self.offset;
        self.builder.cubic_to(x1 + dx, y1 + dy, x2 + dx, y2 + dy, x + dx, y + dy);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// A font set holding only the bundled Tuffy face.
#[cfg(test)]
pub(crate) fn tuffy() -> SystemFonts {
    let mut fonts = SystemFonts::empty();
    fonts.load_font_data(include_bytes!("../assets/Tuffy.ttf").to_vec());
    fonts
}
