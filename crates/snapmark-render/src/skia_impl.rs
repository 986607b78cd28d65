//! CPU renderer built on tiny-skia.

use crate::blur::blur_region;
use crate::export::encode_png;
use crate::renderer::{BlurSampling, RenderContext, Renderer, RendererError, RenderResult};
use kurbo::Rect;
use snapmark_core::elements::{Bitmap, BitmapId, BlurRegion, Element, Image, SolidBox, Text};
use snapmark_core::style::SerializableColor;
use snapmark_core::{bounds, handle_points, BrushSegment, Scene};
use std::collections::{HashMap, HashSet};
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap,
    PixmapPaint, Stroke, Transform,
};

/// Selection outline width and its gap around the element bounds.
const SELECTION_STROKE_WIDTH: f32 = 2.0;
const SELECTION_PADDING: f64 = 2.0;

/// Renders scenes into an RGBA pixmap the size of the canvas.
#[derive(Default)]
pub struct SkiaRenderer {
    surface: Option<Pixmap>,
    /// Premultiplied copies of decoded bitmaps, keyed by bitmap id.
    image_cache: HashMap<BitmapId, Pixmap>,
}

impl SkiaRenderer {
    /// Create a new renderer. The surface is allocated on the first render.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last rendered frame.
    pub fn surface(&self) -> Option<&Pixmap> {
        self.surface.as_ref()
    }

    /// Number of bitmaps currently cached.
    pub fn cached_images(&self) -> usize {
        self.image_cache.len()
    }

    /// Reuse the current surface when the size matches, cleared; otherwise
    /// allocate a new one.
    fn take_surface(&mut self, width: u32, height: u32) -> RenderResult<Pixmap> {
        match self.surface.take() {
            Some(mut surface) if surface.width() == width && surface.height() == height => {
                surface.fill(Color::TRANSPARENT);
                Ok(surface)
            }
            _ => Pixmap::new(width, height)
                .ok_or_else(|| RendererError::Surface(format!("cannot allocate {}x{} surface", width, height))),
        }
    }

    /// Drop cached pixmaps for bitmaps the scene no longer references.
    fn evict_unreferenced(&mut self, scene: &Scene) {
        let referenced: HashSet<BitmapId> = scene
            .base_image()
            .into_iter()
            .chain(scene.elements().iter().filter_map(|e| e.as_image().map(|img| &img.bitmap)))
            .map(Bitmap::id)
            .collect();
        let before = self.image_cache.len();
        self.image_cache.retain(|id, _| referenced.contains(id));
        if self.image_cache.len() != before {
            log::debug!("Evicted {} cached images", before - self.image_cache.len());
        }
    }

    fn cached_pixmap(&mut self, bitmap: &Bitmap) -> Option<&Pixmap> {
        if !self.image_cache.contains_key(&bitmap.id()) {
            let pixmap = bitmap_to_pixmap(bitmap)?;
            self.image_cache.insert(bitmap.id(), pixmap);
        }
        self.image_cache.get(&bitmap.id())
    }

    fn render_base_image(&mut self, surface: &mut Pixmap, scene: &Scene) {
        let Some(base) = scene.base_image() else {
            return;
        };
        let canvas = Rect::from_origin_size((0.0, 0.0), scene.canvas_size());
        if let Some(pixmap) = self.cached_pixmap(base) {
            draw_scaled(surface, pixmap, canvas);
        }
    }

    fn render_image(&mut self, surface: &mut Pixmap, image: &Image) {
        if image.bitmap.is_empty() {
            log::trace!("Skipping image {} without pixels", image.id());
            return;
        }
        if let Some(pixmap) = self.cached_pixmap(&image.bitmap) {
            draw_scaled(surface, pixmap, image.as_rect());
        }
    }
}

impl Renderer for SkiaRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let size = ctx.scene.canvas_size();
        let width = size.width.ceil().max(1.0) as u32;
        let height = size.height.ceil().max(1.0) as u32;
        let mut surface = self.take_surface(width, height)?;

        self.evict_unreferenced(ctx.scene);
        self.render_base_image(&mut surface, ctx.scene);
        for segment in ctx.scene.paint() {
            render_brush_segment(&mut surface, segment);
        }

        let base_layer = match ctx.options.blur_sampling {
            BlurSampling::BaseLayer => Some(surface.clone()),
            BlurSampling::PaintedBelow => None,
        };

        for element in ctx.scene.elements() {
            match element {
                Element::Blur(blur) => render_blur(&mut surface, base_layer.as_ref(), blur),
                Element::Box(solid) => render_box(&mut surface, solid),
                Element::Text(text) => render_text(&mut surface, ctx, text),
                Element::Image(image) => self.render_image(&mut surface, image),
            }
        }

        let color = ctx.selection_color;
        for index in ctx.selection.iter() {
            if let Some(element) = ctx.scene.get(index) {
                render_selection_decorations(&mut surface, bounds(element, ctx.fonts), color);
            }
        }

        self.surface = Some(surface);
        Ok(())
    }

    fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let surface = self
            .surface
            .as_ref()
            .ok_or_else(|| RendererError::Surface("nothing has been rendered".to_string()))?;
        encode_png(surface)
    }
}

fn to_color(color: SerializableColor) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn solid_paint(color: SerializableColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_color(color));
    paint.anti_alias = true;
    paint
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(
        rect.x0 as f32,
        rect.y0 as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Premultiply a straight-alpha bitmap into a pixmap.
fn bitmap_to_pixmap(bitmap: &Bitmap) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(bitmap.width(), bitmap.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(bitmap.pixels().chunks_exact(4)) {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Some(pixmap)
}

/// Draw `pixmap` stretched into `dest`.
fn draw_scaled(surface: &mut Pixmap, pixmap: &Pixmap, dest: Rect) {
    if dest.width() <= 0.0 || dest.height() <= 0.0 {
        return;
    }
    let sx = dest.width() / pixmap.width() as f64;
    let sy = dest.height() / pixmap.height() as f64;
    let transform = Transform::from_row(sx as f32, 0.0, 0.0, sy as f32, dest.x0 as f32, dest.y0 as f32);
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    surface.draw_pixmap(0, 0, pixmap.as_ref(), &paint, transform, None);
}

fn render_brush_segment(surface: &mut Pixmap, segment: &BrushSegment) {
    let mut pb = PathBuilder::new();
    pb.move_to(segment.from.x as f32, segment.from.y as f32);
    pb.line_to(segment.to.x as f32, segment.to.y as f32);
    let Some(path) = pb.finish() else {
        return;
    };
    let stroke = Stroke {
        width: segment.width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    surface.stroke_path(&path, &solid_paint(segment.color), &stroke, Transform::identity(), None);
}

fn render_blur(surface: &mut Pixmap, base_layer: Option<&Pixmap>, blur: &BlurRegion) {
    let drawn = match base_layer {
        Some(source) => blur_region(surface, source, blur.as_rect(), blur.blur_radius),
        None => {
            let below = surface.clone();
            blur_region(surface, &below, blur.as_rect(), blur.blur_radius)
        }
    };
    if !drawn {
        log::trace!("Blur region {} is off the surface", blur.id());
    }
}

fn render_box(surface: &mut Pixmap, solid: &SolidBox) {
    let Some(rect) = skia_rect(solid.as_rect()) else {
        return;
    };
    surface.fill_rect(rect, &solid_paint(solid.color), Transform::identity(), None);
    if solid.has_border() {
        let stroke = Stroke {
            width: solid.border_size as f32,
            ..Default::default()
        };
        surface.stroke_path(
            &PathBuilder::from_rect(rect),
            &solid_paint(solid.border_color),
            &stroke,
            Transform::identity(),
            None,
        );
    }
}

fn render_text(surface: &mut Pixmap, ctx: &RenderContext, text: &Text) {
    let Some(path) = ctx.fonts.text_path(&text.content, &text.font(), text.position) else {
        return;
    };
    if text.has_border() {
        let stroke = Stroke {
            width: text.border_size as f32,
            ..Default::default()
        };
        surface.stroke_path(&path, &solid_paint(text.border_color), &stroke, Transform::identity(), None);
    }
    surface.fill_path(&path, &solid_paint(text.color), FillRule::Winding, Transform::identity(), None);
}

fn render_selection_decorations(surface: &mut Pixmap, bounds: Rect, color: SerializableColor) {
    let stroke = Stroke {
        width: SELECTION_STROKE_WIDTH,
        ..Default::default()
    };
    let outline = bounds.inflate(SELECTION_PADDING, SELECTION_PADDING);
    if let Some(rect) = skia_rect(outline) {
        surface.stroke_path(&PathBuilder::from_rect(rect), &solid_paint(color), &stroke, Transform::identity(), None);
    }

    let fill = solid_paint(SerializableColor::white());
    let border = solid_paint(color);
    for handle in handle_points(bounds) {
        let Some(rect) = skia_rect(handle.rect()) else {
            continue;
        };
        surface.fill_rect(rect, &fill, Transform::identity(), None);
        surface.stroke_path(&PathBuilder::from_rect(rect), &border, &stroke, Transform::identity(), None);
    }
}
