//! Gaussian blur of a rectangular region.

use image::{imageops, RgbaImage};
use kurbo::Rect;
use tiny_skia::{IntRect, IntSize, Pixmap, PixmapPaint, Transform};

/// Pixel-aligned part of `rect` that lies on a `width` x `height` surface.
pub(crate) fn clip_to_surface(rect: Rect, width: u32, height: u32) -> Option<IntRect> {
    let rect = rect.abs();
    let x0 = rect.x0.floor().max(0.0);
    let y0 = rect.y0.floor().max(0.0);
    let x1 = rect.x1.ceil().min(width as f64);
    let y1 = rect.y1.ceil().min(height as f64);
    if !(x1 > x0 && y1 > y0) {
        return None;
    }
    IntRect::from_xywh(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32)
}

/// Blur the part of `source` under `rect` and draw it onto `target` at the
/// same place. A radius of zero or less copies the region unblurred.
///
/// Both pixmaps must be the same size. Returns whether anything was drawn.
pub fn blur_region(target: &mut Pixmap, source: &Pixmap, rect: Rect, radius: f64) -> bool {
    let Some(region) = clip_to_surface(rect, source.width(), source.height()) else {
        return false;
    };
    let Some(cropped) = source.clone_rect(region) else {
        return false;
    };

    let patch = if radius > 0.0 {
        match gaussian(&cropped, radius as f32) {
            Some(blurred) => blurred,
            None => return false,
        }
    } else {
        cropped
    };

    target.draw_pixmap(
        region.x(),
        region.y(),
        patch.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    true
}

/// Blur premultiplied pixels with `imageops::blur`.
///
/// Premultiplied channels blur without dark fringes at transparent edges.
fn gaussian(pixmap: &Pixmap, sigma: f32) -> Option<Pixmap> {
    let buffer = RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.data().to_vec())?;
    let mut data = imageops::blur(&buffer, sigma).into_raw();
    // Rounding can push a color channel past its alpha.
    for px in data.chunks_exact_mut(4) {
        let alpha = px[3];
        for channel in &mut px[..3] {
            *channel = (*channel).min(alpha);
        }
    }
    Pixmap::from_vec(data, IntSize::from_wh(pixmap.width(), pixmap.height())?)
}
