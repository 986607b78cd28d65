//! PNG export.

use crate::fonts::GlyphOutlines;
use crate::renderer::{RenderContext, RenderOptions, Renderer, RendererError, RenderResult};
use snapmark_core::Editor;
use tiny_skia::Pixmap;

/// Encode straight-alpha RGBA8 pixels as PNG.
pub fn encode_rgba_png(width: u32, height: u32, rgba: &[u8]) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(format!("PNG header: {}", e)))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| RendererError::Encode(format!("PNG data: {}", e)))?;
    }
    Ok(png_data)
}

/// Encode a rendered pixmap as PNG, converting back to straight alpha.
pub fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    encode_rgba_png(pixmap.width(), pixmap.height(), &rgba)
}

/// Render the editor's scene without selection decorations and encode it
/// as PNG.
///
/// The selection is restored afterwards and the editor is marked dirty so
/// the interactive view redraws with its decorations.
pub fn export_png<M: GlyphOutlines>(
    editor: &mut Editor<M>,
    renderer: &mut dyn Renderer,
) -> RenderResult<Vec<u8>> {
    export_png_with(editor, renderer, RenderOptions::default())
}

/// [`export_png`] with explicit render options.
pub fn export_png_with<M: GlyphOutlines>(
    editor: &mut Editor<M>,
    renderer: &mut dyn Renderer,
    options: RenderOptions,
) -> RenderResult<Vec<u8>> {
    let png = editor.with_selection_hidden(|editor| {
        renderer.render(&RenderContext::from_editor(editor).with_options(options))?;
        renderer.encode_png()
    })?;
    log::info!("Exported {} elements as PNG ({} bytes)", editor.scene().len(), png.len());
    Ok(png)
}
