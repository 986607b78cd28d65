//! SnapMark Render Library
//!
//! Renderer abstraction and raster collaborators for SnapMark: a tiny-skia
//! renderer with region blur, system font outlines, image decoding and
//! PNG export.

mod blur;
mod decode;
mod export;
mod fonts;
mod renderer;
mod skia_impl;

pub use blur::blur_region;
pub use decode::ImageCrateDecoder;
pub use export::{encode_png, encode_rgba_png, export_png, export_png_with};
pub use fonts::{GlyphOutlines, SystemFonts};
pub use renderer::{BlurSampling, RenderContext, RenderOptions, RenderResult, Renderer, RendererError};
pub use skia_impl::SkiaRenderer;
