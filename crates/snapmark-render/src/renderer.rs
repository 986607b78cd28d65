//! Renderer trait abstraction.

use crate::fonts::GlyphOutlines;
use snapmark_core::style::SerializableColor;
use snapmark_core::{Editor, Scene, Selection};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Where blur regions take their pixels from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlurSampling {
    /// The base image and paint layer only, captured before any element is
    /// drawn. Elements under a blur region stay sharp.
    #[default]
    BaseLayer,
    /// Everything painted so far, including earlier elements.
    PaintedBelow,
}

/// Options that change how a frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub blur_sampling: BlurSampling,
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Indices to decorate with a selection outline and handles.
    pub selection: &'a Selection,
    /// Text metrics and glyph outlines.
    pub fonts: &'a dyn GlyphOutlines,
    /// Selection outline and handle stroke color.
    pub selection_color: SerializableColor,
    pub options: RenderOptions,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(scene: &'a Scene, selection: &'a Selection, fonts: &'a dyn GlyphOutlines) -> Self {
        Self {
            scene,
            selection,
            fonts,
            selection_color: SerializableColor::blue(),
            options: RenderOptions::default(),
        }
    }

    /// Context for the editor's current state, using its fonts and
    /// configured selection color.
    pub fn from_editor<M: GlyphOutlines>(editor: &'a Editor<M>) -> Self {
        Self::new(editor.scene(), editor.selection(), editor.measure())
            .with_selection_color(editor.config().selection_color)
    }

    /// Set the selection highlight color.
    pub fn with_selection_color(mut self, color: SerializableColor) -> Self {
        self.selection_color = color;
        self
    }

    /// Set the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Set where blur regions sample from.
    pub fn with_blur_sampling(mut self, sampling: BlurSampling) -> Self {
        self.options.blur_sampling = sampling;
        self
    }
}

/// Trait for rendering backends.
///
/// Every call to [`render`](Renderer::render) redraws the whole frame from
/// the context; nothing from the previous frame is kept except caches.
pub trait Renderer: Send + Sync {
    /// Draw a frame.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Encode the last rendered frame as PNG.
    fn encode_png(&self) -> RenderResult<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapmark_core::geometry::ApproximateMetrics;
    use snapmark_core::EditorConfig;

    #[test]
    fn test_context_defaults() {
        let scene = Scene::default();
        let selection = Selection::new();
        let ctx = RenderContext::new(&scene, &selection, &ApproximateMetrics);
        assert_eq!(ctx.selection_color, SerializableColor::blue());
        assert_eq!(ctx.options.blur_sampling, BlurSampling::BaseLayer);

        let ctx = ctx.with_blur_sampling(BlurSampling::PaintedBelow);
        assert_eq!(ctx.options.blur_sampling, BlurSampling::PaintedBelow);
    }

    #[test]
    fn test_context_from_editor_uses_configured_color() {
        let config = EditorConfig {
            selection_color: SerializableColor::new(255, 0, 0, 255),
            ..Default::default()
        };
        let editor = Editor::new(config);
        let ctx = RenderContext::from_editor(&editor);
        assert_eq!(ctx.selection_color, SerializableColor::new(255, 0, 0, 255));
        assert!(ctx.selection.is_empty());
    }
}
