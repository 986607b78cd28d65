//! Scene: the ordered element list, base image and paint layer.

use crate::elements::{Bitmap, Element, ElementId};
use crate::error::{EditorError, EditorResult};
use crate::style::SerializableColor;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// One straight piece of a freehand brush stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSegment {
    pub from: Point,
    pub to: Point,
    pub width: f64,
    pub color: SerializableColor,
}

/// Everything that gets painted: base image, brush strokes and elements.
///
/// Element order is paint order: the last element is topmost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    elements: Vec<Element>,
    /// Drawn at the origin, stretched to the canvas size.
    #[serde(skip)]
    base_image: Option<Bitmap>,
    canvas_size: Size,
    /// Brush strokes, painted over the base image and under all elements.
    paint: Vec<BrushSegment>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(canvas_size: Size) -> Self {
        Self {
            elements: Vec::new(),
            base_image: None,
            canvas_size,
            paint: Vec::new(),
        }
    }

    /// Append an element on top and return its index.
    pub fn add(&mut self, element: impl Into<Element>) -> usize {
        let element = element.into();
        log::debug!("Adding {} element {}", element.kind(), element.id());
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    /// Current index of the element with `id`.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Elements in paint order (bottom to top).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Remove the elements at `indices`, highest index first so earlier
    /// removals never shift later ones. Out-of-range and duplicate indices
    /// are ignored. Returns the removed elements, highest index first.
    pub fn remove_indices(&mut self, indices: impl IntoIterator<Item = usize>) -> Vec<Element> {
        let mut indices: Vec<usize> = indices.into_iter().collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();

        let mut removed = Vec::with_capacity(indices.len());
        for index in indices {
            if index < self.elements.len() {
                let element = self.elements.remove(index);
                log::debug!("Removed {} element {}", element.kind(), element.id());
                removed.push(element);
            }
        }
        removed
    }

    pub fn base_image(&self) -> Option<&Bitmap> {
        self.base_image.as_ref()
    }

    pub fn set_base_image(&mut self, bitmap: Bitmap) {
        self.base_image = Some(bitmap);
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Resize the canvas. Sizes below one pixel or non-finite are rejected.
    pub fn set_canvas_size(&mut self, size: Size) -> EditorResult<()> {
        if !(size.width.is_finite() && size.height.is_finite()) || size.width < 1.0 || size.height < 1.0 {
            return Err(EditorError::InvalidGeometry {
                width: size.width,
                height: size.height,
            });
        }
        self.canvas_size = size;
        Ok(())
    }

    /// Brush strokes in the order they were painted.
    pub fn paint(&self) -> &[BrushSegment] {
        &self.paint
    }

    pub fn add_paint(&mut self, segment: BrushSegment) {
        self.paint.push(segment);
    }

    /// Whether there is anything on the canvas at all.
    pub fn has_content(&self) -> bool {
        !self.elements.is_empty() || self.base_image.is_some() || !self.paint.is_empty()
    }

    /// Remove all elements, the base image and brush strokes. The canvas
    /// size is kept.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.base_image = None;
        self.paint.clear();
    }

    /// Serialize the scene description (without pixel data) to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}
