//! Editor: scene, selection, style and interaction behind one API.

use crate::config::EditorConfig;
use crate::elements::{Bitmap, BlurRegion, Element, ElementId, Image, SolidBox, Text};
use crate::error::{DecodeError, EditorError, EditorResult};
use crate::geometry::{bounds, ApproximateMetrics, TextMeasure};
use crate::input::{InputState, KeyEvent, Modifiers, PointerEvent};
use crate::interaction::{CursorHint, Interaction, InteractionContext, InteractionState};
use crate::loader::{
    canvas_size_for, fit_base_image, fit_overlay, LoadOutcome, LoadPurpose, LoadTicket,
};
use crate::scene::Scene;
use crate::selection::Selection;
use crate::style::{SerializableColor, StyleSettings};
use kurbo::{Point, Rect, Size};

/// The annotation editor.
///
/// `M` measures text; every bounds query (hit testing, handles, centering)
/// goes through it, so the renderer should draw text with the same metrics.
pub struct Editor<M: TextMeasure = ApproximateMetrics> {
    config: EditorConfig,
    scene: Scene,
    selection: Selection,
    style: StyleSettings,
    input: InputState,
    interaction: Interaction,
    measure: M,
    /// Latest load generation per [`LoadPurpose`].
    load_generations: [u64; 2],
    dirty: bool,
}

impl Editor<ApproximateMetrics> {
    /// Create an editor that estimates text widths.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_measure(config, ApproximateMetrics)
    }
}

impl<M: TextMeasure> Editor<M> {
    /// Create an editor measuring text with `measure`.
    pub fn with_measure(config: EditorConfig, measure: M) -> Self {
        let canvas = Size::new(config.canvas_width.max(1.0), config.canvas_height.max(1.0));
        Self {
            scene: Scene::new(canvas),
            selection: Selection::new(),
            style: config.style.clone(),
            input: InputState::new(),
            interaction: Interaction::new(),
            measure,
            load_generations: [0; 2],
            dirty: true,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn style(&self) -> &StyleSettings {
        &self.style
    }

    /// Style settings for new elements. Changing them does not restyle the
    /// selection; use the `set_*` operations for that.
    pub fn style_mut(&mut self) -> &mut StyleSettings {
        &mut self.style
    }

    pub fn measure(&self) -> &M {
        &self.measure
    }

    pub fn cursor(&self) -> CursorHint {
        self.interaction.cursor()
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn brush_mode(&self) -> bool {
        self.interaction.brush_mode()
    }

    pub fn canvas_size(&self) -> Size {
        self.scene.canvas_size()
    }

    /// Bounds of the element at `index`.
    pub fn element_bounds(&self, index: usize) -> Option<Rect> {
        self.scene.get(index).map(|e| bounds(e, &self.measure))
    }

    /// Whether something changed since the last [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and reset the redraw flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // --- Input ---

    /// Process a pointer event. Returns `true` if a redraw is needed.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        self.input.handle_pointer_event(event);
        let mut cx = InteractionContext {
            scene: &mut self.scene,
            selection: &mut self.selection,
            measure: &self.measure,
            style: &self.style,
            modifiers: self.input.modifiers,
        };
        let changed = self.interaction.handle_pointer_event(&mut cx, event);
        self.dirty |= changed;
        changed
    }

    /// Process a key event. Delete and Backspace remove the selection.
    /// Returns `true` if a redraw is needed.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        self.input.handle_key_event(event);
        match event {
            KeyEvent::Pressed(key) if key.is_delete() && !self.selection.is_empty() => {
                self.delete_selected().is_ok()
            }
            _ => false,
        }
    }

    /// Replace the held modifier keys.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.input.set_modifiers(modifiers);
    }

    pub fn modifiers(&self) -> Modifiers {
        self.input.modifiers
    }

    // --- Adding elements ---

    /// Where new text, boxes and blur regions are placed.
    fn insertion_point(&self) -> Point {
        let canvas = self.scene.canvas_size();
        Point::new(canvas.width / 4.0, canvas.height / 4.0)
    }

    fn push(&mut self, element: impl Into<Element>) -> ElementId {
        let element = element.into();
        let id = element.id();
        self.scene.add(element);
        self.dirty = true;
        id
    }

    /// Add a text label with the current style. Blank content is rejected.
    pub fn add_text(&mut self, content: &str) -> Option<ElementId> {
        if content.trim().is_empty() {
            log::debug!("Ignoring blank text");
            return None;
        }
        let text = Text::new(self.insertion_point(), content).with_style(&self.style);
        Some(self.push(text))
    }

    /// Add a default-sized box with the current colors.
    pub fn add_box(&mut self) -> ElementId {
        let size = self.config.default_box_size;
        let solid_box = SolidBox::new(self.insertion_point(), size, size).with_style(&self.style);
        self.push(solid_box)
    }

    /// Add a default-sized blur region with the current blur radius.
    pub fn add_blur(&mut self) -> ElementId {
        let size = self.config.default_box_size;
        let blur = BlurRegion::new(self.insertion_point(), size, size).with_radius(self.style.blur_radius);
        self.push(blur)
    }

    /// Add an overlay image, scaled to fit and centered on the canvas.
    pub fn add_image(&mut self, bitmap: Bitmap) -> EditorResult<ElementId> {
        if bitmap.is_empty() {
            return Err(DecodeError::Empty.into());
        }
        let rect = fit_overlay(bitmap.size(), self.scene.canvas_size());
        let image = Image::new(rect.origin(), rect.width(), rect.height(), bitmap);
        Ok(self.push(image))
    }

    /// Replace the base image. The canvas takes the image's size, scaled
    /// down to fit the configured share of the viewport.
    pub fn set_base_image(&mut self, bitmap: Bitmap) -> EditorResult<Size> {
        if bitmap.is_empty() {
            return Err(DecodeError::Empty.into());
        }
        let (max_w, max_h) = self.config.base_image_limits();
        let fitted = fit_base_image(bitmap.size(), Size::new(max_w, max_h));
        let canvas = canvas_size_for(fitted);
        self.scene.set_canvas_size(canvas)?;
        log::debug!(
            "Base image {}x{} shown at {}x{}",
            bitmap.width(),
            bitmap.height(),
            canvas.width,
            canvas.height
        );
        self.scene.set_base_image(bitmap);
        self.dirty = true;
        Ok(canvas)
    }

    // --- Asynchronous loads ---

    /// Start a load. Any earlier pending load of the same purpose is
    /// superseded.
    pub fn begin_load(&mut self, purpose: LoadPurpose) -> LoadTicket {
        let slot = &mut self.load_generations[purpose.slot()];
        *slot += 1;
        LoadTicket {
            purpose,
            generation: *slot,
        }
    }

    /// Apply a finished decode. Stale tickets are ignored; decode failures
    /// leave the editor unchanged.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Bitmap, DecodeError>,
    ) -> EditorResult<LoadOutcome> {
        if ticket.generation != self.load_generations[ticket.purpose.slot()] {
            log::warn!("Discarding superseded {:?} load", ticket.purpose);
            return Ok(LoadOutcome::Superseded);
        }
        let bitmap = result.inspect_err(|err| log::warn!("Image decode failed: {err}"))?;
        match ticket.purpose {
            LoadPurpose::BaseImage => Ok(LoadOutcome::BaseImage {
                canvas_size: self.set_base_image(bitmap)?,
            }),
            LoadPurpose::Overlay => Ok(LoadOutcome::Overlay {
                id: self.add_image(bitmap)?,
            }),
        }
    }

    // --- Restyling ---

    /// Apply `f` to every selected element, counting the ones it touched.
    fn update_selected(&mut self, mut f: impl FnMut(&mut Element) -> bool) -> EditorResult<usize> {
        if self.selection.is_empty() {
            log::debug!("Nothing selected");
            return Err(EditorError::EmptySelection);
        }
        let mut updated = 0;
        for index in self.selection.iter() {
            if let Some(element) = self.scene.get_mut(index) {
                if f(element) {
                    updated += 1;
                }
            }
        }
        if updated > 0 {
            self.dirty = true;
        }
        Ok(updated)
    }

    /// Set the fill color of new elements and of selected text and boxes.
    pub fn set_color(&mut self, color: SerializableColor) -> EditorResult<usize> {
        self.style.color = color;
        self.update_selected(|element| match element {
            Element::Text(text) => {
                text.color = color;
                true
            }
            Element::Box(solid_box) => {
                solid_box.color = color;
                true
            }
            _ => false,
        })
    }

    /// Set the outline color of new elements and of selected text and
    /// boxes. Outlines that were off are switched on at width 1.
    pub fn set_border_color(&mut self, color: SerializableColor) -> EditorResult<usize> {
        self.style.border_color = color;
        let mut enabled = false;
        let result = self.update_selected(|element| {
            let (border_color, border_size) = match element {
                Element::Text(text) => (&mut text.border_color, &mut text.border_size),
                Element::Box(solid_box) => (&mut solid_box.border_color, &mut solid_box.border_size),
                _ => return false,
            };
            *border_color = color;
            if *border_size == 0.0 {
                *border_size = 1.0;
                enabled = true;
            }
            true
        });
        if enabled {
            self.style.border_size = 1.0;
        }
        result
    }

    /// Set the outline width of new elements and of selected text and boxes.
    pub fn set_border_size(&mut self, size: f64) -> EditorResult<usize> {
        let size = size.max(0.0);
        self.style.border_size = size;
        self.update_selected(|element| match element {
            Element::Text(text) => {
                text.border_size = size;
                true
            }
            Element::Box(solid_box) => {
                solid_box.border_size = size;
                true
            }
            _ => false,
        })
    }

    /// Set the radius of new blur regions and of selected ones.
    pub fn set_blur_radius(&mut self, radius: f64) -> EditorResult<usize> {
        let radius = radius.max(0.0);
        self.style.blur_radius = radius;
        self.update_selected(|element| match element {
            Element::Blur(blur) => {
                blur.blur_radius = radius;
                true
            }
            _ => false,
        })
    }

    pub fn set_brush_size(&mut self, size: f64) {
        self.style.brush_size = size.max(0.0);
    }

    pub fn set_brush_color(&mut self, color: SerializableColor) {
        self.style.brush_color = color;
    }

    /// Switch brush painting on or off. Returns the new mode.
    pub fn toggle_brush_mode(&mut self) -> bool {
        self.interaction.toggle_brush_mode()
    }

    // --- Alignment ---

    /// Center every selected element horizontally on the canvas.
    pub fn center_selected_x(&mut self) -> EditorResult<usize> {
        Self::require_selection(&self.selection)?;
        let center_x = self.scene.canvas_size().width / 2.0;
        for index in self.selection.iter() {
            if let Some(element) = self.scene.get_mut(index) {
                let width = bounds(element, &self.measure).width();
                let y = element.position().y;
                element.set_position(Point::new(center_x - width / 2.0, y));
            }
        }
        self.dirty = true;
        Ok(self.selection.len())
    }

    /// Center every selected element vertically on the canvas. Text is
    /// placed by its baseline, so its bounds end up centered.
    pub fn center_selected_y(&mut self) -> EditorResult<usize> {
        Self::require_selection(&self.selection)?;
        let center_y = self.scene.canvas_size().height / 2.0;
        for index in self.selection.iter() {
            if let Some(element) = self.scene.get_mut(index) {
                let height = bounds(element, &self.measure).height();
                let x = element.position().x;
                let y = match element {
                    Element::Text(_) => center_y + height / 2.0,
                    _ => center_y - height / 2.0,
                };
                element.set_position(Point::new(x, y));
            }
        }
        self.dirty = true;
        Ok(self.selection.len())
    }

    fn require_selection(selection: &Selection) -> EditorResult<()> {
        if selection.is_empty() {
            log::debug!("Nothing selected");
            Err(EditorError::EmptySelection)
        } else {
            Ok(())
        }
    }

    // --- Removal ---

    /// Remove every selected element and clear the selection.
    pub fn delete_selected(&mut self) -> EditorResult<usize> {
        Self::require_selection(&self.selection)?;
        let removed = self.scene.remove_indices(self.selection.iter());
        self.selection.clear();
        self.interaction.reset();
        self.dirty = true;
        log::debug!("Deleted {} elements", removed.len());
        Ok(removed.len())
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.dirty = true;
        }
    }

    /// Remove all elements, the base image and brush strokes once `confirm`
    /// agrees. Does nothing (and does not ask) when the canvas is empty.
    /// Pending loads are superseded. Returns whether anything was cleared.
    pub fn clear_canvas(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        if !self.scene.has_content() {
            return false;
        }
        if !confirm() {
            return false;
        }
        self.scene.clear();
        self.selection.clear();
        self.interaction.reset();
        for generation in &mut self.load_generations {
            *generation += 1;
        }
        self.dirty = true;
        log::debug!("Canvas cleared");
        true
    }

    // --- Export ---

    /// Run `f` with the selection hidden, then restore it.
    ///
    /// Used for export: the rendered output shows no selection decorations
    /// while the interactive view keeps its selection afterwards.
    pub fn with_selection_hidden<R>(&mut self, f: impl FnOnce(&Self) -> R) -> R {
        let saved = self.selection.snapshot();
        self.selection.clear();
        let result = f(self);
        self.selection.restore(saved);
        self.dirty = true;
        result
    }
}
