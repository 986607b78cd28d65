//! Pointer interaction state machine: select, drag, resize and brush.

use crate::geometry::{bounds, TextMeasure};
use crate::handles::{apply_bounds, resize_rect, HandlePosition};
use crate::hit_test::{element_at, resize_handle_at};
use crate::input::{Modifiers, PointerEvent};
use crate::scene::{BrushSegment, Scene};
use crate::selection::Selection;
use crate::style::StyleSettings;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Cursor the shell should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorHint {
    #[default]
    Default,
    /// Over an element: it can be dragged.
    Move,
    /// Diagonal resize (nw/se handles).
    ResizeNwse,
    /// Diagonal resize (ne/sw handles).
    ResizeNesw,
    /// Vertical resize (n/s handles).
    ResizeNs,
    /// Horizontal resize (e/w handles).
    ResizeEw,
    /// Brush mode.
    Crosshair,
}

/// State of the select/drag/resize interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Moving the selection; `last` is the previous pointer position.
    Dragging { last: Point },
    /// Resizing one element from one handle.
    Resizing {
        index: usize,
        handle: HandlePosition,
        /// Pointer position when the resize started.
        start: Point,
        /// Element bounds when the resize started.
        anchor: Rect,
    },
}

/// Everything a pointer event may read or change.
pub struct InteractionContext<'a> {
    pub scene: &'a mut Scene,
    pub selection: &'a mut Selection,
    pub measure: &'a dyn TextMeasure,
    pub style: &'a StyleSettings,
    pub modifiers: Modifiers,
}

/// Converts pointer events into scene and selection changes.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: InteractionState,
    cursor: CursorHint,
    brush_mode: bool,
    /// Previous point of the stroke being painted.
    brush_last: Option<Point>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn brush_mode(&self) -> bool {
        self.brush_mode
    }

    /// Switch brush mode on or off. Any in-flight drag, resize or stroke ends.
    pub fn toggle_brush_mode(&mut self) -> bool {
        self.brush_mode = !self.brush_mode;
        self.state = InteractionState::Idle;
        self.brush_last = None;
        self.cursor = if self.brush_mode {
            CursorHint::Crosshair
        } else {
            CursorHint::Default
        };
        log::debug!("Brush mode {}", if self.brush_mode { "on" } else { "off" });
        self.brush_mode
    }

    /// Drop any in-flight drag or resize.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Process a pointer event. Returns `true` when the scene or selection
    /// changed and a redraw is needed.
    pub fn handle_pointer_event(&mut self, cx: &mut InteractionContext<'_>, event: &PointerEvent) -> bool {
        if self.brush_mode {
            return self.handle_brush_event(cx, event);
        }
        match *event {
            PointerEvent::Down { position } => self.pointer_down(cx, position),
            PointerEvent::Move { position } => {
                let changed = self.pointer_move(cx, position);
                self.cursor = self.cursor_at(cx, position);
                changed
            }
            PointerEvent::Up { .. } => {
                self.state = InteractionState::Idle;
                false
            }
            // Only pointer-up ends a drag or resize.
            PointerEvent::Leave => false,
        }
    }

    fn pointer_down(&mut self, cx: &mut InteractionContext<'_>, position: Point) -> bool {
        if let Some(hit) = resize_handle_at(cx.scene, cx.selection, cx.measure, position) {
            if let Some(element) = cx.scene.get(hit.index) {
                let anchor = bounds(element, cx.measure);
                log::trace!("Resize {:?} of element {} from {:?}", hit.position, hit.index, anchor);
                self.state = InteractionState::Resizing {
                    index: hit.index,
                    handle: hit.position,
                    start: position,
                    anchor,
                };
                return false;
            }
        }

        if let Some(index) = element_at(cx.scene, cx.measure, position) {
            cx.selection.toggle(index, cx.modifiers.shift);
            self.state = InteractionState::Dragging { last: position };
            log::trace!("Drag start on element {}, selection {:?}", index, cx.selection);
            return true;
        }

        if !cx.modifiers.shift && !cx.selection.is_empty() {
            cx.selection.clear();
            return true;
        }
        false
    }

    fn pointer_move(&mut self, cx: &mut InteractionContext<'_>, position: Point) -> bool {
        match self.state {
            InteractionState::Idle => false,
            InteractionState::Dragging { last } => {
                let delta = position - last;
                for index in cx.selection.iter() {
                    if let Some(element) = cx.scene.get_mut(index) {
                        element.translate(delta);
                    }
                }
                self.state = InteractionState::Dragging { last: position };
                !cx.selection.is_empty()
            }
            InteractionState::Resizing {
                index,
                handle,
                start,
                anchor,
            } => {
                let Some(element) = cx.scene.get_mut(index) else {
                    self.state = InteractionState::Idle;
                    return false;
                };
                apply_bounds(element, resize_rect(anchor, handle, position - start));
                true
            }
        }
    }

    /// Cursor for the pointer at `position`, independent of state.
    fn cursor_at(&self, cx: &InteractionContext<'_>, position: Point) -> CursorHint {
        if let Some(hit) = resize_handle_at(cx.scene, cx.selection, cx.measure, position) {
            hit.position.cursor()
        } else if element_at(cx.scene, cx.measure, position).is_some() {
            CursorHint::Move
        } else {
            CursorHint::Default
        }
    }

    fn handle_brush_event(&mut self, cx: &mut InteractionContext<'_>, event: &PointerEvent) -> bool {
        self.cursor = CursorHint::Crosshair;
        match *event {
            PointerEvent::Down { position } => {
                self.brush_last = Some(position);
                false
            }
            PointerEvent::Move { position } => {
                let Some(from) = self.brush_last else {
                    return false;
                };
                cx.scene.add_paint(BrushSegment {
                    from,
                    to: position,
                    width: cx.style.brush_size,
                    color: cx.style.brush_color,
                });
                self.brush_last = Some(position);
                true
            }
            PointerEvent::Up { .. } | PointerEvent::Leave => {
                self.brush_last = None;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{SolidBox, Text};
    use crate::geometry::FixedWidth;

    struct Fixture {
        scene: Scene,
        selection: Selection,
        style: StyleSettings,
        interaction: Interaction,
        modifiers: Modifiers,
    }

    impl Fixture {
        fn new() -> Self {
            let mut scene = Scene::default();
            scene.add(SolidBox::new(Point::new(200.0, 150.0), 100.0, 100.0));
            Self {
                scene,
                selection: Selection::new(),
                style: StyleSettings::default(),
                interaction: Interaction::new(),
                modifiers: Modifiers::default(),
            }
        }

        fn send(&mut self, event: PointerEvent) -> bool {
            let mut cx = InteractionContext {
                scene: &mut self.scene,
                selection: &mut self.selection,
                measure: &FixedWidth,
                style: &self.style,
                modifiers: self.modifiers,
            };
            self.interaction.handle_pointer_event(&mut cx, &event)
        }

        fn down(&mut self, x: f64, y: f64) -> bool {
            self.send(PointerEvent::Down {
                position: Point::new(x, y),
            })
        }

        fn moved(&mut self, x: f64, y: f64) -> bool {
            self.send(PointerEvent::Move {
                position: Point::new(x, y),
            })
        }

        fn up(&mut self, x: f64, y: f64) -> bool {
            self.send(PointerEvent::Up {
                position: Point::new(x, y),
            })
        }

        fn box_rect(&self, index: usize) -> Rect {
            self.scene.get(index).unwrap().as_box().unwrap().as_rect()
        }
    }

    #[test]
    fn test_click_selects_and_drags() {
        let mut f = Fixture::new();
        assert!(f.down(250.0, 200.0));
        assert!(f.selection.contains(0));
        assert!(matches!(f.interaction.state(), InteractionState::Dragging { .. }));

        f.moved(260.0, 205.0);
        f.moved(270.0, 210.0);
        f.up(270.0, 210.0);

        assert_eq!(f.box_rect(0).origin(), Point::new(220.0, 160.0));
        assert_eq!(f.interaction.state(), InteractionState::Idle);
        assert!(f.selection.contains(0));
    }

    #[test]
    fn test_leaving_canvas_keeps_drag() {
        let mut f = Fixture::new();
        f.down(250.0, 200.0);
        f.moved(260.0, 200.0);
        assert!(!f.send(PointerEvent::Leave));
        assert!(matches!(f.interaction.state(), InteractionState::Dragging { .. }));

        // Re-entering continues from the last seen position.
        assert!(f.moved(270.0, 210.0));
        f.up(270.0, 210.0);
        assert_eq!(f.box_rect(0).origin(), Point::new(220.0, 160.0));
        assert_eq!(f.interaction.state(), InteractionState::Idle);
    }

    #[test]
    fn test_leaving_canvas_keeps_resize() {
        let mut f = Fixture::new();
        f.down(250.0, 200.0);
        f.up(250.0, 200.0);
        f.down(300.0, 250.0);
        f.send(PointerEvent::Leave);
        assert!(matches!(f.interaction.state(), InteractionState::Resizing { .. }));

        f.moved(320.0, 260.0);
        f.up(320.0, 260.0);
        assert_eq!(f.box_rect(0), Rect::new(200.0, 150.0, 320.0, 260.0));
    }

    #[test]
    fn test_drag_moves_every_selected_element() {
        let mut f = Fixture::new();
        f.scene.add(Text::new(Point::new(0.0, 50.0), "ab"));
        f.modifiers = Modifiers::SHIFT;
        f.down(10.0, 40.0);
        f.down(250.0, 200.0);
        assert_eq!(f.selection.len(), 2);

        f.moved(255.0, 210.0);
        assert_eq!(f.box_rect(0).origin(), Point::new(205.0, 160.0));
        assert_eq!(f.scene.get(1).unwrap().position(), Point::new(5.0, 60.0));
    }

    #[test]
    fn test_background_click_clears_unless_shift() {
        let mut f = Fixture::new();
        f.down(250.0, 200.0);
        f.up(250.0, 200.0);

        f.modifiers = Modifiers::SHIFT;
        assert!(!f.down(10.0, 10.0));
        assert!(f.selection.contains(0));
        assert_eq!(f.interaction.state(), InteractionState::Idle);

        f.modifiers = Modifiers::default();
        assert!(f.down(10.0, 10.0));
        assert!(f.selection.is_empty());
    }

    #[test]
    fn test_se_resize_from_anchor() {
        let mut f = Fixture::new();
        f.down(250.0, 200.0);
        f.up(250.0, 200.0);

        f.down(300.0, 250.0);
        assert!(matches!(
            f.interaction.state(),
            InteractionState::Resizing {
                handle: HandlePosition::Se,
                ..
            }
        ));
        f.moved(310.0, 255.0);
        f.moved(320.0, 260.0);
        assert_eq!(f.box_rect(0), Rect::from_origin_size(Point::new(200.0, 150.0), (120.0, 110.0)));
    }

    #[test]
    fn test_nw_resize_clamps_size_but_follows_pointer() {
        let mut f = Fixture::new();
        f.down(250.0, 200.0);
        f.up(250.0, 200.0);

        f.down(200.0, 150.0);
        f.moved(395.0, 150.0);
        let rect = f.box_rect(0);
        assert_eq!(rect.x0, 395.0);
        assert_eq!(rect.width(), 10.0);
        assert_eq!(rect.height(), 100.0);
    }

    #[test]
    fn test_text_resize_from_top_edge() {
        let mut f = Fixture::new();
        f.scene = Scene::default();
        f.scene.add(Text::new(Point::new(200.0, 150.0), "Hi"));
        // bounds (200, 130, 20 x 20); n handle at (210, 130)
        f.down(205.0, 140.0);
        f.up(205.0, 140.0);
        f.down(210.0, 130.0);
        f.moved(210.0, 120.0);

        let text = f.scene.get(0).unwrap().as_text().unwrap();
        assert_eq!(text.font_size, 30.0);
        assert_eq!(text.position, Point::new(200.0, 150.0));
    }

    #[test]
    fn test_resize_priority_over_other_elements() {
        let mut f = Fixture::new();
        f.scene.add(SolidBox::new(Point::new(290.0, 240.0), 50.0, 50.0));
        f.modifiers = Modifiers::SHIFT;
        f.down(210.0, 160.0);
        f.up(210.0, 160.0);
        f.modifiers = Modifiers::default();

        // on box 0's se handle, also inside box 1
        f.down(300.0, 250.0);
        assert!(matches!(f.interaction.state(), InteractionState::Resizing { index: 0, .. }));
        assert_eq!(f.selection.iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_cursor_hints() {
        let mut f = Fixture::new();
        f.moved(250.0, 200.0);
        assert_eq!(f.interaction.cursor(), CursorHint::Move);
        f.moved(10.0, 10.0);
        assert_eq!(f.interaction.cursor(), CursorHint::Default);

        f.down(250.0, 200.0);
        f.up(250.0, 200.0);
        f.moved(300.0, 150.0);
        assert_eq!(f.interaction.cursor(), CursorHint::ResizeNesw);
        f.moved(250.0, 250.0);
        assert_eq!(f.interaction.cursor(), CursorHint::ResizeNs);
        f.moved(200.0, 200.0);
        assert_eq!(f.interaction.cursor(), CursorHint::ResizeEw);
    }

    #[test]
    fn test_brush_paints_segments() {
        let mut f = Fixture::new();
        f.style.brush_size = 7.0;
        f.interaction.toggle_brush_mode();
        assert_eq!(f.interaction.cursor(), CursorHint::Crosshair);

        assert!(!f.moved(5.0, 5.0));
        f.down(10.0, 10.0);
        assert!(f.moved(20.0, 10.0));
        assert!(f.moved(20.0, 30.0));
        f.send(PointerEvent::Leave);
        assert!(!f.moved(40.0, 40.0));

        let paint = f.scene.paint();
        assert_eq!(paint.len(), 2);
        assert_eq!(paint[0].from, Point::new(10.0, 10.0));
        assert_eq!(paint[1].to, Point::new(20.0, 30.0));
        assert_eq!(paint[1].width, 7.0);
        // brush strokes never select or move elements
        assert!(f.selection.is_empty());
        assert_eq!(f.box_rect(0).origin(), Point::new(200.0, 150.0));
    }
}
