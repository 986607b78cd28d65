//! Resize handles and delta-based resize math.

use crate::elements::{Element, MIN_ELEMENT_SIZE};
use crate::interaction::CursorHint;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle side length in canvas pixels.
pub const HANDLE_SIZE: f64 = 8.0;

/// A pointer hits a handle within this distance on each axis.
pub const HANDLE_HIT_TOLERANCE: f64 = HANDLE_SIZE / 2.0;

/// The eight handle positions, in hit-test order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlePosition {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
}

impl HandlePosition {
    /// All positions in hit-test order.
    pub const ALL: [HandlePosition; 8] = [
        HandlePosition::Nw,
        HandlePosition::N,
        HandlePosition::Ne,
        HandlePosition::E,
        HandlePosition::Se,
        HandlePosition::S,
        HandlePosition::Sw,
        HandlePosition::W,
    ];

    /// Where this handle sits on `bounds`.
    pub fn point_on(self, bounds: Rect) -> Point {
        let cx = bounds.x0 + bounds.width() / 2.0;
        let cy = bounds.y0 + bounds.height() / 2.0;
        match self {
            HandlePosition::Nw => Point::new(bounds.x0, bounds.y0),
            HandlePosition::N => Point::new(cx, bounds.y0),
            HandlePosition::Ne => Point::new(bounds.x1, bounds.y0),
            HandlePosition::E => Point::new(bounds.x1, cy),
            HandlePosition::Se => Point::new(bounds.x1, bounds.y1),
            HandlePosition::S => Point::new(cx, bounds.y1),
            HandlePosition::Sw => Point::new(bounds.x0, bounds.y1),
            HandlePosition::W => Point::new(bounds.x0, cy),
        }
    }

    /// Resize cursor shown while hovering this handle.
    pub fn cursor(self) -> CursorHint {
        match self {
            HandlePosition::Nw | HandlePosition::Se => CursorHint::ResizeNwse,
            HandlePosition::Ne | HandlePosition::Sw => CursorHint::ResizeNesw,
            HandlePosition::N | HandlePosition::S => CursorHint::ResizeNs,
            HandlePosition::E | HandlePosition::W => CursorHint::ResizeEw,
        }
    }
}

/// A handle with its position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub center: Point,
    pub position: HandlePosition,
}

impl Handle {
    pub fn new(center: Point, position: HandlePosition) -> Self {
        Self { center, position }
    }

    /// Square hit test: within `tolerance` on both axes.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.center.x).abs() <= tolerance && (point.y - self.center.y).abs() <= tolerance
    }

    /// The drawn handle square.
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, (HANDLE_SIZE, HANDLE_SIZE))
    }
}

/// The 8 handles of `bounds`, in hit-test order.
pub fn handle_points(bounds: Rect) -> [Handle; 8] {
    HandlePosition::ALL.map(|position| Handle::new(position.point_on(bounds), position))
}

/// New bounds after dragging `handle` by `delta` from the `anchor` bounds.
///
/// Width and height are clamped to [`MIN_ELEMENT_SIZE`] independently; the
/// clamp never moves the origin, so a dragged west or north edge keeps
/// following the pointer.
pub fn resize_rect(anchor: Rect, handle: HandlePosition, delta: Vec2) -> Rect {
    let (ax, ay, aw, ah) = (anchor.x0, anchor.y0, anchor.width(), anchor.height());
    let (dx, dy) = (delta.x, delta.y);
    let (x, y, w, h) = match handle {
        HandlePosition::Nw => (ax + dx, ay + dy, aw - dx, ah - dy),
        HandlePosition::N => (ax, ay + dy, aw, ah - dy),
        HandlePosition::Ne => (ax, ay + dy, aw + dx, ah - dy),
        HandlePosition::E => (ax, ay, aw + dx, ah),
        HandlePosition::Se => (ax, ay, aw + dx, ah + dy),
        HandlePosition::S => (ax, ay, aw, ah + dy),
        HandlePosition::Sw => (ax + dx, ay, aw - dx, ah + dy),
        HandlePosition::W => (ax + dx, ay, aw - dx, ah),
    };
    Rect::from_origin_size(
        Point::new(x, y),
        (w.max(MIN_ELEMENT_SIZE), h.max(MIN_ELEMENT_SIZE)),
    )
}

/// Write resized bounds back into an element.
///
/// Text ignores the width: the font size becomes the new height and the
/// baseline moves to the bottom edge.
pub fn apply_bounds(element: &mut Element, rect: Rect) {
    let origin = rect.origin();
    let (width, height) = (rect.width(), rect.height());
    match element {
        Element::Text(text) => {
            text.position = Point::new(origin.x, origin.y + height);
            text.font_size = height;
        }
        Element::Box(solid_box) => {
            solid_box.position = origin;
            solid_box.width = width;
            solid_box.height = height;
        }
        Element::Blur(blur) => {
            blur.position = origin;
            blur.width = width;
            blur.height = height;
        }
        Element::Image(image) => {
            image.position = origin;
            image.width = width;
            image.height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{SolidBox, Text};

    fn anchor() -> Rect {
        Rect::from_origin_size(Point::new(200.0, 150.0), (100.0, 100.0))
    }

    #[test]
    fn test_handle_order_and_points() {
        let handles = handle_points(anchor());
        let positions: Vec<_> = handles.iter().map(|h| h.position).collect();
        assert_eq!(positions, HandlePosition::ALL.to_vec());
        assert_eq!(handles[0].center, Point::new(200.0, 150.0));
        assert_eq!(handles[1].center, Point::new(250.0, 150.0));
        assert_eq!(handles[3].center, Point::new(300.0, 200.0));
        assert_eq!(handles[4].center, Point::new(300.0, 250.0));
        assert_eq!(handles[7].center, Point::new(200.0, 200.0));
    }

    #[test]
    fn test_handle_hit_test_is_square() {
        let handle = Handle::new(Point::new(50.0, 50.0), HandlePosition::Se);
        assert!(handle.hit_test(Point::new(54.0, 46.0), HANDLE_HIT_TOLERANCE));
        assert!(!handle.hit_test(Point::new(54.5, 50.0), HANDLE_HIT_TOLERANCE));
        assert_eq!(handle.rect(), Rect::new(46.0, 46.0, 54.0, 54.0));
    }

    #[test]
    fn test_cursor_mapping() {
        assert_eq!(HandlePosition::Nw.cursor(), CursorHint::ResizeNwse);
        assert_eq!(HandlePosition::Se.cursor(), CursorHint::ResizeNwse);
        assert_eq!(HandlePosition::Ne.cursor(), CursorHint::ResizeNesw);
        assert_eq!(HandlePosition::S.cursor(), CursorHint::ResizeNs);
        assert_eq!(HandlePosition::W.cursor(), CursorHint::ResizeEw);
    }

    #[test]
    fn test_resize_se_grows() {
        let rect = resize_rect(anchor(), HandlePosition::Se, Vec2::new(20.0, 10.0));
        assert_eq!(rect, Rect::from_origin_size(Point::new(200.0, 150.0), (120.0, 110.0)));
    }

    #[test]
    fn test_resize_nw_moves_origin() {
        let rect = resize_rect(anchor(), HandlePosition::Nw, Vec2::new(10.0, 20.0));
        assert_eq!(rect, Rect::from_origin_size(Point::new(210.0, 170.0), (90.0, 80.0)));
    }

    #[test]
    fn test_resize_edges_touch_one_axis() {
        let rect = resize_rect(anchor(), HandlePosition::E, Vec2::new(15.0, 99.0));
        assert_eq!(rect, Rect::from_origin_size(Point::new(200.0, 150.0), (115.0, 100.0)));

        let rect = resize_rect(anchor(), HandlePosition::N, Vec2::new(99.0, -10.0));
        assert_eq!(rect, Rect::from_origin_size(Point::new(200.0, 140.0), (100.0, 110.0)));
    }

    #[test]
    fn test_resize_clamps_each_axis_without_moving_origin() {
        let rect = resize_rect(anchor(), HandlePosition::W, Vec2::new(150.0, 0.0));
        assert_eq!(rect.x0, 350.0);
        assert_eq!(rect.width(), MIN_ELEMENT_SIZE);
        assert_eq!(rect.height(), 100.0);

        let rect = resize_rect(anchor(), HandlePosition::Se, Vec2::new(-500.0, 0.0));
        assert_eq!(rect.width(), MIN_ELEMENT_SIZE);
        assert_eq!(rect.height(), 100.0);
    }

    #[test]
    fn test_apply_bounds_to_box() {
        let mut element = Element::from(SolidBox::new(Point::ZERO, 1.0, 1.0));
        apply_bounds(&mut element, Rect::new(5.0, 6.0, 25.0, 46.0));
        let b = element.as_box().unwrap();
        assert_eq!(b.position, Point::new(5.0, 6.0));
        assert_eq!((b.width, b.height), (20.0, 40.0));
    }

    #[test]
    fn test_apply_bounds_to_text_uses_height_as_font_size() {
        let mut element = Element::from(Text::new(Point::new(200.0, 150.0), "Hi"));
        apply_bounds(&mut element, Rect::from_origin_size(Point::new(200.0, 130.0), (500.0, 30.0)));
        let text = element.as_text().unwrap();
        assert_eq!(text.font_size, 30.0);
        assert_eq!(text.position, Point::new(200.0, 160.0));
        assert_eq!(text.font_string(), "30px Arial");
    }
}
