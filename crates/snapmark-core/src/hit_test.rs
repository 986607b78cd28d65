//! Point queries against the scene: topmost element and resize handles.

use crate::geometry::{bounds, contains_inclusive, TextMeasure};
use crate::handles::{handle_points, HandlePosition, HANDLE_HIT_TOLERANCE};
use crate::scene::Scene;
use crate::selection::Selection;
use kurbo::Point;

/// A resize handle under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleHit {
    /// Index of the element owning the handle.
    pub index: usize,
    pub position: HandlePosition,
}

/// Index of the topmost element whose bounds contain `point` (edges
/// included).
pub fn element_at(scene: &Scene, measure: &dyn TextMeasure, point: Point) -> Option<usize> {
    scene
        .elements()
        .iter()
        .enumerate()
        .rev()
        .find(|(_, element)| contains_inclusive(bounds(element, measure), point))
        .map(|(index, _)| index)
}

/// First handle of a selected element under `point`.
///
/// Selected elements are checked in ascending index order and handles in
/// [`HandlePosition::ALL`] order; stale indices are skipped.
pub fn resize_handle_at(
    scene: &Scene,
    selection: &Selection,
    measure: &dyn TextMeasure,
    point: Point,
) -> Option<HandleHit> {
    selection.iter().find_map(|index| {
        let element = scene.get(index)?;
        handle_points(bounds(element, measure))
            .into_iter()
            .find(|handle| handle.hit_test(point, HANDLE_HIT_TOLERANCE))
            .map(|handle| HandleHit {
                index,
                position: handle.position,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{SolidBox, Text};
    use crate::geometry::FixedWidth;

    fn overlapping() -> Scene {
        let mut scene = Scene::default();
        scene.add(SolidBox::new(Point::new(0.0, 0.0), 100.0, 100.0));
        scene.add(SolidBox::new(Point::new(50.0, 50.0), 100.0, 100.0));
        scene
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let scene = overlapping();
        assert_eq!(element_at(&scene, &FixedWidth, Point::new(75.0, 75.0)), Some(1));
        assert_eq!(element_at(&scene, &FixedWidth, Point::new(25.0, 25.0)), Some(0));
        assert_eq!(element_at(&scene, &FixedWidth, Point::new(400.0, 400.0)), None);
    }

    #[test]
    fn test_element_at_includes_edges() {
        let scene = overlapping();
        assert_eq!(element_at(&scene, &FixedWidth, Point::new(150.0, 150.0)), Some(1));
        assert_eq!(element_at(&scene, &FixedWidth, Point::new(0.0, 0.0)), Some(0));
    }

    #[test]
    fn test_element_at_uses_text_bounds() {
        let mut scene = Scene::default();
        scene.add(Text::new(Point::new(10.0, 50.0), "abc"));
        // bounds: (10, 30) .. (40, 50)
        assert_eq!(element_at(&scene, &FixedWidth, Point::new(20.0, 40.0)), Some(0));
        assert_eq!(element_at(&scene, &FixedWidth, Point::new(20.0, 55.0)), None);
    }

    #[test]
    fn test_handles_only_for_selected() {
        let scene = overlapping();
        let selection = Selection::new();
        assert_eq!(resize_handle_at(&scene, &selection, &FixedWidth, Point::new(100.0, 100.0)), None);
    }

    #[test]
    fn test_handle_hit_on_selected_corner() {
        let scene = overlapping();
        let selection = Selection::from_iter([1]);
        let hit = resize_handle_at(&scene, &selection, &FixedWidth, Point::new(148.0, 153.0));
        assert_eq!(
            hit,
            Some(HandleHit {
                index: 1,
                position: HandlePosition::Se
            })
        );
        let miss = resize_handle_at(&scene, &selection, &FixedWidth, Point::new(145.0, 150.0));
        assert_eq!(miss, None);
    }

    #[test]
    fn test_lowest_selected_index_wins() {
        let mut scene = Scene::default();
        scene.add(SolidBox::new(Point::new(0.0, 0.0), 100.0, 100.0));
        scene.add(SolidBox::new(Point::new(100.0, 100.0), 100.0, 100.0));
        let selection = Selection::from_iter([1, 0]);
        // (100, 100) is box 0's se handle and box 1's nw handle
        let hit = resize_handle_at(&scene, &selection, &FixedWidth, Point::new(100.0, 100.0)).unwrap();
        assert_eq!(hit.index, 0);
        assert_eq!(hit.position, HandlePosition::Se);
    }

    #[test]
    fn test_stale_index_skipped() {
        let scene = overlapping();
        let selection = Selection::from_iter([7]);
        assert_eq!(resize_handle_at(&scene, &selection, &FixedWidth, Point::new(0.0, 0.0)), None);
    }
}
