//! Blur region.

use super::ElementId;
use crate::style::DEFAULT_BLUR_RADIUS;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle whose area shows a blurred copy of the content beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlurRegion {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Gaussian radius in pixels (0 = no blur).
    pub blur_radius: f64,
}

impl BlurRegion {
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            blur_radius: DEFAULT_BLUR_RADIUS,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.blur_radius = radius.max(0.0);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }
}
