//! Image loading boundary: decoder trait, load tickets and fit rules.

use crate::elements::{Bitmap, ElementId};
use crate::error::DecodeError;
use kurbo::{Point, Rect, Size};

/// Decodes encoded image bytes into a [`Bitmap`].
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap, DecodeError>;
}

/// What a pending load will become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPurpose {
    /// Replaces the base image and resizes the canvas.
    BaseImage,
    /// Added on top as an image element.
    Overlay,
}

impl LoadPurpose {
    pub(crate) fn slot(self) -> usize {
        match self {
            LoadPurpose::BaseImage => 0,
            LoadPurpose::Overlay => 1,
        }
    }
}

/// Handed out when a decode starts; a result is only applied if no newer
/// load of the same purpose and no canvas clear happened in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub(crate) purpose: LoadPurpose,
    pub(crate) generation: u64,
}

impl LoadTicket {
    pub fn purpose(&self) -> LoadPurpose {
        self.purpose
    }
}

/// What happened to a finished load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadOutcome {
    /// The base image was replaced and the canvas resized.
    BaseImage { canvas_size: Size },
    /// An image element was added.
    Overlay { id: ElementId },
    /// A newer load or a clear made this result obsolete; nothing changed.
    Superseded,
}

/// Display size of a base image: scaled down, aspect preserved, when it
/// exceeds `max` on either axis.
pub fn fit_base_image(natural: Size, max: Size) -> Size {
    if natural.width > max.width || natural.height > max.height {
        let ratio = (max.width / natural.width).min(max.height / natural.height);
        Size::new(natural.width * ratio, natural.height * ratio)
    } else {
        natural
    }
}

/// Canvas size for a fitted base image, in whole pixels.
pub fn canvas_size_for(fitted: Size) -> Size {
    Size::new(fitted.width.floor().max(1.0), fitted.height.floor().max(1.0))
}

/// Placement of an overlay image: at most half the canvas's shorter side
/// on its longer side, centered on the canvas.
pub fn fit_overlay(natural: Size, canvas: Size) -> Rect {
    let max_size = canvas.width.min(canvas.height) / 2.0;
    let size = if natural.width > max_size || natural.height > max_size {
        let ratio = max_size / natural.width.max(natural.height);
        Size::new(natural.width * ratio, natural.height * ratio)
    } else {
        natural
    };
    let origin = Point::new(
        (canvas.width - size.width) / 2.0,
        (canvas.height - size.height) / 2.0,
    );
    Rect::from_origin_size(origin, size)
}
