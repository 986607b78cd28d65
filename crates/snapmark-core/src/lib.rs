//! SnapMark Core Library
//!
//! Scene model and interaction engine for the SnapMark image annotator:
//! elements, bounds, hit testing, selection, the drag/resize state machine
//! and the editor operations built on them.

pub mod config;
pub mod editor;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod handles;
pub mod hit_test;
pub mod input;
pub mod interaction;
pub mod loader;
pub mod scene;
pub mod selection;
pub mod style;

pub use config::EditorConfig;
pub use editor::Editor;
pub use elements::{Bitmap, BlurRegion, Element, ElementId, Image, SolidBox, Text, MIN_ELEMENT_SIZE};
pub use error::{ConfigError, DecodeError, EditorError, EditorResult};
pub use geometry::{bounds, ApproximateMetrics, TextMeasure};
pub use handles::{handle_points, Handle, HandlePosition, HANDLE_SIZE};
pub use hit_test::{element_at, resize_handle_at, HandleHit};
pub use input::{Key, KeyEvent, Modifiers, PointerEvent};
pub use interaction::{CursorHint, InteractionState};
pub use loader::{ImageDecoder, LoadOutcome, LoadPurpose, LoadTicket};
pub use scene::{BrushSegment, Scene};
pub use selection::Selection;
pub use style::{FontSpec, SerializableColor, StyleSettings};
