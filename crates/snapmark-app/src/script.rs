//! Scripted editing sessions.
//!
//! A script is a JSON array of steps, replayed against an [`Editor`] in
//! order, the way a user would click through the toolbar and canvas.

use crate::error::{AppError, AppResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use snapmark_core::geometry::TextMeasure;
use snapmark_core::{
    Editor, EditorError, ImageDecoder, Key, KeyEvent, LoadOutcome, LoadPurpose, PointerEvent,
    SerializableColor,
};
use std::path::{Path, PathBuf};

/// One user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    AddText { content: String },
    AddBox,
    AddBlur,
    /// Load an overlay image; relative paths resolve against the script's
    /// directory.
    AddImage { path: PathBuf },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerLeave,
    /// Key name as a browser reports it (`"Delete"`, `"Shift"`, ...).
    KeyDown { key: String },
    KeyUp { key: String },
    SetColor { color: SerializableColor },
    SetBorderColor { color: SerializableColor },
    SetBorderSize { size: f64 },
    SetBlurRadius { radius: f64 },
    SetBrush {
        #[serde(default)]
        size: Option<f64>,
        #[serde(default)]
        color: Option<SerializableColor>,
    },
    ToggleBrush,
    CenterX,
    CenterY,
    Delete,
    /// Clear the canvas; a script's clear is always confirmed.
    Clear,
}

/// Parse a script from JSON.
pub fn parse_script(json: &str) -> AppResult<Vec<ScriptStep>> {
    Ok(serde_json::from_str(json)?)
}

/// Replays script steps against an editor.
pub struct ScriptRunner<'a, D: ImageDecoder> {
    decoder: &'a D,
    base_dir: PathBuf,
}

impl<'a, D: ImageDecoder> ScriptRunner<'a, D> {
    pub fn new(decoder: &'a D, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            decoder,
            base_dir: base_dir.into(),
        }
    }

    /// Run every step in order. Stops at the first fatal error.
    pub fn run<M: TextMeasure>(&self, editor: &mut Editor<M>, steps: &[ScriptStep]) -> AppResult<()> {
        for (index, step) in steps.iter().enumerate() {
            log::trace!("Step {}: {:?}", index, step);
            self.apply(editor, step)?;
        }
        log::debug!("Replayed {} steps, {} elements in scene", steps.len(), editor.scene().len());
        if log::log_enabled!(log::Level::Trace) {
            match editor.scene().to_json() {
                Ok(json) => log::trace!("Scene after replay:\n{}", json),
                Err(err) => log::warn!("Could not describe scene: {}", err),
            }
        }
        Ok(())
    }

    /// Apply a single step.
    ///
    /// Restyle and align steps with nothing selected, and images that fail
    /// to decode, are logged and skipped.
    pub fn apply<M: TextMeasure>(&self, editor: &mut Editor<M>, step: &ScriptStep) -> AppResult<()> {
        let result = match step {
            ScriptStep::AddText { content } => {
                editor.add_text(content);
                Ok(())
            }
            ScriptStep::AddBox => {
                editor.add_box();
                Ok(())
            }
            ScriptStep::AddBlur => {
                editor.add_blur();
                Ok(())
            }
            ScriptStep::AddImage { path } => return self.add_image(editor, path),
            ScriptStep::PointerDown { x, y } => {
                editor.handle_pointer_event(&PointerEvent::Down { position: Point::new(*x, *y) });
                Ok(())
            }
            ScriptStep::PointerMove { x, y } => {
                editor.handle_pointer_event(&PointerEvent::Move { position: Point::new(*x, *y) });
                Ok(())
            }
            ScriptStep::PointerUp { x, y } => {
                editor.handle_pointer_event(&PointerEvent::Up { position: Point::new(*x, *y) });
                Ok(())
            }
            ScriptStep::PointerLeave => {
                editor.handle_pointer_event(&PointerEvent::Leave);
                Ok(())
            }
            ScriptStep::KeyDown { key } => {
                editor.handle_key_event(&KeyEvent::Pressed(Key::from_name(key)));
                Ok(())
            }
            ScriptStep::KeyUp { key } => {
                editor.handle_key_event(&KeyEvent::Released(Key::from_name(key)));
                Ok(())
            }
            ScriptStep::SetColor { color } => editor.set_color(*color).map(drop),
            ScriptStep::SetBorderColor { color } => editor.set_border_color(*color).map(drop),
            ScriptStep::SetBorderSize { size } => editor.set_border_size(*size).map(drop),
            ScriptStep::SetBlurRadius { radius } => editor.set_blur_radius(*radius).map(drop),
            ScriptStep::SetBrush { size, color } => {
                if let Some(size) = size {
                    editor.set_brush_size(*size);
                }
                if let Some(color) = color {
                    editor.set_brush_color(*color);
                }
                Ok(())
            }
            ScriptStep::ToggleBrush => {
                editor.toggle_brush_mode();
                Ok(())
            }
            ScriptStep::CenterX => editor.center_selected_x().map(drop),
            ScriptStep::CenterY => editor.center_selected_y().map(drop),
            ScriptStep::Delete => editor.delete_selected().map(drop),
            ScriptStep::Clear => {
                editor.clear_canvas(|| true);
                Ok(())
            }
        };

        match result {
            Err(EditorError::EmptySelection) => {
                log::debug!("{:?} skipped: nothing selected", step);
                Ok(())
            }
            other => Ok(other?),
        }
    }

    fn add_image<M: TextMeasure>(&self, editor: &mut Editor<M>, path: &Path) -> AppResult<()> {
        let path = self.base_dir.join(path);
        let bytes = std::fs::read(&path).map_err(|source| AppError::Read {
            path: path.clone(),
            source,
        })?;
        let ticket = editor.begin_load(LoadPurpose::Overlay);
        match editor.finish_load(ticket, self.decoder.decode(&bytes)) {
            Ok(LoadOutcome::Overlay { id }) => {
                log::debug!(
                    "Added image {} from {} at index {:?}",
                    id,
                    path.display(),
                    editor.scene().index_of(id)
                );
                Ok(())
            }
            Ok(outcome) => {
                log::debug!("Image {} not added: {:?}", path.display(), outcome);
                Ok(())
            }
            Err(EditorError::Decode(err)) => {
                log::warn!("Skipping {}: {}", path.display(), err);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
