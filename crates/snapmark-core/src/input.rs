//! Pointer and keyboard events, and the modifier state they update.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// Pointer left the canvas.
    Leave,
}

impl PointerEvent {
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => Some(*position),
            PointerEvent::Leave => None,
        }
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Delete,
    Backspace,
    Shift,
    Control,
    Alt,
    Meta,
    Escape,
    Other(String),
}

impl Key {
    /// Map a key name as reported by a windowing layer (`"Delete"`,
    /// `"Shift"`, ...).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Shift" => Key::Shift,
            "Control" => Key::Control,
            "Alt" => Key::Alt,
            "Meta" => Key::Meta,
            "Escape" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }

    /// Whether this key deletes the selection.
    pub fn is_delete(&self) -> bool {
        matches!(self, Key::Delete | Key::Backspace)
    }
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "key", rename_all = "snake_case")]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// Tracks the pointer position and held modifiers across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position, if the pointer is over the canvas.
    pub pointer_position: Option<Point>,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.pointer_position = event.position();
    }

    /// Process a key event, tracking modifier keys.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        let (key, down) = match event {
            KeyEvent::Pressed(key) => (key, true),
            KeyEvent::Released(key) => (key, false),
        };
        match key {
            Key::Shift => self.modifiers.shift = down,
            Key::Control => self.modifiers.ctrl = down,
            Key::Alt => self.modifiers.alt = down,
            Key::Meta => self.modifiers.meta = down,
            _ => {}
        }
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn shift(&self) -> bool {
        self.modifiers.shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_tracking() {
        let mut input = InputState::new();
        input.handle_key_event(&KeyEvent::Pressed(Key::Shift));
        assert!(input.shift());
        input.handle_key_event(&KeyEvent::Pressed(Key::Delete));
        assert!(input.shift());
        input.handle_key_event(&KeyEvent::Released(Key::Shift));
        assert!(!input.shift());
    }

    #[test]
    fn test_pointer_position() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(3.0, 4.0),
        });
        assert_eq!(input.pointer_position, Some(Point::new(3.0, 4.0)));
        input.handle_pointer_event(&PointerEvent::Leave);
        assert_eq!(input.pointer_position, None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("Backspace"), Key::Backspace);
        assert!(Key::from_name("Delete").is_delete());
        assert_eq!(Key::from_name("a"), Key::Other("a".to_string()));
    }

    #[test]
    fn test_event_serde() {
        let event: PointerEvent =
            serde_json::from_str(r#"{ "type": "down", "position": { "x": 1.0, "y": 2.0 } }"#).unwrap();
        assert_eq!(event.position(), Some(Point::new(1.0, 2.0)));

        let key: KeyEvent = serde_json::from_str(r#"{ "type": "pressed", "key": "delete" }"#).unwrap();
        assert_eq!(key, KeyEvent::Pressed(Key::Delete));
    }
}
