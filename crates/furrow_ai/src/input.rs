//! Input snapshots supplied by the window layer

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Keys the controller reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    /// Interact: pick up or put down
    E,
    Shift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input state sampled once per tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    pub keys: BTreeSet<Key>,
    pub mouse_buttons: BTreeSet<MouseButton>,
    /// Cursor position in window pixels
    pub cursor: [f32; 2],
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.keys.insert(key);
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.mouse_buttons.insert(button);
        self
    }

    pub fn with_cursor(mut self, x: f32, y: f32) -> Self {
        self.cursor = [x, y];
        self
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }
}

/// Current and previous snapshots, for edge detection
#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: InputSnapshot,
    previous: InputSnapshot,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `snapshot` current; the old current becomes previous
    pub fn begin_tick(&mut self, snapshot: InputSnapshot) {
        self.previous = std::mem::replace(&mut self.current, snapshot);
    }

    #[inline]
    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.current.key_down(key)
    }

    /// Down this tick, up the tick before
    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.current.key_down(key) && !self.previous.key_down(key)
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.current.button_down(button)
    }

    #[inline]
    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.current.button_down(button) && !self.previous.button_down(button)
    }

    #[inline]
    pub fn cursor(&self) -> [f32; 2] {
        self.current.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_edge() {
        let mut input = InputState::new();
        input.begin_tick(InputSnapshot::new().with_key(Key::E));
        assert!(input.key_pressed(Key::E));

        input.begin_tick(InputSnapshot::new().with_key(Key::E));
        assert!(input.key_down(Key::E));
        assert!(!input.key_pressed(Key::E));

        input.begin_tick(InputSnapshot::new());
        input.begin_tick(InputSnapshot::new().with_key(Key::E));
        assert!(input.key_pressed(Key::E));
    }

    #[test]
    fn test_button_edge() {
        let mut input = InputState::new();
        input.begin_tick(InputSnapshot::new().with_button(MouseButton::Left));
        assert!(input.button_pressed(MouseButton::Left));
        input.begin_tick(InputSnapshot::new().with_button(MouseButton::Left));
        assert!(input.button_down(MouseButton::Left));
        assert!(!input.button_pressed(MouseButton::Left));
    }
}
