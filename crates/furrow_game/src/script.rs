//! Scripted input timeline
//!
//! Stands in for a window layer: each step replaces the held keys and
//! buttons from its start time on. A step without a cursor keeps the
//! previous cursor so the camera does not jump.

use furrow_ai::{InputSnapshot, Key, MouseButton};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Input held from `at` seconds until the next step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    pub at: f32,
    pub keys: BTreeSet<Key>,
    pub buttons: BTreeSet<MouseButton>,
    pub cursor: Option<[f32; 2]>,
}

impl ScriptStep {
    pub fn at(at: f32) -> Self {
        Self {
            at,
            ..Self::default()
        }
    }

    pub fn key(mut self, key: Key) -> Self {
        self.keys.insert(key);
        self
    }

    pub fn button(mut self, button: MouseButton) -> Self {
        self.buttons.insert(button);
        self
    }

    pub fn cursor(mut self, x: f32, y: f32) -> Self {
        self.cursor = Some([x, y]);
        self
    }
}

/// Plays a list of steps against simulation time
#[derive(Debug, Clone)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
    next: usize,
    current: InputSnapshot,
}

impl InputScript {
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self {
            steps,
            next: 0,
            current: InputSnapshot::new(),
        }
    }

    /// Input in effect at `time`; time must not go backwards
    pub fn sample(&mut self, time: f32) -> InputSnapshot {
        while let Some(step) = self.steps.get(self.next) {
            if step.at > time {
                break;
            }
            log::debug!("Script step at {:.2}s: {:?} {:?}", step.at, step.keys, step.buttons);
            self.current.keys = step.keys.clone();
            self.current.mouse_buttons = step.buttons.clone();
            if let Some(cursor) = step.cursor {
                self.current.cursor = cursor;
            }
            self.next += 1;
        }
        self.current.clone()
    }

    /// Every step has been applied
    pub fn is_done(&self) -> bool {
        self.next >= self.steps.len()
    }
}

/// Walk up to the animal, fight it, carry it off
pub fn demo_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::at(0.0).cursor(0.0, 0.0),
        ScriptStep::at(0.5).key(Key::W),
        ScriptStep::at(2.0),
        ScriptStep::at(2.5).button(MouseButton::Left),
        ScriptStep::at(6.0),
        ScriptStep::at(6.5).key(Key::E),
        ScriptStep::at(6.7),
        ScriptStep::at(9.5).key(Key::W).cursor(300.0, 0.0),
        ScriptStep::at(11.5),
        ScriptStep::at(12.0).key(Key::E),
        ScriptStep::at(12.2),
        ScriptStep::at(13.0).key(Key::W).key(Key::Shift).cursor(-300.0, 50.0),
        ScriptStep::at(15.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_apply_in_time_order() {
        let mut script = InputScript::new(vec![
            ScriptStep::at(1.0).key(Key::S),
            ScriptStep::at(0.0).key(Key::W).cursor(5.0, 5.0),
        ]);

        let first = script.sample(0.5);
        assert!(first.key_down(Key::W));
        assert!(!first.key_down(Key::S));

        let second = script.sample(1.0);
        assert!(second.key_down(Key::S));
        assert!(!second.key_down(Key::W));
        assert_eq!(second.cursor, [5.0, 5.0]);
        assert!(script.is_done());
    }

    #[test]
    fn test_demo_script_releases_interact() {
        let mut script = InputScript::new(demo_script());
        assert!(script.sample(6.5).key_down(Key::E));
        assert!(!script.sample(6.8).key_down(Key::E));
    }

    #[test]
    fn test_step_from_toml() {
        let step: ScriptStep = toml::from_str("at = 2.0\nkeys = [\"W\", \"Shift\"]\n").unwrap();
        assert_eq!(step.at, 2.0);
        assert!(step.keys.contains(&Key::Shift));
        assert!(step.cursor.is_none());
    }
}
