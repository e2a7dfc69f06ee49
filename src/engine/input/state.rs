// Per-tick input state fed from winit events

use super::action::{default_bindings, Action};
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, KeyEvent, Touch, TouchPhase};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Fraction of the window width that acts as the jump touch zone (right
/// side) and the crouch touch zone (left side)
const TOUCH_ZONE: f64 = 0.2;

/// Tracks which actions are held and which were pressed since the last
/// update tick.
pub struct InputState {
    bindings: HashMap<KeyCode, Action>,
    pressed: HashSet<Action>,
    just_pressed: HashSet<Action>,
    /// Active touches mapped to the action their start zone selected
    touches: HashMap<u64, Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            touches: HashMap::new(),
        }
    }

    /// Feed a winit keyboard event. Key repeats are ignored.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        let Some(&action) = self.bindings.get(&key_code) else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                if !event.repeat {
                    self.press(action);
                }
            }
            ElementState::Released => {
                self.pressed.remove(&action);
            }
        }
    }

    /// Feed a winit touch event. Touches starting in the right edge zone
    /// jump, touches in the left edge zone crouch.
    pub fn process_touch(&mut self, touch: &Touch, window_width: f64) {
        match touch.phase {
            TouchPhase::Started => {
                let x = touch.location.x;
                let action = if x > window_width * (1.0 - TOUCH_ZONE) {
                    Some(Action::Jump)
                } else if x < window_width * TOUCH_ZONE {
                    Some(Action::Crouch)
                } else {
                    None
                };
                if let Some(action) = action {
                    self.touches.insert(touch.id, action);
                    self.press(action);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if let Some(action) = self.touches.remove(&touch.id) {
                    // Only release if no other touch holds the same action
                    if !self.touches.values().any(|a| *a == action) {
                        self.pressed.remove(&action);
                    }
                }
            }
            TouchPhase::Moved => {}
        }
    }

    fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Whether the action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Whether the action was pressed since the last update tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Consume the per-tick press edges. Call once per update tick.
    pub fn end_update(&mut self) {
        self.just_pressed.clear();
    }

    #[cfg(test)]
    pub(crate) fn press_for_test(&mut self, action: Action) {
        self.press(action);
    }

    #[cfg(test)]
    pub(crate) fn release_for_test(&mut self, action: Action) {
        self.pressed.remove(&action);
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, Force};

    fn touch(id: u64, phase: TouchPhase, x: f64) -> Touch {
        Touch {
            device_id: unsafe { DeviceId::dummy() },
            phase,
            location: PhysicalPosition::new(x, 100.0),
            force: None::<Force>,
            id,
        }
    }

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        input.press(Action::MoveLeft);
        assert!(input.is_pressed(Action::MoveLeft));
        assert!(input.just_pressed(Action::MoveLeft));

        input.end_update();
        assert!(input.is_pressed(Action::MoveLeft));
        assert!(!input.just_pressed(Action::MoveLeft));

        input.pressed.remove(&Action::MoveLeft);
        assert!(!input.is_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_repeat_press_is_not_a_new_edge() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        input.end_update();
        input.press(Action::Jump);
        assert!(!input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_touch_right_zone_jumps() {
        let mut input = InputState::new();
        input.process_touch(&touch(1, TouchPhase::Started, 750.0), 800.0);
        assert!(input.is_pressed(Action::Jump));

        input.process_touch(&touch(1, TouchPhase::Ended, 750.0), 800.0);
        assert!(!input.is_pressed(Action::Jump));
    }

    #[test]
    fn test_touch_left_zone_crouches() {
        let mut input = InputState::new();
        input.process_touch(&touch(1, TouchPhase::Started, 50.0), 800.0);
        assert!(input.is_pressed(Action::Crouch));
        assert!(!input.is_pressed(Action::Jump));
    }

    #[test]
    fn test_touch_middle_does_nothing() {
        let mut input = InputState::new();
        input.process_touch(&touch(1, TouchPhase::Started, 400.0), 800.0);
        assert!(!input.is_pressed(Action::Jump));
        assert!(!input.is_pressed(Action::Crouch));
    }

    #[test]
    fn test_two_touches_one_release_keeps_action() {
        let mut input = InputState::new();
        input.process_touch(&touch(1, TouchPhase::Started, 750.0), 800.0);
        input.process_touch(&touch(2, TouchPhase::Started, 790.0), 800.0);

        input.process_touch(&touch(1, TouchPhase::Ended, 750.0), 800.0);
        assert!(input.is_pressed(Action::Jump));

        input.process_touch(&touch(2, TouchPhase::Ended, 790.0), 800.0);
        assert!(!input.is_pressed(Action::Jump));
    }
}
