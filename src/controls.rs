use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

/// Hat value for a joystick pushed left
pub const JOY_LEFT: (i8, i8) = (-1, 0);
/// Hat value for a joystick pushed right
pub const JOY_RIGHT: (i8, i8) = (1, 0);
/// Hat value for a joystick pushed up
pub const JOY_UP: (i8, i8) = (0, 1);
/// Hat value for a joystick pushed down
pub const JOY_DOWN: (i8, i8) = (0, -1);

/// Key and joystick bindings shared by the menu and its widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub key_left: KeyCode,
    pub key_right: KeyCode,
    pub key_apply: KeyCode,
    pub key_move_up: KeyCode,
    pub key_move_down: KeyCode,
    pub key_back: KeyCode,
    pub key_close: KeyCode,
    pub joy_axis_x: u8,
    pub joy_axis_y: u8,
    pub joy_button_select: u8,
    pub joy_button_back: u8,
    /// Axis values within +/- this threshold are ignored
    pub joy_deadzone: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            key_left: KeyCode::Left,
            key_right: KeyCode::Right,
            key_apply: KeyCode::Enter,
            key_move_up: KeyCode::Up,
            key_move_down: KeyCode::Down,
            key_back: KeyCode::Backspace,
            key_close: KeyCode::Esc,
            joy_axis_x: 0,
            joy_axis_y: 1,
            joy_button_select: 0,
            joy_button_back: 1,
            joy_deadzone: 0.5,
        }
    }
}

impl Controls {
    /// Returns true if the key is bound to one of the controls
    #[must_use]
    pub fn is_recognized(&self, key: &KeyCode) -> bool {
        [
            &self.key_left,
            &self.key_right,
            &self.key_apply,
            &self.key_move_up,
            &self.key_move_down,
            &self.key_back,
            &self.key_close,
        ]
        .contains(&key)
    }

    /// Axis motion that counts as "left" on the horizontal axis
    #[must_use]
    pub fn axis_left(&self, axis: u8, value: f32) -> bool {
        axis == self.joy_axis_x && value < -self.joy_deadzone
    }

    /// Axis motion that counts as "right" on the horizontal axis
    #[must_use]
    pub fn axis_right(&self, axis: u8, value: f32) -> bool {
        axis == self.joy_axis_x && value > self.joy_deadzone
    }
}
