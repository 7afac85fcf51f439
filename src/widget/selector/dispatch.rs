use crate::controls::{JOY_LEFT, JOY_RIGHT};
use crate::events::InputEvent;
use crate::graphics::Rect;

use super::Selector;

/// Region of the widget hit by a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickZone {
    Title,
    /// First half of the options area
    Left,
    Right,
}

/// Splits `rect` into the title and the two halves of the options area.
///
/// `x` is expected to lie inside `rect`.
#[must_use]
pub fn click_zone(rect: Rect, title_width: i32, x: i32) -> ClickZone {
    let distance = x - (rect.left() + title_width);
    if distance <= 0 {
        return ClickZone::Title;
    }
    let options_width = rect.width - title_width;
    let fraction = f64::from(distance) / f64::from(options_width);
    if fraction <= 0.5 {
        ClickZone::Left
    } else {
        ClickZone::Right
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    MoveLeft,
    MoveRight,
    Confirm,
}

impl<T: PartialEq> Selector<T> {
    /// Applies one batch of events in order; returns true if any acted
    pub(super) fn dispatch(&mut self, events: &[InputEvent]) -> bool {
        if self.base.is_readonly() {
            return false;
        }

        let mut updated = false;
        for event in events {
            let Some(action) = self.classify(event) else {
                continue;
            };
            match action {
                Action::MoveLeft => self.move_left(),
                Action::MoveRight => self.move_right(),
                Action::Confirm => self.confirm(),
            }
            updated = true;
        }

        if updated {
            self.base.apply_update_callbacks();
        }
        updated
    }

    fn classify(&self, event: &InputEvent) -> Option<Action> {
        let base = &self.base;
        let controls = base.controls();
        match *event {
            InputEvent::KeyDown(key) => {
                if !base.keyboard_enabled || !controls.is_recognized(&key) {
                    return None;
                }
                if key == controls.key_left {
                    Some(Action::MoveLeft)
                } else if key == controls.key_right {
                    Some(Action::MoveRight)
                } else if key == controls.key_apply {
                    Some(Action::Confirm)
                } else {
                    None
                }
            }
            InputEvent::JoyHatMotion { value } if base.joystick_enabled => match value {
                JOY_LEFT => Some(Action::MoveLeft),
                JOY_RIGHT => Some(Action::MoveRight),
                _ => None,
            },
            InputEvent::JoyAxisMotion { axis, value } if base.joystick_enabled => {
                if controls.axis_left(axis, value) {
                    Some(Action::MoveLeft)
                } else if controls.axis_right(axis, value) {
                    Some(Action::MoveRight)
                } else {
                    None
                }
            }
            InputEvent::JoyButtonDown { button }
                if base.joystick_enabled && button == controls.joy_button_select =>
            {
                Some(Action::Confirm)
            }
            InputEvent::MouseButtonUp { button, x, y } if base.mouse_enabled && !button.is_wheel() => {
                self.click(x, y)
            }
            InputEvent::FingerUp { x, y } if base.touchscreen_enabled => {
                let Some(menu) = base.menu() else {
                    tracing::warn!(widget = base.id(), "Touch event ignored, selector has no menu");
                    return None;
                };
                let (width, height) = menu.window_size();
                self.click((x * width as f32) as i32, (y * height as f32) as i32)
            }
            InputEvent::JoyHatMotion { .. }
            | InputEvent::JoyAxisMotion { .. }
            | InputEvent::JoyButtonDown { .. }
            | InputEvent::MouseButtonUp { .. }
            | InputEvent::FingerUp { .. } => None,
        }
    }

    fn click(&self, x: i32, y: i32) -> Option<Action> {
        let rect = self.base.get_rect(true, false);
        if !rect.contains(x, y) {
            return None;
        }
        match click_zone(rect, self.title_width(), x) {
            ClickZone::Title => None,
            ClickZone::Left => Some(Action::MoveLeft),
            ClickZone::Right => Some(Action::MoveRight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MouseButton;
    use crate::graphics::FixedFont;
    use crate::menu::MenuContext;
    use crate::widget::Widget;
    use crate::widget::selector::testing::{Log, logged_builder};
    use crossterm::event::KeyCode;
    use std::rc::Rc;

    fn selector(log: &Log) -> Selector<i32> {
        logged_builder(&["a", "b", "c"], log).build().unwrap()
    }

    /// Renders so the widget has a rect: "Mode< a >" is 90x20 at the origin
    fn placed(log: &Log) -> Selector<i32> {
        let mut selector = selector(log);
        selector.render();
        selector
    }

    fn release(x: i32, y: i32) -> InputEvent {
        InputEvent::MouseButtonUp {
            button: MouseButton::Left,
            x,
            y,
        }
    }

    #[test]
    fn test_click_zone() {
        let rect = Rect::new(0, 0, 100, 20);
        assert_eq!(click_zone(rect, 20, 40), ClickZone::Left);
        assert_eq!(click_zone(rect, 20, 90), ClickZone::Right);
        assert_eq!(click_zone(rect, 20, 10), ClickZone::Title);
        assert_eq!(click_zone(rect, 20, 20), ClickZone::Title);
        assert_eq!(click_zone(rect, 20, 60), ClickZone::Left);
        assert_eq!(click_zone(rect, 20, 61), ClickZone::Right);
    }

    #[test]
    fn test_key_left_moves_and_calls_back_once() {
        let log = Log::default();
        let mut selector = selector(&log);
        assert!(selector.update(&[InputEvent::KeyDown(KeyCode::Left)]));
        assert_eq!(selector.get_index(), 2);
        assert_eq!(*log.borrow(), vec!["change:2:[20]", "sound:key_add"]);
    }

    #[test]
    fn test_confirm_plays_sound_then_applies() {
        let log = Log::default();
        let mut selector = selector(&log);
        selector.set_value(1).unwrap();
        assert!(selector.update(&[InputEvent::KeyDown(KeyCode::Enter)]));
        assert!(selector.update(&[InputEvent::JoyButtonDown { button: 0 }]));
        assert_eq!(selector.get_index(), 1);
        assert_eq!(
            *log.borrow(),
            vec![
                "sound:open_menu",
                "return:1:[10]",
                "sound:open_menu",
                "return:1:[10]"
            ]
        );
    }

    #[test]
    fn test_readonly_ignores_everything() {
        let log = Log::default();
        let mut selector = logged_builder(&["a", "b"], &log)
            .readonly(true)
            .build()
            .unwrap();
        let events = [
            InputEvent::KeyDown(KeyCode::Right),
            InputEvent::KeyDown(KeyCode::Enter),
            InputEvent::JoyHatMotion { value: JOY_RIGHT },
        ];
        assert!(!selector.update(&events));
        assert_eq!(selector.get_index(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unrecognized_key_is_skipped() {
        let log = Log::default();
        let mut selector = selector(&log);
        assert!(!selector.update(&[InputEvent::KeyDown(KeyCode::Char('x'))]));
        assert!(!selector.update(&[InputEvent::KeyDown(KeyCode::Up)]));
        assert_eq!(selector.get_index(), 0);
    }

    #[test]
    fn test_joystick_hat_and_axis() {
        let log = Log::default();
        let mut selector = selector(&log);
        assert!(selector.update(&[InputEvent::JoyHatMotion { value: JOY_RIGHT }]));
        assert_eq!(selector.get_index(), 1);
        assert!(selector.update(&[InputEvent::JoyAxisMotion { axis: 0, value: -0.9 }]));
        assert_eq!(selector.get_index(), 0);
        assert!(!selector.update(&[InputEvent::JoyAxisMotion { axis: 0, value: 0.2 }]));
        assert!(!selector.update(&[InputEvent::JoyAxisMotion { axis: 1, value: 0.9 }]));
        assert_eq!(selector.get_index(), 0);
    }

    #[test]
    fn test_disabled_joystick_is_ignored() {
        let log = Log::default();
        let mut selector = selector(&log);
        selector.base_mut().joystick_enabled = false;
        let events = [
            InputEvent::JoyHatMotion { value: JOY_LEFT },
            InputEvent::JoyAxisMotion { axis: 0, value: 1.0 },
            InputEvent::JoyButtonDown { button: 0 },
        ];
        assert!(!selector.update(&events));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_disabled_keyboard_is_ignored() {
        let log = Log::default();
        let mut selector = selector(&log);
        selector.base_mut().keyboard_enabled = false;
        assert!(!selector.update(&[InputEvent::KeyDown(KeyCode::Right)]));
        assert_eq!(selector.get_index(), 0);
    }

    #[test]
    fn test_batch_applies_in_order_and_runs_update_callbacks_once() {
        let log = Log::default();
        let mut selector = selector(&log);
        let hook = Rc::clone(&log);
        selector
            .base_mut()
            .add_update_callback(Box::new(move |id: &str| hook.borrow_mut().push(format!("update:{id}"))));
        let events = [
            InputEvent::KeyDown(KeyCode::Right),
            InputEvent::KeyDown(KeyCode::Char('q')),
            InputEvent::KeyDown(KeyCode::Right),
        ];
        assert!(selector.update(&events));
        assert_eq!(selector.get_index(), 2);
        assert_eq!(
            *log.borrow(),
            vec![
                "change:1:[10]",
                "sound:key_add",
                "change:2:[20]",
                "sound:key_add",
                "update:mode"
            ]
        );
    }

    #[test]
    fn test_mouse_click_zones() {
        let log = Log::default();
        let mut selector = placed(&log);
        // Title is 40 wide, options span 40..90
        assert!(!selector.update(&[release(30, 5)]));
        assert!(selector.update(&[release(60, 5)]));
        assert_eq!(selector.get_index(), 2);
        assert!(selector.update(&[release(80, 5)]));
        assert_eq!(selector.get_index(), 0);
        assert!(!selector.update(&[release(95, 5)]));
        assert!(!selector.update(&[release(60, 25)]));
    }

    #[test]
    fn test_wheel_and_disabled_mouse_are_ignored() {
        let log = Log::default();
        let mut selector = placed(&log);
        let wheel = InputEvent::MouseButtonUp {
            button: MouseButton::WheelUp,
            x: 80,
            y: 5,
        };
        assert!(!selector.update(&[wheel]));
        selector.base_mut().mouse_enabled = false;
        assert!(!selector.update(&[release(80, 5)]));
        assert_eq!(selector.get_index(), 0);
    }

    #[test]
    fn test_touch_translates_with_window_size() {
        let log = Log::default();
        let mut selector = placed(&log);
        let touch = InputEvent::FingerUp { x: 0.4, y: 0.1 };
        assert!(!selector.update(&[touch]));

        selector.base_mut().touchscreen_enabled = true;
        assert!(!selector.update(&[touch]));

        selector
            .base_mut()
            .set_menu(Rc::new(MenuContext::new((200, 100))));
        // (80, 10): right half of the options
        assert!(selector.update(&[touch]));
        assert_eq!(selector.get_index(), 1);
        assert!(selector.update(&[InputEvent::FingerUp { x: 0.25, y: 0.1 }]));
        assert_eq!(selector.get_index(), 0);
    }

    #[test]
    fn test_click_uses_menu_origin() {
        let log = Log::default();
        let mut selector = placed(&log);
        let menu = Rc::new(MenuContext::new((400, 300)));
        menu.set_origin((100, 50));
        selector.base_mut().set_menu(menu);
        assert!(!selector.update(&[release(80, 5)]));
        assert!(selector.update(&[release(180, 55)]));
        assert_eq!(selector.get_index(), 1);
    }

    #[test]
    fn test_middle_and_right_buttons_click() {
        let log = Log::default();
        let mut selector = placed(&log);
        let middle = InputEvent::MouseButtonUp {
            button: MouseButton::Middle,
            x: 60,
            y: 5,
        };
        let right = InputEvent::MouseButtonUp {
            button: MouseButton::Right,
            x: 80,
            y: 5,
        };
        assert!(selector.update(&[middle]));
        assert_eq!(selector.get_index(), 2);
        assert!(selector.update(&[right]));
        assert_eq!(selector.get_index(), 0);
    }

    #[test]
    fn test_click_zones_follow_font_swapped_on_base() {
        let log = Log::default();
        let mut selector = placed(&log);
        selector.base_mut().set_font(Rc::new(FixedFont {
            advance: 20,
            height: 20,
        }));
        selector.render();
        // "Mode" is now 80 wide, the widget 180
        assert_eq!(selector.title_width(), 80);
        assert!(!selector.update(&[release(60, 5)]));
        assert_eq!(selector.get_index(), 0);
        assert!(log.borrow().is_empty());
        assert!(selector.update(&[release(100, 5)]));
        assert_eq!(selector.get_index(), 2);
    }
}
