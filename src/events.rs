use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseEventKind};

/// Pointer button reported by a release event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

impl MouseButton {
    /// Wheel "buttons" never count as clicks
    #[must_use]
    pub fn is_wheel(self) -> bool {
        matches!(self, MouseButton::WheelUp | MouseButton::WheelDown)
    }
}

/// Raw input event as delivered by the host for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    JoyHatMotion { value: (i8, i8) },
    JoyAxisMotion { axis: u8, value: f32 },
    JoyButtonDown { button: u8 },
    /// Pointer release in window pixel coordinates
    MouseButtonUp { button: MouseButton, x: i32, y: i32 },
    /// Touch release in normalized [0, 1] window coordinates
    FingerUp { x: f32, y: f32 },
}

impl InputEvent {
    /// Converts a terminal event into an input event.
    ///
    /// Mouse positions are given in terminal cells; `cell_size` is the pixel
    /// size of one cell on the host surface.
    #[must_use]
    pub fn from_terminal(event: &Event, cell_size: (u32, u32)) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Self::KeyDown(key.code)),
            Event::Mouse(mouse) => {
                let button = match mouse.kind {
                    MouseEventKind::Up(event::MouseButton::Left) => MouseButton::Left,
                    MouseEventKind::Up(event::MouseButton::Middle) => MouseButton::Middle,
                    MouseEventKind::Up(event::MouseButton::Right) => MouseButton::Right,
                    MouseEventKind::ScrollUp => MouseButton::WheelUp,
                    MouseEventKind::ScrollDown => MouseButton::WheelDown,
                    MouseEventKind::Down(_)
                    | MouseEventKind::Drag(_)
                    | MouseEventKind::Moved
                    | MouseEventKind::ScrollLeft
                    | MouseEventKind::ScrollRight => return None,
                };
                let (cell_w, cell_h) = cell_size;
                Some(Self::MouseButtonUp {
                    button,
                    x: i32::from(mouse.column) * cell_w as i32,
                    y: i32::from(mouse.row) * cell_h as i32,
                })
            }
            Event::Key(_)
            | Event::FocusGained
            | Event::FocusLost
            | Event::Paste(_)
            | Event::Resize(_, _) => None,
        }
    }
}
