use std::cell::Cell;
use std::rc::Rc;

use crate::controls::{Controls, JOY_DOWN, JOY_UP};
use crate::events::InputEvent;
use crate::graphics::{Color, Surface};
use crate::widget::Widget;

/// State a menu shares with the widgets it owns
#[derive(Debug, Default)]
pub struct MenuContext {
    window_size: Cell<(u32, u32)>,
    origin: Cell<(i32, i32)>,
    surface_dirty: Cell<bool>,
}

impl MenuContext {
    #[must_use]
    pub fn new(window_size: (u32, u32)) -> Self {
        Self {
            window_size: Cell::new(window_size),
            origin: Cell::new((0, 0)),
            surface_dirty: Cell::new(true),
        }
    }

    /// Host window size in pixels
    #[must_use]
    pub fn window_size(&self) -> (u32, u32) {
        self.window_size.get()
    }

    pub fn set_window_size(&self, size: (u32, u32)) {
        self.window_size.set(size);
        self.surface_dirty.set(true);
    }

    /// Window position of the menu surface's top-left corner
    #[must_use]
    pub fn origin(&self) -> (i32, i32) {
        self.origin.get()
    }

    pub fn set_origin(&self, origin: (i32, i32)) {
        self.origin.set(origin);
    }

    /// Called by widgets whose surface changed size or content
    pub fn force_surface_update(&self) {
        self.surface_dirty.set(true);
    }

    /// Returns and clears the pending surface update flag
    pub fn take_surface_update(&self) -> bool {
        self.surface_dirty.replace(false)
    }
}

/// Vertical list of widgets composited onto one surface
pub struct Menu {
    context: Rc<MenuContext>,
    widgets: Vec<Box<dyn Widget>>,
    selected: Option<usize>,
    controls: Controls,
    background: Color,
    spacing: i32,
    surface: Surface,
}

impl Menu {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            context: Rc::new(MenuContext::new((width, height))),
            widgets: Vec::new(),
            selected: None,
            controls: Controls::default(),
            background: Color::rgb(40, 41, 35),
            spacing: 8,
            surface: Surface::new(width, height),
        }
    }

    #[must_use]
    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn context(&self) -> Rc<MenuContext> {
        Rc::clone(&self.context)
    }

    /// Adds a widget; the first widget added becomes the selected one
    pub fn add_widget(&mut self, mut widget: Box<dyn Widget>) {
        widget.base_mut().set_menu(Rc::clone(&self.context));
        if self.selected.is_none() {
            widget.base_mut().set_selected(true);
            self.selected = Some(self.widgets.len());
        }
        self.widgets.push(widget);
        self.context.force_surface_update();
    }

    #[must_use]
    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.widgets
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_widget(&self) -> Option<&dyn Widget> {
        self.selected
            .and_then(|index| self.widgets.get(index))
            .map(|widget| widget.as_ref())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.set_window_size((width, height));
        self.surface = Surface::new(width, height);
    }

    /// Resets every widget to its default value
    pub fn reset_value(&mut self) {
        for widget in &mut self.widgets {
            widget.reset_value();
        }
        self.context.force_surface_update();
    }

    /// Moves the selection to another widget, skipping hidden ones
    pub fn select(&mut self, index: usize) {
        if self.selected == Some(index) {
            return;
        }
        let Some(target) = self.widgets.get_mut(index) else {
            return;
        };
        if !target.base().is_visible() {
            return;
        }
        target.base_mut().set_selected(true);
        if let Some(previous) = self.selected.and_then(|current| self.widgets.get_mut(current)) {
            previous.base_mut().set_selected(false);
        }
        self.selected = Some(index);
        self.context.force_surface_update();
    }

    fn select_relative(&mut self, step: isize) {
        let count = self.widgets.len();
        let Some(current) = self.selected else {
            return;
        };
        for offset in 1..count {
            let candidate = (current as isize + step * offset as isize).rem_euclid(count as isize);
            let candidate = candidate as usize;
            if self
                .widgets
                .get(candidate)
                .is_some_and(|widget| widget.base().is_visible())
            {
                self.select(candidate);
                return;
            }
        }
    }

    /// Feeds one tick of events; returns true if anything changed
    pub fn update(&mut self, events: &[InputEvent]) -> bool {
        let mut updated = false;

        // A release over another widget moves the selection there first
        for event in events {
            let Some((x, y)) = self.release_position(event) else {
                continue;
            };
            if let Some(index) = self.widget_at(x, y)
                && self.selected != Some(index)
            {
                self.select(index);
                updated = true;
            }
        }

        if let Some(widget) = self.selected.and_then(|index| self.widgets.get_mut(index)) {
            updated |= widget.update(events);
        }

        for event in events {
            let step = match *event {
                InputEvent::KeyDown(key) if key == self.controls.key_move_down => 1,
                InputEvent::KeyDown(key) if key == self.controls.key_move_up => -1,
                InputEvent::JoyHatMotion { value } if value == JOY_DOWN => 1,
                InputEvent::JoyHatMotion { value } if value == JOY_UP => -1,
                InputEvent::JoyAxisMotion { axis, value } if axis == self.controls.joy_axis_y => {
                    if value > self.controls.joy_deadzone {
                        1
                    } else if value < -self.controls.joy_deadzone {
                        -1
                    } else {
                        continue;
                    }
                }
                _ => continue,
            };
            let before = self.selected;
            self.select_relative(step);
            updated |= before != self.selected;
        }

        updated
    }

    /// Window pixel position of a pointer or touch release
    fn release_position(&self, event: &InputEvent) -> Option<(i32, i32)> {
        match *event {
            InputEvent::MouseButtonUp { button, x, y } if !button.is_wheel() => Some((x, y)),
            InputEvent::FingerUp { x, y } => {
                let (width, height) = self.context.window_size();
                Some(((x * width as f32) as i32, (y * height as f32) as i32))
            }
            InputEvent::MouseButtonUp { .. }
            | InputEvent::KeyDown(_)
            | InputEvent::JoyHatMotion { .. }
            | InputEvent::JoyAxisMotion { .. }
            | InputEvent::JoyButtonDown { .. } => None,
        }
    }

    fn widget_at(&self, x: i32, y: i32) -> Option<usize> {
        self.widgets.iter().position(|widget| {
            widget.base().is_visible() && widget.base().get_rect(true, true).contains(x, y)
        })
    }

    /// Renders widgets, lays them out centered and composites the menu
    pub fn draw(&mut self) -> &Surface {
        for widget in &mut self.widgets {
            widget.render();
        }

        let visible = || self.widgets.iter().filter(|widget| widget.base().is_visible());
        let count = visible().count() as i32;
        let content_height: i32 = visible()
            .map(|widget| widget.base().get_rect(false, true).height)
            .sum::<i32>()
            + self.spacing * (count - 1).max(0);

        let (width, height) = self.surface.size();
        let mut y = ((height - content_height) / 2).max(0);
        for widget in self.widgets.iter_mut().filter(|widget| widget.base().is_visible()) {
            let outer = widget.base().get_rect(false, true);
            let x = ((width - outer.width) / 2).max(0);
            widget.base_mut().set_position(x, y);
            y += outer.height + self.spacing;
        }

        if self.context.take_surface_update() {
            tracing::debug!(widgets = self.widgets.len(), "Redrawing menu surface");
            self.surface = Surface::filled(width as u32, height as u32, self.background);
            for widget in &mut self.widgets {
                widget.draw(&mut self.surface);
            }
        }
        &self.surface
    }
}
