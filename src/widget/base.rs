use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::controls::Controls;
use crate::graphics::{BitmapFont, Color, Rect, Surface, TextRenderer};
use crate::menu::MenuContext;
use crate::sound::{NoSound, SoundPlayer};

use super::callbacks::{SelectCallback, UpdateCallback};

/// Space around the widget surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Padding {
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Text colors depending on widget state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontColors {
    pub normal: Color,
    pub selected: Color,
    pub readonly: Color,
    pub readonly_selected: Color,
}

impl Default for FontColors {
    fn default() -> Self {
        Self {
            normal: Color::rgb(70, 70, 70),
            selected: Color::WHITE,
            readonly: Color::rgb(120, 120, 120),
            readonly_selected: Color::rgb(190, 190, 190),
        }
    }
}

/// Post-render transforms applied to every widget surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub scale: Option<(f32, f32)>,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Clockwise quarter turns
    pub rotation: u8,
}

impl Transform {
    #[must_use]
    pub fn apply(&self, surface: Surface) -> Surface {
        let mut surface = surface;
        if let Some((sx, sy)) = self.scale {
            let (width, height) = surface.size();
            let width = (width as f32 * sx).round().max(0.0) as u32;
            let height = (height as f32 * sy).round().max(0.0) as u32;
            surface = surface.resized(width, height);
        }
        if self.flip_x || self.flip_y {
            surface = surface.flipped(self.flip_x, self.flip_y);
        }
        if self.rotation % 4 != 0 {
            surface = surface.rotated(self.rotation);
        }
        surface
    }
}

/// Hashes a render snapshot for change detection
#[must_use]
pub fn render_hash<H: Hash>(state: &H) -> u64 {
    let mut hasher = DefaultHasher::new();
    state.hash(&mut hasher);
    hasher.finish()
}

/// Shared widget services: geometry, state flags, collaborators and
/// generic callbacks
pub struct WidgetBase {
    title: String,
    id: String,
    position: (i32, i32),
    size: (i32, i32),
    padding: Padding,
    readonly: bool,
    selected: bool,
    visible: bool,
    pub keyboard_enabled: bool,
    pub joystick_enabled: bool,
    pub mouse_enabled: bool,
    pub touchscreen_enabled: bool,
    font_colors: FontColors,
    transform: Transform,
    font: Rc<dyn TextRenderer>,
    sound: Rc<dyn SoundPlayer>,
    controls: Controls,
    menu: Option<Rc<MenuContext>>,
    on_select: Option<SelectCallback>,
    update_callbacks: Vec<(usize, UpdateCallback)>,
    next_callback_id: usize,
    last_render_hash: Option<u64>,
}

impl WidgetBase {
    pub fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            position: (0, 0),
            size: (0, 0),
            padding: Padding::default(),
            readonly: false,
            selected: false,
            visible: true,
            keyboard_enabled: true,
            joystick_enabled: true,
            mouse_enabled: true,
            touchscreen_enabled: false,
            font_colors: FontColors::default(),
            transform: Transform::default(),
            font: Rc::new(BitmapFont::default()),
            sound: Rc::new(NoSound),
            controls: Controls::default(),
            menu: None,
            on_select: None,
            update_callbacks: Vec::new(),
            next_callback_id: 0,
            last_render_hash: None,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn font(&self) -> &dyn TextRenderer {
        self.font.as_ref()
    }

    pub fn set_font(&mut self, font: Rc<dyn TextRenderer>) {
        self.font = font;
        self.invalidate();
    }

    #[must_use]
    pub fn sound(&self) -> &dyn SoundPlayer {
        self.sound.as_ref()
    }

    pub fn set_sound(&mut self, sound: Rc<dyn SoundPlayer>) {
        self.sound = sound;
    }

    #[must_use]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn set_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }

    #[must_use]
    pub fn menu(&self) -> Option<&MenuContext> {
        self.menu.as_deref()
    }

    pub fn set_menu(&mut self, menu: Rc<MenuContext>) {
        self.menu = Some(menu);
    }

    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Updates the selection flag, firing the select callback on changes
    pub fn set_selected(&mut self, selected: bool) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;
        if let Some(callback) = self.on_select.as_mut() {
            callback(selected, &self.id);
        }
    }

    pub fn set_on_select(&mut self, callback: SelectCallback) {
        self.on_select = Some(callback);
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.force_menu_surface_update();
    }

    #[must_use]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
        self.force_menu_surface_update();
    }

    #[must_use]
    pub fn font_colors(&self) -> FontColors {
        self.font_colors
    }

    pub fn set_font_colors(&mut self, colors: FontColors) {
        self.font_colors = colors;
        self.invalidate();
    }

    /// Text color for the current readonly/selected state
    #[must_use]
    pub fn font_color_status(&self) -> Color {
        match (self.readonly, self.selected) {
            (true, true) => self.font_colors.readonly_selected,
            (true, false) => self.font_colors.readonly,
            (false, true) => self.font_colors.selected,
            (false, false) => self.font_colors.normal,
        }
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.invalidate();
    }

    #[must_use]
    pub fn apply_transforms(&self, surface: Surface) -> Surface {
        self.transform.apply(surface)
    }

    /// Top-left corner of the padded rect, in menu coordinates
    pub fn set_position(&mut self, x: i32, y: i32) {
        if self.position != (x, y) {
            self.position = (x, y);
            self.force_menu_surface_update();
        }
    }

    /// Size of the rendered surface, without padding
    pub fn set_size(&mut self, size: (i32, i32)) {
        self.size = size;
    }

    /// Widget rect.
    ///
    /// `to_real_position` translates menu coordinates into window
    /// coordinates; `apply_padding` includes the padding around the surface.
    #[must_use]
    pub fn get_rect(&self, to_real_position: bool, apply_padding: bool) -> Rect {
        let (x, y) = self.position;
        let (width, height) = self.size;
        let padding = self.padding;
        let rect = if apply_padding {
            Rect::new(
                x,
                y,
                width + padding.left + padding.right,
                height + padding.top + padding.bottom,
            )
        } else {
            Rect::new(x + padding.left, y + padding.top, width, height)
        };
        match self.menu.as_deref() {
            Some(menu) if to_real_position => {
                let (origin_x, origin_y) = menu.origin();
                rect.translate(origin_x, origin_y)
            }
            Some(_) | None => rect,
        }
    }

    /// Returns true and stores the hash if the render snapshot changed
    pub fn render_hash_changed(&mut self, hash: u64) -> bool {
        if self.last_render_hash == Some(hash) {
            return false;
        }
        self.last_render_hash = Some(hash);
        true
    }

    /// Forces the next render to rebuild the surface
    pub fn invalidate(&mut self) {
        self.last_render_hash = None;
    }

    pub fn force_menu_surface_update(&self) {
        if let Some(menu) = self.menu.as_deref() {
            menu.force_surface_update();
        }
    }

    /// Registers a callback run after any update that changed the widget
    pub fn add_update_callback(&mut self, callback: UpdateCallback) -> usize {
        let id = self.next_callback_id;
        self.next_callback_id += 1;
        self.update_callbacks.push((id, callback));
        id
    }

    /// Removes an update callback; returns false for unknown ids
    pub fn remove_update_callback(&mut self, id: usize) -> bool {
        let before = self.update_callbacks.len();
        self.update_callbacks.retain(|(callback_id, _)| *callback_id != id);
        before != self.update_callbacks.len()
    }

    pub fn apply_update_callbacks(&mut self) {
        for (_, callback) in &mut self.update_callbacks {
            callback(&self.id);
        }
    }
}
