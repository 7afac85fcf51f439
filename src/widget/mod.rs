mod base;
mod callbacks;
pub mod selector;

pub use base::{FontColors, Padding, Transform, WidgetBase, render_hash};
pub use callbacks::{SelectCallback, UpdateCallback};

use crate::events::InputEvent;
use crate::graphics::Surface;

/// Result of a render request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Nothing visible changed since the last render; the cached surface stands
    Unchanged,
    Rendered,
}

/// Capabilities a menu needs from any widget
pub trait Widget {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Rebuilds the cached surface if the widget state changed
    fn render(&mut self) -> RenderOutcome;

    /// Processes one tick of input; returns true if the widget changed
    fn update(&mut self, events: &[InputEvent]) -> bool;

    /// Last rendered surface
    fn surface(&self) -> Option<&Surface>;

    fn reset_value(&mut self);

    /// Renders if needed and blits the surface at the widget position
    fn draw(&mut self, target: &mut Surface) {
        self.render();
        if !self.base().is_visible() {
            return;
        }
        let rect = self.base().get_rect(false, false);
        if let Some(surface) = self.surface() {
            target.blit(surface, rect.x, rect.y);
        }
    }
}
