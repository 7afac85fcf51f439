use crate::graphics::{Color, Rect, Surface};
use crate::widget::{RenderOutcome, render_hash};

use super::{FancyStyle, Selector, SelectorStyle};

/// Inset of the chevron from the corners of its square
const ARROW_INSET: i32 = 5;
/// Half thickness of the chevron shaft
const ARROW_HALF_THICKNESS: i32 = 2;

/// Placement of every piece of a fancy selector surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FancyLayout {
    pub width: i32,
    pub height: i32,
    pub title_origin: (i32, i32),
    pub label_origin: (i32, i32),
    pub background: Rect,
    pub arrow_left: Rect,
    pub arrow_right: Rect,
}

impl FancyLayout {
    /// Lays out the surface from the rendered title and label sizes
    #[must_use]
    pub fn compute(style: &FancyStyle, title: (i32, i32), label: (i32, i32)) -> Self {
        let [margin_left, margin_right, margin_vertical] = style.arrow_margin;
        let [inflate_x, inflate_y] = style.box_inflate;
        let box_margin = style.box_margin;
        let (title_width, title_height) = title;
        let (label_width, label_height) = label;
        let arrow = title_height;
        let top = inflate_y / 2;

        let arrow_left = Rect::new(
            title_width + margin_left + box_margin,
            margin_vertical + top,
            arrow,
            arrow,
        );
        let arrow_right = Rect::new(
            title_width + 2 * margin_left + box_margin + margin_right + label_width + arrow,
            margin_vertical + top,
            arrow,
            arrow,
        );
        let background = Rect::new(
            title_width + box_margin,
            top,
            label_width + 2 * (margin_left + margin_right + arrow),
            label_height,
        )
        .inflate(inflate_x, inflate_y);

        Self {
            width: title_width
                + 2 * margin_left
                + 2 * margin_right
                + box_margin
                + label_width
                + 2 * arrow
                + inflate_x / 2,
            height: title_height + inflate_y,
            title_origin: (0, top),
            label_origin: (
                title_width + arrow + margin_left + margin_right + box_margin,
                top,
            ),
            background,
            arrow_left,
            arrow_right,
        }
    }
}

/// Left pointing chevron inscribed in `square`
#[must_use]
pub fn arrow_left_points(square: Rect) -> [(i32, i32); 8] {
    let (left, right) = (square.left() + ARROW_INSET, square.right() - ARROW_INSET);
    let (top, bottom) = (square.top() + ARROW_INSET, square.bottom() - ARROW_INSET);
    let (cx, cy) = (square.center_x(), square.center_y());
    [
        (left, cy),
        (cx, top),
        (cx, cy - ARROW_HALF_THICKNESS),
        (right, cy - ARROW_HALF_THICKNESS),
        (right, cy + ARROW_HALF_THICKNESS),
        (cx, cy + ARROW_HALF_THICKNESS),
        (cx, bottom),
        (left, cy),
    ]
}

/// Right pointing chevron: the left one mirrored about the square's center
#[must_use]
pub fn arrow_right_points(square: Rect) -> [(i32, i32); 8] {
    let axis = square.left() + square.right();
    arrow_left_points(square).map(|(x, y)| (axis - x, y))
}

impl<T: PartialEq> Selector<T> {
    pub(super) fn render_surface(&mut self) -> RenderOutcome {
        let hash = render_hash(&(
            &self.current().label,
            self.base.is_selected(),
            self.base.is_visible(),
            self.index,
            self.base.is_readonly(),
        ));
        if !self.base.render_hash_changed(hash) {
            return RenderOutcome::Unchanged;
        }

        let color = self.base.font_color_status();
        let surface = match self.style {
            SelectorStyle::Classic => self.render_classic(color),
            SelectorStyle::Fancy => self.render_fancy(color),
        };
        let surface = self.base.apply_transforms(surface);
        self.base.set_size(surface.size());
        tracing::trace!(
            widget = self.base.id(),
            width = surface.width(),
            height = surface.height(),
            "Selector rendered"
        );
        self.surface = Some(surface);
        self.base.force_menu_surface_update();
        RenderOutcome::Rendered
    }

    fn render_classic(&self, color: Color) -> Surface {
        let text = format!("{}< {} >", self.base.title(), self.current().label);
        self.base.font().render_text(&text, color)
    }

    fn render_fancy(&self, color: Color) -> Surface {
        let font = self.base.font();
        let title = font.render_text(self.base.title(), color);
        let label = font.render_text(&self.current().label, color);
        let layout = FancyLayout::compute(&self.fancy, title.size(), label.size());

        let mut surface = Surface::sized(layout.width, layout.height);
        surface.blit(&title, layout.title_origin.0, layout.title_origin.1);
        surface.fill_rect(layout.background, self.fancy.bgcolor);
        surface.stroke_rect(
            layout.background,
            self.fancy.bordercolor,
            self.fancy.borderwidth,
        );
        surface.blit(&label, layout.label_origin.0, layout.label_origin.1);
        surface.fill_polygon(&arrow_left_points(layout.arrow_left), self.fancy.arrow_color);
        surface.fill_polygon(
            &arrow_right_points(layout.arrow_right),
            self.fancy.arrow_color,
        );
        surface
    }
}
