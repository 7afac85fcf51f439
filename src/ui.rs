use menu_selector::Surface;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::app::App;

/// Pixels covered by one terminal cell
pub const CELL_SIZE: (u32, u32) = (1, 2);

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Menu
            Constraint::Length(1), // Status
        ])
        .split(f.area());

    if let [canvas, status] = &chunks[..] {
        render_menu(f, app, *canvas);
        render_status(f, app, *status);
    }
}

fn render_menu(f: &mut Frame, app: &mut App, area: Rect) {
    app.fit(
        u32::from(area.width) * CELL_SIZE.0,
        u32::from(area.height) * CELL_SIZE.1,
    );
    f.render_widget(SurfaceView(app.menu.draw()), area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let text = truncate(&app.status(), usize::from(area.width).saturating_sub(1));
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(text, Style::default().fg(Color::Cyan)),
        ]))
        .style(Style::default().bg(Color::Black)),
        area,
    );
}

/// Cuts `text` to at most `max_width` terminal columns
fn truncate(text: &str, max_width: usize) -> String {
    let mut width = 0;
    text.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= max_width
        })
        .collect()
}

/// Draws a surface with "▀" cells: the foreground is the upper pixel, the
/// background the lower one
struct SurfaceView<'a>(&'a Surface);

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let x = i32::from(col);
                let y = i32::from(row) * 2;
                let top = self.0.pixel(x, y).map_or(Color::Reset, to_terminal);
                let bottom = self.0.pixel(x, y + 1).map_or(Color::Reset, to_terminal);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("▀").set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}

fn to_terminal(color: menu_selector::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
