use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{Pixel, Point};
use serde::{Deserialize, Serialize};
use u8g2_fonts::FontRenderer;
use u8g2_fonts::fonts;
use u8g2_fonts::types::{FontColor, VerticalPosition};

use super::{Color, Surface};

/// Font metrics and text rasterization used by widgets
pub trait TextRenderer {
    /// Pixel size `(width, height)` the text occupies once rendered
    fn text_size(&self, text: &str) -> (i32, i32);

    /// Renders the text onto a transparent surface of `text_size(text)`
    fn render_text(&self, text: &str, color: Color) -> Surface;

    fn text_width(&self, text: &str) -> i32 {
        self.text_size(text).0
    }
}

/// Built-in bitmap faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFace {
    Small,
    #[default]
    Regular,
    Large,
}

/// Bitmap font backed by the u8g2 font collection
pub struct BitmapFont {
    renderer: FontRenderer,
    line_height: i32,
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::new(FontFace::default())
    }
}

impl BitmapFont {
    #[must_use]
    pub fn new(face: FontFace) -> Self {
        let renderer = match face {
            FontFace::Small => FontRenderer::new::<fonts::u8g2_font_helvR08_tf>(),
            FontFace::Regular => FontRenderer::new::<fonts::u8g2_font_helvR14_tf>(),
            FontFace::Large => FontRenderer::new::<fonts::u8g2_font_helvR24_tf>(),
        }
        .with_ignore_unknown_chars(true);

        // Line height spans the tallest ascender down to the deepest descender
        let line_height = renderer
            .get_rendered_dimensions("Ag|jy", Point::new(0, 0), VerticalPosition::Top)
            .ok()
            .and_then(|dims| dims.bounding_box)
            .map_or(0, |bbox| bbox.top_left.y + bbox.size.height as i32);

        Self {
            renderer,
            line_height,
        }
    }
}

impl TextRenderer for BitmapFont {
    fn text_size(&self, text: &str) -> (i32, i32) {
        let width = self
            .renderer
            .get_rendered_dimensions(text, Point::new(0, 0), VerticalPosition::Top)
            .map_or(0, |dims| dims.advance.x.max(0));
        (width, self.line_height)
    }

    fn render_text(&self, text: &str, color: Color) -> Surface {
        let (width, height) = self.text_size(text);
        let mut surface = Surface::sized(width, height);
        let mut canvas = GlyphCanvas {
            surface: &mut surface,
            color,
        };
        if let Err(err) = self.renderer.render(
            text,
            Point::new(0, 0),
            VerticalPosition::Top,
            FontColor::Transparent(Rgb888::new(color.r, color.g, color.b)),
            &mut canvas,
        ) {
            tracing::warn!(error = ?err, text, "Could not render text");
        }
        surface
    }
}

/// Draw target that stamps glyph pixels onto a surface in one color
struct GlyphCanvas<'a> {
    surface: &'a mut Surface,
    color: Color,
}

impl OriginDimensions for GlyphCanvas<'_> {
    fn size(&self) -> Size {
        let (width, height) = self.surface.size();
        Size::new(width as u32, height as u32)
    }
}

impl DrawTarget for GlyphCanvas<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, _color) in pixels {
            self.surface.put_pixel(coord.x, coord.y, self.color);
        }
        Ok(())
    }
}

/// Deterministic metrics for tests: every char is a solid block
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedFont {
    pub advance: i32,
    pub height: i32,
}

#[cfg(test)]
impl Default for FixedFont {
    fn default() -> Self {
        Self {
            advance: 10,
            height: 20,
        }
    }
}

#[cfg(test)]
impl TextRenderer for FixedFont {
    fn text_size(&self, text: &str) -> (i32, i32) {
        (self.advance * text.chars().count() as i32, self.height)
    }

    fn render_text(&self, text: &str, color: Color) -> Surface {
        let (width, height) = self.text_size(text);
        Surface::filled(width.max(0) as u32, height.max(0) as u32, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_font_metrics_grow_with_text() {
        let font = BitmapFont::new(FontFace::Small);
        let (short, height) = font.text_size("Hi");
        let (long, _) = font.text_size("Hello world");
        assert!(height > 0);
        assert!(long > short);
        assert_eq!(font.text_size("").0, 0);
    }

    #[test]
    fn test_bitmap_font_skips_unknown_glyphs() {
        let font = BitmapFont::new(FontFace::Small);
        let text = "Mode \u{2603}";
        let surface = font.render_text(text, Color::WHITE);
        assert_eq!(surface.size(), font.text_size(text));
        assert!(surface.image().pixels().any(|pixel| pixel.0[3] > 0));
    }

    #[test]
    fn test_bitmap_font_draws_pixels() {
        let font = BitmapFont::new(FontFace::Regular);
        let surface = font.render_text("Mode", Color::WHITE);
        let (width, height) = font.text_size("Mode");
        assert_eq!(surface.size(), (width, height));
        let painted = surface.image().pixels().filter(|pixel| pixel.0[3] > 0).count();
        assert!(painted > 0);
    }

    #[test]
    fn test_larger_face_is_taller() {
        let small = BitmapFont::new(FontFace::Small).text_size("A").1;
        let large = BitmapFont::new(FontFace::Large).text_size("A").1;
        assert!(large > small);
    }
}
