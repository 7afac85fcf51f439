use image::imageops::{self, FilterType};
use image::{ImageFormat, Pixel, RgbaImage};
use std::path::Path;

use super::{Color, Rect};

/// RGBA pixel buffer widgets render into and hosts blit from
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Creates a fully transparent surface
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Creates a surface filled with a single color
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, color.to_rgba()),
        }
    }

    /// Surface size with negative dimensions clamped to zero
    #[must_use]
    pub fn sized(width: i32, height: i32) -> Self {
        Self::new(width.max(0) as u32, height.max(0) as u32)
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.image.width() as i32
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.image.height() as i32
    }

    #[must_use]
    pub fn size(&self) -> (i32, i32) {
        (self.width(), self.height())
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 {
            return None;
        }
        self.image
            .get_pixel_checked(x as u32, y as u32)
            .map(|pixel| {
                let [r, g, b, a] = pixel.0;
                Color::rgba(r, g, b, a)
            })
    }

    /// Blends a single pixel; out-of-bounds writes are dropped
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(pixel) = self.image.get_pixel_mut_checked(x as u32, y as u32) {
            pixel.blend(&color.to_rgba());
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let left = rect.left().max(0);
        let top = rect.top().max(0);
        let right = rect.right().min(self.width());
        let bottom = rect.bottom().min(self.height());
        for y in top..bottom {
            for x in left..right {
                self.put_pixel(x, y, color);
            }
        }
    }

    /// Draws a border of `width` pixels inside `rect`
    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32) {
        if width <= 0 {
            return;
        }
        if width * 2 >= rect.width || width * 2 >= rect.height {
            self.fill_rect(rect, color);
            return;
        }
        let inner_height = rect.height - 2 * width;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, width), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - width, rect.width, width), color);
        self.fill_rect(Rect::new(rect.x, rect.y + width, width, inner_height), color);
        self.fill_rect(
            Rect::new(rect.right() - width, rect.y + width, width, inner_height),
            color,
        );
    }

    /// Bresenham line, both endpoints included
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        let (mut x, mut y) = from;
        let (x1, y1) = to;
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let step_x = if x < x1 { 1 } else { -1 };
        let step_y = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += step_x;
            }
            if doubled <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    /// Fills a closed polygon; edge pixels are part of the shape
    pub fn fill_polygon(&mut self, points: &[(i32, i32)], color: Color) {
        let Some(min_y) = points.iter().map(|&(_, y)| y).min() else {
            return;
        };
        let max_y = points.iter().map(|&(_, y)| y).max().unwrap_or(min_y);
        let edges = || points.iter().zip(points.iter().cycle().skip(1));

        // Even-odd scanline fill sampled at pixel centers
        let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
        for y in min_y..=max_y {
            let scan = f64::from(y) + 0.5;
            crossings.clear();
            for (&(ax, ay), &(bx, by)) in edges() {
                let (ay, by) = (f64::from(ay), f64::from(by));
                if (ay <= scan && by > scan) || (by <= scan && ay > scan) {
                    let t = (scan - ay) / (by - ay);
                    crossings.push(f64::from(ax) + t * f64::from(bx - ax));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for span in crossings.chunks_exact(2) {
                if let [start, end] = span {
                    let first = (start - 0.5).ceil() as i32;
                    let last = (end - 0.5).floor() as i32;
                    for x in first..=last {
                        self.put_pixel(x, y, color);
                    }
                }
            }
        }

        for (&from, &to) in edges() {
            self.draw_line(from, to, color);
        }
    }

    /// Alpha-composites `source` with its top-left corner at (x, y)
    pub fn blit(&mut self, source: &Surface, x: i32, y: i32) {
        imageops::overlay(&mut self.image, &source.image, i64::from(x), i64::from(y));
    }

    /// Nearest-neighbour scale to an explicit size
    #[must_use]
    pub fn resized(&self, width: u32, height: u32) -> Self {
        Self {
            image: imageops::resize(&self.image, width, height, FilterType::Nearest),
        }
    }

    #[must_use]
    pub fn flipped(&self, horizontal: bool, vertical: bool) -> Self {
        let mut image = self.image.clone();
        if horizontal {
            image = imageops::flip_horizontal(&image);
        }
        if vertical {
            image = imageops::flip_vertical(&image);
        }
        Self { image }
    }

    /// Clockwise rotation by a number of quarter turns
    #[must_use]
    pub fn rotated(&self, quarter_turns: u8) -> Self {
        let image = match quarter_turns % 4 {
            1 => imageops::rotate90(&self.image),
            2 => imageops::rotate180(&self.image),
            3 => imageops::rotate270(&self.image),
            _ => self.image.clone(),
        };
        Self { image }
    }

    pub fn save_png(&self, path: &Path) -> image::ImageResult<()> {
        self.image.save_with_format(path, ImageFormat::Png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn test_fill_rect_clips_to_bounds() {
        let mut surface = Surface::new(4, 4);
        surface.fill_rect(Rect::new(-2, -2, 4, 4), RED);
        assert_eq!(surface.pixel(0, 0), Some(RED));
        assert_eq!(surface.pixel(1, 1), Some(RED));
        assert_eq!(surface.pixel(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_stroke_rect_leaves_inside() {
        let mut surface = Surface::new(10, 10);
        surface.stroke_rect(Rect::new(0, 0, 10, 10), RED, 2);
        assert_eq!(surface.pixel(0, 0), Some(RED));
        assert_eq!(surface.pixel(1, 5), Some(RED));
        assert_eq!(surface.pixel(8, 8), Some(RED));
        assert_eq!(surface.pixel(5, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_stroke_rect_zero_width_draws_nothing() {
        let mut surface = Surface::new(6, 6);
        surface.stroke_rect(Rect::new(0, 0, 6, 6), RED, 0);
        assert_eq!(surface, Surface::new(6, 6));
    }

    #[test]
    fn test_fill_polygon_square_includes_edges() {
        let mut surface = Surface::new(12, 12);
        surface.fill_polygon(&[(2, 2), (8, 2), (8, 8), (2, 8)], BLUE);
        for (x, y) in [(2, 2), (8, 8), (5, 5), (8, 2), (2, 8)] {
            assert_eq!(surface.pixel(x, y), Some(BLUE), "pixel ({x}, {y})");
        }
        assert_eq!(surface.pixel(1, 5), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(9, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_fill_polygon_triangle_tip() {
        let mut surface = Surface::new(20, 20);
        surface.fill_polygon(&[(2, 10), (10, 2), (10, 18)], BLUE);
        assert_eq!(surface.pixel(2, 10), Some(BLUE));
        assert_eq!(surface.pixel(8, 10), Some(BLUE));
        assert_eq!(surface.pixel(3, 3), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(11, 10), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_blit_offsets_source() {
        let mut target = Surface::filled(6, 6, Color::WHITE);
        let source = Surface::filled(2, 2, RED);
        target.blit(&source, 3, 4);
        assert_eq!(target.pixel(3, 4), Some(RED));
        assert_eq!(target.pixel(4, 5), Some(RED));
        assert_eq!(target.pixel(2, 4), Some(Color::WHITE));
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let surface = Surface::new(6, 2);
        assert_eq!(surface.rotated(1).size(), (2, 6));
        assert_eq!(surface.rotated(2).size(), (6, 2));
        assert_eq!(surface.resized(12, 4).size(), (12, 4));
    }
}
