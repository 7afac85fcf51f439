mod color;
mod font;
mod geometry;
mod surface;

pub use color::Color;
pub use font::{BitmapFont, FontFace, TextRenderer};
pub use geometry::Rect;
pub use surface::Surface;

#[cfg(test)]
pub(crate) use font::FixedFont;
