use serde::{Deserialize, Serialize};

use crate::error::SelectorError;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorInput", into = "Vec<u8>")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Result<Self, SelectorError> {
        let invalid = || SelectorError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |start: usize| {
            digits
                .get(start..start + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(invalid)
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Validates an `[r, g, b]` or `[r, g, b, a]` component list
    pub fn from_components(components: &[i64]) -> Result<Self, SelectorError> {
        let invalid = || SelectorError::InvalidColor(format!("{:?}", components));
        let channel = |value: &i64| u8::try_from(*value).map_err(|_| invalid());
        match components {
            [r, g, b] => Ok(Self::rgb(channel(r)?, channel(g)?, channel(b)?)),
            [r, g, b, a] => Ok(Self::rgba(channel(r)?, channel(g)?, channel(b)?, channel(a)?)),
            _ => Err(invalid()),
        }
    }

    pub(crate) fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

/// Accepted color notations in configuration files
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ColorInput {
    Components(Vec<i64>),
    Hex(String),
}

impl TryFrom<ColorInput> for Color {
    type Error = SelectorError;

    fn try_from(input: ColorInput) -> Result<Self, Self::Error> {
        match input {
            ColorInput::Components(components) => Self::from_components(&components),
            ColorInput::Hex(hex) => Self::from_hex(&hex),
        }
    }
}

impl From<Color> for Vec<u8> {
    fn from(color: Color) -> Self {
        if color.a == 255 {
            vec![color.r, color.g, color.b]
        } else {
            vec![color.r, color.g, color.b, color.a]
        }
    }
}
