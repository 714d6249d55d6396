use thiserror::Error;

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

/// Errors from parsing `#rrggbb` / `#rrggbbaa` strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    /// The string has neither 6 nor 8 hex digits.
    #[error("color `{0}` must have 6 or 8 hex digits")]
    BadLength(String),
    /// A non-hex character was found.
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(text: &str) -> Result<Self, ColorParseError> {
        let digits = text
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(text.to_string()))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::BadLength(text.to_string()));
        }
        if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(text.to_string()));
        }
        let channel = |index: usize| {
            digits
                .get(index..index + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ColorParseError::BadDigit(text.to_string()))
        };
        let r = channel(0)?;
        let g = channel(2)?;
        let b = channel(4)?;
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ))
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let to_u8 = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a));
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}
