use crate::foundation::error::{GlyphFxError, GlyphFxResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Pixel dimensions of a render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero-sized or oversized targets.
    pub fn new(width: u32, height: u32) -> GlyphFxResult<Self> {
        if width == 0 || height == 0 {
            return Err(GlyphFxError::validation("canvas must be at least 1x1"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(GlyphFxError::validation("canvas dimensions must fit in u16"));
        }
        Ok(Self { width, height })
    }

    /// Centre point in pixel coordinates.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Transparent margins added around a glyph mask so halos and offsets have room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Insets {
    /// Left margin in pixels.
    pub left: u32,
    /// Top margin in pixels.
    pub top: u32,
    /// Right margin in pixels.
    pub right: u32,
    /// Bottom margin in pixels.
    pub bottom: u32,
}

impl Insets {
    /// Same margin on every side.
    pub const fn uniform(px: u32) -> Self {
        Self {
            left: px,
            top: px,
            right: px,
            bottom: px,
        }
    }

    /// Horizontal and vertical margins.
    pub const fn symmetric(horizontal: u32, vertical: u32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }
}

/// Straight-alpha colour with `f32` channels in `[0, 1]`.
///
/// Serialized as a `#RRGGBB` / `#RRGGBBAA` hex string.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
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

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgba8(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgba8(255, 255, 255, 255);

    /// Build from float channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit straight channels.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Build from a packed `0xAARRGGBB` value.
    pub const fn from_argb32(argb: u32) -> Self {
        Self::from_rgba8(
            ((argb >> 16) & 0xFF) as u8,
            ((argb >> 8) & 0xFF) as u8,
            (argb & 0xFF) as u8,
            ((argb >> 24) & 0xFF) as u8,
        )
    }

    /// Same colour with alpha replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Same colour with alpha multiplied by `factor`.
    pub fn scale_alpha(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// Channel-wise linear interpolation in straight space.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Convert to premultiplied 8-bit storage.
    pub fn to_premul(self) -> Rgba8Premul {
        fn q(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Rgba8Premul::from_straight_rgba(q(self.r), q(self.g), q(self.b), q(self.a))
    }

    /// Straight channels as an array, used for shader uniforms.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn parse_hex(s: &str) -> GlyphFxResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(GlyphFxError::validation(format!("invalid colour '{s}'")));
        }
        let byte = |i: usize| -> GlyphFxResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| GlyphFxError::validation(format!("invalid colour '{s}': {e}")))
        };
        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16).ok_or_else(|| {
                        GlyphFxError::validation(format!("invalid colour '{s}'"))
                    })? as u8;
                    out[i] = v * 17;
                }
                Ok(Self::from_rgba8(out[0], out[1], out[2], 255))
            }
            6 => Ok(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(GlyphFxError::validation(format!(
                "colour '{s}' must be #RGB, #RRGGBB or #RRGGBBAA"
            ))),
        }
    }

    /// Format as `#RRGGBBAA`.
    pub fn to_hex(self) -> String {
        fn q(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            q(self.r),
            q(self.g),
            q(self.b),
            q(self.a)
        )
    }
}

impl TryFrom<String> for Color {
    type Error = GlyphFxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8Premul {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent pixel.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply straight 8-bit channels.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Pixel as a byte quad.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Pixel from a byte quad.
    pub const fn from_array(px: [u8; 4]) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }
}
