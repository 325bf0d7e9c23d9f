use rayon::prelude::*;

use crate::compositor::blur::blur_rgba8_premul;
use crate::foundation::core::Insets;
use crate::foundation::error::{GlyphFxError, GlyphFxResult};
use crate::foundation::math::blur_sigma;

/// Generic font family slot; the rasterizer maps each to concrete font data.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FontFamilyKind {
    /// Default UI face.
    #[default]
    SansSerif,
    /// Serif face (metallic words).
    Serif,
    /// Monospace face (glitch words).
    Monospace,
    /// Handwriting face (sketch words).
    Cursive,
}

/// Horizontal alignment of lines inside a multi-line mask.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Left edge.
    Start,
    /// Centred.
    #[default]
    Center,
    /// Right edge.
    End,
}

impl TextAlign {
    /// Fraction of the free space placed before a line.
    pub fn factor(self) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
        }
    }
}

/// Text styling that determines a glyph mask.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Family slot.
    pub family: FontFamilyKind,
    /// CSS-style weight, 100..=1000.
    pub weight: u16,
    /// Extra advance after every character, in pixels. May be negative.
    pub letter_spacing: f32,
    /// Line alignment.
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 75.0,
            family: FontFamilyKind::SansSerif,
            weight: 900,
            letter_spacing: 1.0,
            align: TextAlign::Center,
        }
    }
}

impl TextStyle {
    /// Reject sizes and weights no rasterizer can honour.
    pub fn validate(&self) -> GlyphFxResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(GlyphFxError::validation(format!(
                "font size must be finite and > 0, got {}",
                self.font_size
            )));
        }
        if !self.letter_spacing.is_finite() {
            return Err(GlyphFxError::validation("letter spacing must be finite"));
        }
        if !(1..=1000).contains(&self.weight) {
            return Err(GlyphFxError::validation(format!(
                "font weight must be in 1..=1000, got {}",
                self.weight
            )));
        }
        Ok(())
    }
}

/// Cache key for one `(text, style)` pair. Float fields are compared bitwise.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaskKey {
    text: String,
    font_size_bits: u32,
    family: FontFamilyKind,
    weight: u16,
    letter_spacing_bits: u32,
    align: TextAlign,
}

impl MaskKey {
    /// Key for `text` rendered with `style`.
    pub fn new(text: &str, style: &TextStyle) -> Self {
        Self {
            text: text.to_owned(),
            font_size_bits: style.font_size.to_bits(),
            family: style.family,
            weight: style.weight,
            letter_spacing_bits: style.letter_spacing.to_bits(),
            align: style.align,
        }
    }

    /// Text part of the key.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// 8-bit coverage raster of shaped text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphMask {
    width: u32,
    height: u32,
    baseline: f32,
    alpha: Vec<u8>,
}

impl GlyphMask {
    /// Zero-sized mask for empty text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw coverage bytes.
    pub fn new(width: u32, height: u32, baseline: f32, alpha: Vec<u8>) -> GlyphFxResult<Self> {
        if alpha.len() != (width as usize) * (height as usize) {
            return Err(GlyphFxError::render(format!(
                "mask {width}x{height} expects {} coverage bytes, got {}",
                (width as usize) * (height as usize),
                alpha.len()
            )));
        }
        Ok(Self::from_parts(width, height, baseline, alpha))
    }

    pub(crate) fn from_parts(width: u32, height: u32, baseline: f32, alpha: Vec<u8>) -> Self {
        debug_assert_eq!(alpha.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            baseline,
            alpha,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance from the top edge to the first baseline.
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// `true` for zero-sized masks.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw coverage bytes.
    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    /// Coverage at `(x, y)`, 0 outside.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(y as usize) * (self.width as usize) + x as usize]
    }

    pub(crate) fn alpha_at_signed(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 {
            return 0;
        }
        self.alpha_at(x as u32, y as u32)
    }

    /// Copy with transparent margins; the baseline moves down by `insets.top`.
    pub fn padded(&self, insets: Insets) -> GlyphMask {
        if self.is_empty() {
            return Self::empty();
        }
        let w = self.width + insets.left + insets.right;
        let h = self.height + insets.top + insets.bottom;
        let mut alpha = vec![0u8; (w as usize) * (h as usize)];
        let src_w = self.width as usize;
        for (y, row) in self.alpha.chunks_exact(src_w).enumerate() {
            let start = (y + insets.top as usize) * (w as usize) + insets.left as usize;
            alpha[start..start + src_w].copy_from_slice(row);
        }
        Self::from_parts(w, h, self.baseline + insets.top as f32, alpha)
    }

    /// Coverage of a stroke of `stroke_width` centred on the glyph outline.
    ///
    /// Computed morphologically: grayscale dilation minus erosion by a disk of half the width.
    pub fn outline(&self, stroke_width: f32) -> GlyphMask {
        if self.is_empty() || !stroke_width.is_finite() || stroke_width <= 0.0 {
            return Self::from_parts(
                self.width,
                self.height,
                self.baseline,
                vec![0; self.alpha.len()],
            );
        }
        let r = (stroke_width / 2.0).max(0.5);
        let dilated = self.morph(r, u8::max, 0);
        let eroded = self.morph(r, u8::min, 0);
        let alpha = dilated
            .iter()
            .zip(&eroded)
            .map(|(&d, &e)| d.saturating_sub(e))
            .collect();
        Self::from_parts(self.width, self.height, self.baseline, alpha)
    }

    /// Softened copy of the coverage.
    pub fn blurred(&self, radius: f32) -> GlyphMask {
        if self.is_empty() || radius <= 0.0 {
            return self.clone();
        }
        let sigma = blur_sigma(radius);
        let alpha = blur_rgba8_premul::<1>(
            &self.alpha,
            self.width,
            self.height,
            (sigma * 3.0).ceil() as u32,
            sigma,
        );
        Self::from_parts(self.width, self.height, self.baseline, alpha)
    }

    fn morph(&self, radius: f32, pick: fn(u8, u8) -> u8, outside: u8) -> Vec<u8> {
        let ri = radius.ceil() as i64;
        let r2 = f64::from(radius) * f64::from(radius);
        let offsets: Vec<(i64, i64)> = (-ri..=ri)
            .flat_map(|dy| (-ri..=ri).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| ((dx * dx + dy * dy) as f64) <= r2 + 0.25)
            .collect();
        let w = self.width as usize;
        let h = self.height as i64;
        let mut out = vec![0u8; self.alpha.len()];
        out.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
            for (x, o) in row.iter_mut().enumerate() {
                let mut acc = self.alpha[y * w + x];
                for &(dx, dy) in &offsets {
                    let sx = x as i64 + dx;
                    let sy = y as i64 + dy;
                    let v = if sx < 0 || sy < 0 || sx >= w as i64 || sy >= h {
                        outside
                    } else {
                        self.alpha[sy as usize * w + sx as usize]
                    };
                    acc = pick(acc, v);
                }
                *o = acc;
            }
        });
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/mask.rs"]
mod tests;
