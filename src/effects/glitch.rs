use crate::animation::rng::RandomSource;
use crate::compositor::buffer::PixelBuffer;
use crate::compositor::mask::GlyphMask;
use crate::effects::{EffectFrame, EffectKind, FrameCtx, TextEffect, solid_glyphs};
use crate::foundation::core::{Color, Rect, Vec2};
use crate::foundation::error::GlyphFxResult;

const PAD: u32 = 5;

/// One frame's worth of glitch draws.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlitchDraw {
    /// Whole-text jitter.
    pub offset: Vec2,
    /// Horizontal split between the two colour copies.
    pub split_x: f64,
    /// Slice position in percent of the height; `None` when no slice this frame.
    pub slice_y: Option<f64>,
    /// Slice band height in pixels.
    pub slice_height: f64,
    /// Horizontal shift of the slice band.
    pub slice_offset: f64,
}

impl GlitchDraw {
    /// Draw a fresh set of values from `rng`.
    pub fn sample(rng: &mut dyn RandomSource, intensity: f32) -> Self {
        let mut maybe = |p: f32, lo: i32, hi: i32| -> Option<f64> {
            rng.chance(p * intensity)
                .then(|| f64::from(rng.range_i32(lo, hi)))
        };
        let dx = maybe(0.3, -5, 5).unwrap_or(0.0);
        let dy = maybe(0.3, -2, 2).unwrap_or(0.0);
        let split_x = maybe(0.4, -8, 8).unwrap_or(0.0);
        let slice_y = maybe(0.3, 0, 100).filter(|y| *y > 0.0);
        let slice_height = f64::from(rng.range_i32(2, 10));
        let slice_offset = f64::from(rng.range_i32(-10, 10));
        Self {
            offset: Vec2::new(dx, dy),
            split_x,
            slice_y,
            slice_height,
            slice_offset,
        }
    }
}

/// Digital glitch: jittered text with a colour split and an occasional displaced slice.
///
/// Every render draws new values; nothing is smoothed between frames.
#[derive(Clone, Debug)]
pub struct GlitchEffect {
    /// Main text colour.
    pub base: Color,
    /// Copy shifted by `+split_x`; also tints the slice.
    pub split_a: Color,
    /// Copy shifted by `-split_x`.
    pub split_b: Color,
    /// Probability multiplier.
    pub intensity: f32,
}

impl Default for GlitchEffect {
    fn default() -> Self {
        Self {
            base: Color::WHITE,
            split_a: Color::from_argb32(0xFF00FFFF),
            split_b: Color::from_argb32(0xFFFF0000),
            intensity: 1.0,
        }
    }
}

impl GlitchEffect {
    /// Render with explicit draws.
    pub fn render_with(&self, mask: &GlyphMask, draw: &GlitchDraw) -> EffectFrame {
        if mask.is_empty() {
            return EffectFrame::empty();
        }
        let origin = Vec2::new(f64::from(PAD), f64::from(PAD));
        let (w, h) = (mask.width() + 2 * PAD, mask.height() + 2 * PAD);
        let main = origin + draw.offset;
        let split = Vec2::new(draw.split_x, 0.0);

        let mut out = PixelBuffer::new(w, h);
        out.draw_over(&solid_glyphs(mask, self.split_b), main - split, 0.5);
        out.draw_over(&solid_glyphs(mask, self.split_a), main + split, 0.5);
        out.draw_over(&solid_glyphs(mask, self.base), main, 1.0);

        if let Some(slice_y) = draw.slice_y {
            let y0 = slice_y / 100.0 * f64::from(h);
            let mut band = PixelBuffer::new(w, h);
            band.draw_over(&solid_glyphs(mask, self.split_a), main, 1.0);
            band.clip_to_rect(Rect::new(0.0, y0, f64::from(w), y0 + draw.slice_height));
            out.draw_over(&band, Vec2::new(draw.slice_offset, 0.0), 0.8);
        }
        EffectFrame {
            pixels: out,
            origin,
        }
    }
}

impl TextEffect for GlitchEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Glitch
    }

    fn render(
        &self,
        mask: &GlyphMask,
        _frame: FrameCtx,
        rng: &mut dyn RandomSource,
    ) -> GlyphFxResult<EffectFrame> {
        let draw = GlitchDraw::sample(rng, self.intensity);
        Ok(self.render_with(mask, &draw))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/glitch.rs"]
mod tests;
