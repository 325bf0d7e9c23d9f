use crate::animation::clock::{LoopMode, PhaseClock};
use crate::animation::rng::RandomSource;
use crate::compositor::buffer::PixelBuffer;
use crate::compositor::mask::GlyphMask;
use crate::effects::{EffectFrame, EffectKind, FrameCtx, TextEffect, solid_glyphs};
use crate::foundation::core::{Color, Vec2};
use crate::foundation::error::GlyphFxResult;

const PAD_X: u32 = 5;
const PAD_TOP: u32 = 2;
const PAD_BOTTOM: u32 = 3;
const SPLIT: f64 = 6.0;
const JITTER: f64 = 2.0;

/// Red and blue fringes either side of near-black text, breathing by a couple of pixels.
#[derive(Clone, Debug)]
pub struct ChromaticEffect {
    clock: PhaseClock,
}

impl ChromaticEffect {
    /// Jitter swinging across its range every `jitter_ms`.
    pub fn new(jitter_ms: f64) -> GlyphFxResult<Self> {
        Ok(Self {
            clock: PhaseClock::new(jitter_ms, LoopMode::Reverse)?,
        })
    }

    /// Fringe offset in pixels at `elapsed_ms`.
    pub fn split_at(&self, elapsed_ms: f64) -> f64 {
        let jitter = f64::from(self.clock.tick(elapsed_ms).value) * 2.0 - 1.0;
        SPLIT + jitter * JITTER
    }
}

impl TextEffect for ChromaticEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Chromatic
    }

    fn render(
        &self,
        mask: &GlyphMask,
        frame: FrameCtx,
        _rng: &mut dyn RandomSource,
    ) -> GlyphFxResult<EffectFrame> {
        if mask.is_empty() {
            return Ok(EffectFrame::empty());
        }
        let origin = Vec2::new(f64::from(PAD_X), f64::from(PAD_TOP));
        let split = Vec2::new(self.split_at(frame.elapsed_ms), 0.0);
        let mut out = PixelBuffer::new(
            mask.width() + 2 * PAD_X,
            mask.height() + PAD_TOP + PAD_BOTTOM,
        );
        out.draw_over(
            &solid_glyphs(mask, Color::from_argb32(0xFFFF0000)),
            origin - split,
            0.7,
        );
        out.draw_over(
            &solid_glyphs(mask, Color::from_argb32(0xFF0000FF)),
            origin + split,
            0.7,
        );
        out.draw_over(&solid_glyphs(mask, Color::from_argb32(0xFF212121)), origin, 1.0);
        Ok(EffectFrame {
            pixels: out,
            origin,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/chromatic.rs"]
mod tests;
