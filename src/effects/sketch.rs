use crate::animation::clock::{LoopMode, PhaseClock};
use crate::animation::rng::{RandomSource, Rng64};
use crate::compositor::buffer::PixelBuffer;
use crate::compositor::mask::GlyphMask;
use crate::effects::{EffectFrame, EffectKind, FrameCtx, TextEffect, solid_glyphs};
use crate::foundation::core::{Color, Insets, Rect, Vec2};
use crate::foundation::error::GlyphFxResult;
use crate::foundation::math::hash_str;

const PAD: u32 = 5;
const STROKE_WIDTH: f32 = 3.0;
const PASSES: usize = 3;

/// Three slightly offset pencil outlines revealed left to right, once.
#[derive(Clone, Debug)]
pub struct SketchEffect {
    /// Pencil colour.
    pub color: Color,
    clock: PhaseClock,
    jitter: [Vec2; PASSES],
}

impl SketchEffect {
    /// Reveal over `reveal_ms`; the pass offsets depend only on `text`.
    pub fn new(text: &str, reveal_ms: f64) -> GlyphFxResult<Self> {
        let mut rng = Rng64::new(hash_str(text));
        let jitter = std::array::from_fn(|_| {
            let dx = f64::from(rng.next_f32()) * 3.0 - 1.5;
            let dy = f64::from(rng.next_f32()) * 3.0 - 1.5;
            Vec2::new(dx, dy)
        });
        Ok(Self {
            color: Color::from_argb32(0xFF263238),
            clock: PhaseClock::new(reveal_ms, LoopMode::Once)?,
            jitter,
        })
    }

    /// Per-pass offsets.
    pub fn jitter(&self) -> &[Vec2; PASSES] {
        &self.jitter
    }

    /// Revealed fraction at `elapsed_ms`, and whether the reveal has finished.
    pub fn revealed(&self, elapsed_ms: f64) -> (f32, bool) {
        let phase = self.clock.tick(elapsed_ms);
        (phase.value, phase.completed)
    }
}

impl TextEffect for SketchEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Sketch
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
        let origin = Vec2::new(f64::from(PAD), f64::from(PAD));
        // The stroke straddles the glyph edge, so trace it with room on every side.
        let padded = mask.padded(Insets::uniform(PAD));
        let (w, h) = (padded.width(), padded.height());
        let stroke = solid_glyphs(&padded.outline(STROKE_WIDTH), self.color);

        let mut out = PixelBuffer::new(w, h);
        for offset in &self.jitter {
            out.draw_over(&stroke, *offset, 1.0);
        }
        let (revealed, _) = self.revealed(frame.elapsed_ms);
        out.clip_to_rect(Rect::new(
            0.0,
            0.0,
            f64::from(w) * f64::from(revealed),
            f64::from(h),
        ));
        Ok(EffectFrame {
            pixels: out,
            origin,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sketch.rs"]
mod tests;
