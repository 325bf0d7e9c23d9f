use crate::animation::clock::{LoopMode, PhaseClock};
use crate::animation::rng::RandomSource;
use crate::compositor::composite::composite_with_fill;
use crate::compositor::fill::{FillSource, GradientStops, LinearGradient, TileMode};
use crate::compositor::mask::GlyphMask;
use crate::effects::{EffectFrame, EffectKind, FrameCtx, TextEffect, solid_glyphs};
use crate::foundation::core::{Color, Point, Vec2};
use crate::foundation::error::GlyphFxResult;

const DIM: Color = Color::from_argb32(0xFF444444);
const BAND_FRACTION: f64 = 0.5;

/// Dim glyphs lit by a soft white band sweeping left to right and back.
#[derive(Clone, Debug)]
pub struct SpotlightEffect {
    clock: PhaseClock,
}

impl SpotlightEffect {
    /// One-way sweep lasting `sweep_ms`.
    pub fn new(sweep_ms: f64) -> GlyphFxResult<Self> {
        Ok(Self {
            clock: PhaseClock::new(sweep_ms, LoopMode::Reverse)?,
        })
    }

    /// Left edge of the band for glyphs `width` pixels wide.
    pub fn band_start(&self, width: f64, elapsed_ms: f64) -> f64 {
        let band = width * BAND_FRACTION;
        let progress = f64::from(self.clock.tick(elapsed_ms).value);
        (width + band) * progress - band
    }
}

impl TextEffect for SpotlightEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Spotlight
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
        let width = f64::from(mask.width());
        let start = self.band_start(width, frame.elapsed_ms);
        let beam = FillSource::Linear(LinearGradient {
            start: Point::new(start, 0.0),
            end: Point::new(start + width * BAND_FRACTION, 0.0),
            stops: GradientStops::even(&[Color::TRANSPARENT, Color::WHITE, Color::TRANSPARENT]),
            tile: TileMode::Clamp,
        });

        let mut out = solid_glyphs(mask, DIM);
        out.draw_over(&composite_with_fill(mask, &beam), Vec2::ZERO, 1.0);
        Ok(EffectFrame::unpadded(out))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/spotlight.rs"]
mod tests;
