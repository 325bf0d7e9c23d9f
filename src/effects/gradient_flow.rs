use crate::animation::clock::{LoopMode, PhaseClock};
use crate::animation::rng::RandomSource;
use crate::compositor::composite::composite_with_fill;
use crate::compositor::fill::{ColorStop, FillSource, GradientStops, LinearGradient, TileMode};
use crate::compositor::mask::GlyphMask;
use crate::effects::{EffectFrame, EffectKind, FrameCtx, TextEffect};
use crate::foundation::core::{Color, Point};
use crate::foundation::error::GlyphFxResult;

/// Pixels scrolled per loop before wrapping.
const SCROLL_PX: f64 = 4000.0;

const FLOW: [(f32, u32); 6] = [
    (0.0, 0xFF8E24AA),
    (0.2, 0xFFBA68C8),
    (0.4, 0xFFFF4081),
    (0.6, 0xFFFF80AB),
    (0.8, 0xFFFFD740),
    (1.0, 0xFF8E24AA),
];

/// Purple, pink and gold gradient drifting sideways with mirrored tiling.
#[derive(Clone, Debug)]
pub struct GradientFlowEffect {
    clock: PhaseClock,
}

impl GradientFlowEffect {
    /// Scroll loop lasting `period_ms`.
    pub fn new(period_ms: f64) -> GlyphFxResult<Self> {
        Ok(Self {
            clock: PhaseClock::new(period_ms, LoopMode::Restart)?,
        })
    }

    /// Horizontal shift for glyphs `width` pixels wide, in `[0, 2 * width)`.
    pub fn shift(&self, width: f64, elapsed_ms: f64) -> f64 {
        let offset = f64::from(self.clock.tick(elapsed_ms).value) * SCROLL_PX;
        if width <= 0.0 {
            return 0.0;
        }
        offset.rem_euclid(width * 2.0)
    }

    /// Gradient for a `width x height` box at `elapsed_ms`.
    pub fn gradient(
        &self,
        width: f64,
        height: f64,
        elapsed_ms: f64,
    ) -> GlyphFxResult<LinearGradient> {
        let shift = self.shift(width, elapsed_ms);
        let stops = GradientStops::new(
            FLOW.iter()
                .map(|&(offset, argb)| ColorStop {
                    offset,
                    color: Color::from_argb32(argb),
                })
                .collect(),
        )?;
        Ok(LinearGradient {
            start: Point::new(-width + shift, 0.0),
            end: Point::new(width + shift, height),
            stops,
            tile: TileMode::Mirror,
        })
    }
}

impl TextEffect for GradientFlowEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::GradientFlow
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
        let gradient = self.gradient(
            f64::from(mask.width()),
            f64::from(mask.height()),
            frame.elapsed_ms,
        )?;
        Ok(EffectFrame::unpadded(composite_with_fill(
            mask,
            &FillSource::Linear(gradient),
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/gradient_flow.rs"]
mod tests;
