use crate::animation::clock::{LoopMode, PhaseClock};
use crate::animation::rng::RandomSource;
use crate::compositor::composite::{Layer, compose_layers};
use crate::compositor::fill::{ColorStop, FillSource, GradientStops, LinearGradient, TileMode};
use crate::compositor::mask::GlyphMask;
use crate::effects::{EffectFrame, EffectKind, FrameCtx, TextEffect};
use crate::foundation::core::{Color, Insets, Point, Vec2};
use crate::foundation::error::GlyphFxResult;

const PAD_X: u32 = 10;
const PAD_TOP: u32 = 40;
const PAD_BOTTOM: u32 = 20;

const EMBER: Color = Color::from_argb32(0xFF660000);
const FLAME: Color = Color::from_argb32(0xFFFF4500);
const GOLD: Color = Color::from_argb32(0xFFFFD700);

/// Two blurred flame layers rising at different rates under a hot gradient core.
#[derive(Clone, Debug)]
pub struct FireEffect {
    slow: PhaseClock,
    fast: PhaseClock,
}

impl FireEffect {
    /// Slow layer oscillating every `rise_ms`; the fast one four times quicker.
    pub fn new(rise_ms: f64) -> GlyphFxResult<Self> {
        Ok(Self {
            slow: PhaseClock::new(rise_ms, LoopMode::Reverse)?,
            fast: PhaseClock::new(rise_ms / 4.0, LoopMode::Reverse)?,
        })
    }

    fn core(top: f64, baseline: f64) -> GlyphFxResult<FillSource> {
        let stops = GradientStops::new(vec![
            ColorStop {
                offset: 0.0,
                color: FLAME,
            },
            ColorStop {
                offset: 0.6,
                color: GOLD,
            },
            ColorStop {
                offset: 1.0,
                color: Color::WHITE,
            },
        ])?;
        Ok(FillSource::Linear(LinearGradient {
            start: Point::new(0.0, top),
            end: Point::new(0.0, baseline),
            stops,
            tile: TileMode::Clamp,
        }))
    }
}

impl TextEffect for FireEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Fire
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
        let slow = f64::from(self.slow.tick(frame.elapsed_ms).value);
        let fast = f64::from(self.fast.tick(frame.elapsed_ms).value);
        let rise_slow = slow * 25.0;
        let rise_fast = fast * 10.0;
        let jitter = (fast - 0.5) * 6.0;

        let padded = mask.padded(Insets {
            left: PAD_X,
            top: PAD_TOP,
            right: PAD_X,
            bottom: PAD_BOTTOM,
        });
        let baseline = f64::from(padded.baseline());
        let top = baseline - f64::from(mask.height());

        let layers = [
            Layer::fill(FillSource::Solid(EMBER))
                .blurred(20.0)
                .shifted(Vec2::new(0.0, -rise_slow - 10.0)),
            Layer::fill(FillSource::Solid(FLAME))
                .blurred(10.0)
                .shifted(Vec2::new(jitter, -rise_fast)),
            Layer::fill(Self::core(top, baseline)?),
        ];
        Ok(EffectFrame {
            pixels: compose_layers(&padded, &layers),
            origin: Vec2::new(f64::from(PAD_X), f64::from(PAD_TOP)),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fire.rs"]
mod tests;
