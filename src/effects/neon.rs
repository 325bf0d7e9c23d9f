use crate::animation::rng::RandomSource;
use crate::compositor::composite::{Layer, compose_layers};
use crate::compositor::fill::FillSource;
use crate::compositor::mask::GlyphMask;
use crate::effects::{EffectFrame, EffectKind, FrameCtx, TextEffect};
use crate::foundation::core::{Color, Insets, Vec2};
use crate::foundation::error::GlyphFxResult;

const PAD: u32 = 20;

/// Glowing tube: wide soft halo, two blurred outline strokes and a white core.
#[derive(Clone, Debug)]
pub struct NeonEffect {
    /// Tube colour.
    pub color: Color,
    /// Flicker coefficient; `0` disables flicker.
    pub flicker_speed: f32,
}

impl NeonEffect {
    /// Tube of `color` flickering with `flicker_speed`.
    pub fn new(color: Color, flicker_speed: f32) -> Self {
        Self {
            color,
            flicker_speed,
        }
    }

    /// Brightness for one frame. Resampled on every call.
    pub fn flicker_alpha(&self, rng: &mut dyn RandomSource) -> f32 {
        if self.flicker_speed > 0.0 && rng.chance(self.flicker_speed * 0.1) {
            0.3 + rng.next_f32() * 0.3
        } else {
            0.95 + rng.next_f32() * 0.05
        }
    }

    /// Layer stack at brightness `alpha`.
    pub fn layers(&self, alpha: f32) -> [Layer; 4] {
        let tube = |a: f32| FillSource::Solid(self.color.scale_alpha(a * alpha));
        [
            Layer::fill(tube(0.4)).blurred(40.0),
            Layer::outline(tube(0.8), 12.0).blurred(15.0),
            Layer::outline(tube(1.0), 6.0).blurred(4.0),
            Layer::outline(FillSource::Solid(Color::WHITE.scale_alpha(0.95 * alpha)), 3.0),
        ]
    }
}

impl TextEffect for NeonEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Neon
    }

    fn render(
        &self,
        mask: &GlyphMask,
        _frame: FrameCtx,
        rng: &mut dyn RandomSource,
    ) -> GlyphFxResult<EffectFrame> {
        if mask.is_empty() {
            return Ok(EffectFrame::empty());
        }
        let alpha = self.flicker_alpha(rng);
        let padded = mask.padded(Insets::uniform(PAD));
        Ok(EffectFrame {
            pixels: compose_layers(&padded, &self.layers(alpha)),
            origin: Vec2::new(f64::from(PAD), f64::from(PAD)),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/neon.rs"]
mod tests;
