use crate::animation::rng::RandomSource;
use crate::compositor::composite::composite_with_fill;
use crate::compositor::fill::{ColorStop, FillSource, GradientStops, LinearGradient, TileMode};
use crate::compositor::mask::GlyphMask;
use crate::effects::{EffectFrame, EffectKind, FrameCtx, TextEffect};
use crate::foundation::core::{Color, Point};
use crate::foundation::error::GlyphFxResult;

/// Static specular metal: shadow, base, highlight, base, shadow across a tilted axis.
#[derive(Clone, Debug)]
pub struct MetallicEffect {
    /// Metal colour.
    pub base: Color,
    /// Tilt of the gradient axis from vertical, in degrees.
    pub angle_deg: f32,
}

impl MetallicEffect {
    /// Metal of `base` tilted by `angle_deg`.
    pub fn new(base: Color, angle_deg: f32) -> Self {
        Self { base, angle_deg }
    }

    /// Gradient for glyphs `height` pixels tall.
    pub fn gradient(&self, height: f64) -> GlyphFxResult<LinearGradient> {
        let b = self.base;
        let shadow = Color::new(b.r * 0.4, b.g * 0.35, b.b * 0.3, 1.0);
        let highlight = Color::new(1.0, 1.0, 0.98, 1.0);
        let stops = GradientStops::new(
            [
                (0.0, shadow),
                (0.45, b),
                (0.5, highlight),
                (0.55, b),
                (1.0, shadow),
            ]
            .into_iter()
            .map(|(offset, color)| ColorStop { offset, color })
            .collect(),
        )?;
        let lean = height * f64::from(self.angle_deg).to_radians().sin();
        Ok(LinearGradient {
            start: Point::new(lean, 0.0),
            end: Point::new(-lean, height),
            stops,
            tile: TileMode::Clamp,
        })
    }
}

impl TextEffect for MetallicEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Metallic
    }

    fn render(
        &self,
        mask: &GlyphMask,
        _frame: FrameCtx,
        _rng: &mut dyn RandomSource,
    ) -> GlyphFxResult<EffectFrame> {
        if mask.is_empty() {
            return Ok(EffectFrame::empty());
        }
        let fill = FillSource::Linear(self.gradient(f64::from(mask.height()))?);
        Ok(EffectFrame::unpadded(composite_with_fill(mask, &fill)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/metallic.rs"]
mod tests;
