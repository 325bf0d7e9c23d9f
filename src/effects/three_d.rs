use crate::animation::rng::RandomSource;
use crate::compositor::buffer::PixelBuffer;
use crate::compositor::mask::GlyphMask;
use crate::effects::{EffectFrame, EffectKind, FrameCtx, TextEffect, solid_glyphs};
use crate::foundation::core::{Color, Insets, Vec2};
use crate::foundation::error::GlyphFxResult;

/// Face colour over `depth` black side copies stepped along a fixed direction.
#[derive(Clone, Debug)]
pub struct ThreeDEffect {
    /// Front face colour.
    pub face: Color,
    /// Extrusion colour.
    pub side: Color,
    /// Number of side copies, one pixel apart.
    pub depth: u32,
    /// Extrusion direction in degrees, clockwise from +x.
    pub angle_deg: f32,
}

impl ThreeDEffect {
    /// Extrusion with black sides.
    pub fn new(face: Color, depth: u32, angle_deg: f32) -> Self {
        Self {
            face,
            side: Color::BLACK,
            depth,
            angle_deg,
        }
    }

    fn step(&self) -> Vec2 {
        let (s, c) = f64::from(self.angle_deg).to_radians().sin_cos();
        let snap = |v: f64| if v.abs() < 1e-9 { 0.0 } else { v };
        Vec2::new(snap(c), snap(s))
    }
}

impl TextEffect for ThreeDEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::ThreeD
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
        let step = self.step();
        let reach = step * f64::from(self.depth);
        let pad = |v: f64| v.abs().ceil() as u32;
        let insets = Insets {
            left: if reach.x < 0.0 { pad(reach.x) } else { 0 },
            top: if reach.y < 0.0 { pad(reach.y) } else { 0 },
            right: if reach.x > 0.0 { pad(reach.x) } else { 0 },
            bottom: if reach.y > 0.0 { pad(reach.y) } else { 0 },
        };
        let origin = Vec2::new(f64::from(insets.left), f64::from(insets.top));
        let w = mask.width() + insets.left + insets.right;
        let h = mask.height() + insets.top + insets.bottom;

        let side = solid_glyphs(mask, self.side);
        let mut out = PixelBuffer::new(w, h);
        for i in (1..=self.depth).rev() {
            out.draw_over(&side, origin + step * f64::from(i), 1.0);
        }
        out.draw_over(&solid_glyphs(mask, self.face), origin, 1.0);
        Ok(EffectFrame {
            pixels: out,
            origin,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/three_d.rs"]
mod tests;
