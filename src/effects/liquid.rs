use crate::animation::clock::{LoopMode, PhaseClock, PhaseDomain};
use crate::animation::rng::{RandomSource, Rng64};
use crate::compositor::fill::FillSource;
use crate::compositor::mask::GlyphMask;
use crate::compositor::shape::Painter;
use crate::effects::{EffectFrame, EffectKind, FrameCtx, TextEffect, solid_glyphs};
use crate::foundation::core::{BezPath, Color, Point, Vec2};
use crate::foundation::error::GlyphFxResult;

const AMPLITUDE: f64 = 15.0;
const FREQUENCY: f64 = 0.02;
const LEVEL: f64 = 0.45;
const WAVE_STEP: usize = 5;
const BUBBLE_COUNT: usize = 15;
const BUBBLE_COLOR: Color = Color::from_argb32(0x88FFFFFF);

#[derive(Clone, Copy, Debug, PartialEq)]
struct Bubble {
    x: f32,
    y: f32,
    size: f32,
    speed: f32,
}

/// Glyphs filled by an undulating water body with bubbles rising inside it.
///
/// Glyph parts above the water stay black.
#[derive(Clone, Debug)]
pub struct LiquidEffect {
    clock: PhaseClock,
    bubbles: Vec<Bubble>,
}

impl LiquidEffect {
    /// Wave looping every `wave_ms`, bubble layout seeded with `seed`.
    pub fn new(wave_ms: f64, seed: u64) -> GlyphFxResult<Self> {
        let mut rng = Rng64::new(seed);
        let bubbles = (0..BUBBLE_COUNT)
            .map(|_| Bubble {
                x: rng.next_f32(),
                y: rng.next_f32(),
                size: rng.next_f32() * 6.0 + 2.0,
                speed: rng.next_f32() * 0.5 + 0.2,
            })
            .collect();
        Ok(Self {
            clock: PhaseClock::new(wave_ms, LoopMode::Restart)?.with_domain(PhaseDomain::Radians),
            bubbles,
        })
    }

    fn wave_path(width: f64, height: f64, phase: f64) -> BezPath {
        let level = height * LEVEL;
        let mut path = BezPath::new();
        path.move_to((0.0, height));
        path.line_to((0.0, level));
        for x in (0..=width as usize).step_by(WAVE_STEP) {
            let x = x as f64;
            path.line_to((x, level + (x * FREQUENCY + phase).sin() * AMPLITUDE));
        }
        path.line_to((width, height));
        path.close_path();
        path
    }
}

impl TextEffect for LiquidEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Liquid
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
        let (w, h) = (mask.width(), mask.height());
        let (wf, hf) = (f64::from(w), f64::from(h));
        let phase = f64::from(self.clock.tick(frame.elapsed_ms).value);
        let level = hf * LEVEL;

        let mut region = Painter::new(w, h)?;
        region.fill_path(&Self::wave_path(wf, hf, phase), Color::WHITE);
        let region = region.finish().to_mask(0.0);

        let mut water = FillSource::vertical(
            Color::from_argb32(0xFF00FFFF),
            Color::from_argb32(0xFF0000FF),
            level - AMPLITUDE,
            hf,
        )
        .render(w, h);
        water.clip_to_mask(&region, Vec2::ZERO);

        let mut bubbles = Painter::new(w, h)?;
        for b in &self.bubbles {
            let y = (f64::from(b.y) * hf - phase * 30.0 * f64::from(b.speed)).rem_euclid(hf);
            let x = f64::from(b.x) * wf + (y * 0.05).sin() * 5.0;
            if y > level {
                bubbles.fill_circle(Point::new(x, y), f64::from(b.size), BUBBLE_COLOR);
            }
        }
        water.draw_over(&bubbles.finish(), Vec2::ZERO, 1.0);
        water.clip_to_mask(mask, Vec2::ZERO);

        let mut out = solid_glyphs(mask, Color::BLACK);
        out.draw_over(&water, Vec2::ZERO, 1.0);
        Ok(EffectFrame::unpadded(out))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/liquid.rs"]
mod tests;
