use crate::animation::clock::{LoopMode, PhaseClock};
use crate::animation::rng::{RandomSource, Rng64};
use crate::compositor::mask::GlyphMask;
use crate::compositor::shape::Painter;
use crate::effects::{EffectFrame, EffectKind, FrameCtx, TextEffect, solid_glyphs};
use crate::foundation::core::{Color, Point, Vec2};
use crate::foundation::error::GlyphFxResult;

const TRACE_COUNT: usize = 15;
const PANEL: Color = Color::from_argb32(0xFF263238);

/// One straight trace with a packet travelling along it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trace {
    /// Horizontal or vertical.
    pub horizontal: bool,
    /// Cross-axis position as a fraction of the extent.
    pub pos: f32,
    /// Length as a fraction of the extent.
    pub length: f32,
    /// Start along the main axis as a fraction of the extent.
    pub offset: f32,
    /// `1` or `-1`.
    pub direction: f32,
}

impl Trace {
    fn endpoints(&self, width: f64, height: f64) -> (Point, Point) {
        let (pos, len, off) = (f64::from(self.pos), f64::from(self.length), f64::from(self.offset));
        if self.horizontal {
            let start = Point::new(off * width, pos * height);
            (start, start + Vec2::new(len * width, 0.0))
        } else {
            let start = Point::new(pos * width, off * height);
            (start, start + Vec2::new(0.0, len * height))
        }
    }

    /// Packet position along the trace, in `[0, 1)`.
    pub fn travel(&self, phase: f32) -> f32 {
        (phase * self.direction).rem_euclid(1.0)
    }
}

/// Glyph-shaped dark panel with glowing traces and travelling data packets.
#[derive(Clone, Debug)]
pub struct CircuitEffect {
    /// Trace colour.
    pub color: Color,
    clock: PhaseClock,
    traces: Vec<Trace>,
}

impl CircuitEffect {
    /// Packets crossing a trace every `packet_ms`; layout seeded with `seed`.
    pub fn new(packet_ms: f64, seed: u64) -> GlyphFxResult<Self> {
        let mut rng = Rng64::new(seed);
        let traces = (0..TRACE_COUNT)
            .map(|_| Trace {
                horizontal: rng.chance(0.5),
                pos: rng.next_f32(),
                length: rng.next_f32() * 0.5 + 0.2,
                offset: rng.next_f32(),
                direction: if rng.chance(0.5) { 1.0 } else { -1.0 },
            })
            .collect();
        Ok(Self {
            color: Color::from_argb32(0xFF00E5FF),
            clock: PhaseClock::new(packet_ms, LoopMode::Restart)?,
            traces,
        })
    }

    /// Trace layout.
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }
}

impl TextEffect for CircuitEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Circuit
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
        let phase = self.clock.tick(frame.elapsed_ms).value;
        let trace_color = self.color.scale_alpha(0.3);

        let mut lines = Painter::new(w, h)?;
        let mut packets = Painter::new(w, h)?;
        for trace in &self.traces {
            let (a, b) = trace.endpoints(f64::from(w), f64::from(h));
            lines.stroke_line(a, b, 3.0, trace_color);
            let t = f64::from(trace.travel(phase));
            packets.fill_circle(a.lerp(b, t), 3.0, Color::WHITE);
            lines.fill_circle(a, 2.0, trace_color);
            lines.fill_circle(b, 2.0, trace_color);
        }

        // Traces run across the whole panel; only the panel itself is glyph-shaped.
        let mut out = solid_glyphs(mask, PANEL);
        out.draw_over(&lines.finish(), Vec2::ZERO, 1.0);
        out.draw_over(&packets.finish().blurred(3.0), Vec2::ZERO, 1.0);
        Ok(EffectFrame::unpadded(out))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/circuit.rs"]
mod tests;
