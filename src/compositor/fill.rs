use std::sync::Arc;

use rayon::prelude::*;

use crate::compositor::buffer::PixelBuffer;
use crate::foundation::core::{Color, Point};
use crate::foundation::error::{GlyphFxError, GlyphFxResult};

/// How a gradient parameter outside `[0, 1]` is folded back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileMode {
    /// Hold the end colours.
    #[default]
    Clamp,
    /// Wrap around.
    Repeat,
    /// Ping-pong.
    Mirror,
}

impl TileMode {
    fn apply(self, t: f32) -> f32 {
        match self {
            Self::Clamp => t.clamp(0.0, 1.0),
            Self::Repeat => t.rem_euclid(1.0),
            Self::Mirror => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }
}

/// Colour at a position along a gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorStop {
    /// Position in `[0, 1]`.
    pub offset: f32,
    /// Colour at `offset`.
    pub color: Color,
}

/// Ordered colour stops shared by linear and radial gradients.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStops(Vec<ColorStop>);

impl GradientStops {
    /// Validate stop offsets (non-empty, finite, non-decreasing).
    pub fn new(stops: Vec<ColorStop>) -> GlyphFxResult<Self> {
        if stops.is_empty() {
            return Err(GlyphFxError::validation("gradient needs at least one stop"));
        }
        if stops.iter().any(|s| !s.offset.is_finite()) {
            return Err(GlyphFxError::validation("gradient stop offsets must be finite"));
        }
        if stops.windows(2).any(|w| w[1].offset < w[0].offset) {
            return Err(GlyphFxError::validation(
                "gradient stop offsets must be non-decreasing",
            ));
        }
        Ok(Self(stops))
    }

    /// Colours spread evenly over `[0, 1]`.
    pub fn even(colors: &[Color]) -> Self {
        let n = colors.len();
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| ColorStop {
                offset: if n <= 1 {
                    0.0
                } else {
                    i as f32 / (n - 1) as f32
                },
                color,
            })
            .collect::<Vec<_>>();
        if stops.is_empty() {
            return Self(vec![ColorStop {
                offset: 0.0,
                color: Color::TRANSPARENT,
            }]);
        }
        Self(stops)
    }

    /// Stops as a slice.
    pub fn stops(&self) -> &[ColorStop] {
        &self.0
    }

    /// Colour at already-tiled parameter `t`.
    pub fn color_at(&self, t: f32) -> Color {
        let stops = &self.0;
        let first = stops[0];
        if t <= first.offset {
            return first.color;
        }
        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.offset) / span);
            }
        }
        stops[stops.len() - 1].color
    }
}

/// Gradient along the segment `start -> end`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    /// Where `t == 0`.
    pub start: Point,
    /// Where `t == 1`.
    pub end: Point,
    /// Colour stops.
    pub stops: GradientStops,
    /// Behaviour outside the segment.
    pub tile: TileMode,
}

impl LinearGradient {
    /// Colour at pixel-space point `p`.
    pub fn color_at(&self, p: Point) -> Color {
        let d = self.end - self.start;
        let len2 = d.hypot2();
        let t = if len2 <= f64::EPSILON {
            0.0
        } else {
            ((p - self.start).dot(d) / len2) as f32
        };
        self.stops.color_at(self.tile.apply(t))
    }
}

/// Gradient radiating from `center`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    /// Where `t == 0`.
    pub center: Point,
    /// Distance at which `t == 1`.
    pub radius: f64,
    /// Colour stops.
    pub stops: GradientStops,
    /// Behaviour beyond `radius`.
    pub tile: TileMode,
}

impl RadialGradient {
    /// Colour at pixel-space point `p`.
    pub fn color_at(&self, p: Point) -> Color {
        let t = if self.radius <= f64::EPSILON {
            1.0
        } else {
            ((p - self.center).hypot() / self.radius) as f32
        };
        self.stops.color_at(self.tile.apply(t))
    }
}

/// Paint that can be restricted to a glyph mask.
#[derive(Clone, Debug)]
pub enum FillSource {
    /// One colour everywhere.
    Solid(Color),
    /// Linear gradient in mask pixel space.
    Linear(LinearGradient),
    /// Radial gradient in mask pixel space.
    Radial(RadialGradient),
    /// Pre-rendered pixels (shader output), top-left aligned; transparent beyond its bounds.
    Pixels(Arc<PixelBuffer>),
}

impl FillSource {
    /// Two-colour vertical gradient from `top` at `y0` to `bottom` at `y1`.
    pub fn vertical(top: Color, bottom: Color, y0: f64, y1: f64) -> Self {
        Self::Linear(LinearGradient {
            start: Point::new(0.0, y0),
            end: Point::new(0.0, y1),
            stops: GradientStops::even(&[top, bottom]),
            tile: TileMode::Clamp,
        })
    }

    /// Paint a `width x height` buffer, sampling at pixel centres.
    pub fn render(&self, width: u32, height: u32) -> PixelBuffer {
        match self {
            Self::Solid(c) => PixelBuffer::filled(width, height, *c),
            Self::Pixels(p) => {
                let mut out = PixelBuffer::new(width, height);
                for y in 0..height.min(p.height()) {
                    for x in 0..width.min(p.width()) {
                        out.set_pixel(x, y, p.pixel(x, y));
                    }
                }
                out
            }
            Self::Linear(g) => render_rows(width, height, |p| g.color_at(p)),
            Self::Radial(g) => render_rows(width, height, |p| g.color_at(p)),
        }
    }
}

fn render_rows(width: u32, height: u32, f: impl Fn(Point) -> Color + Sync) -> PixelBuffer {
    if width == 0 || height == 0 {
        return PixelBuffer::new(width, height);
    }
    let w = width as usize;
    let mut data = vec![0u8; w * height as usize * 4];
    data.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for (x, d) in row.chunks_exact_mut(4).enumerate() {
            let c = f(Point::new(x as f64 + 0.5, y as f64 + 0.5));
            d.copy_from_slice(&c.to_premul().to_array());
        }
    });
    PixelBuffer::from_raw(width, height, data)
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/fill.rs"]
mod tests;
