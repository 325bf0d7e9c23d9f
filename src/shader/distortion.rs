use std::sync::Arc;

use crate::animation::clock::{LoopMode, PhaseClock, PhaseDomain};
use crate::compositor::buffer::PixelBuffer;
use crate::compositor::fill::{FillSource, GradientStops, RadialGradient, TileMode};
use crate::foundation::core::{Affine, Color, Point, Vec2};
use crate::foundation::error::{GlyphFxError, GlyphFxResult};
use crate::shader::bridge::{FragmentProgram, ShaderBridge, ShaderHandle};
use crate::shader::uniforms::{ShaderUniformSet, UniformDecl, UniformKind, UniformValue};

const WARP_PERIOD_MS: f64 = 2000.0;
const MAX_TILT_DEG: f64 = 15.0;
const PARALLAX: f64 = 0.1;
const GLOW_RADIUS: f64 = 1000.0;

/// Radial ripple around `iMouse` that displaces the sampled content.
#[derive(Clone, Copy, Debug, Default)]
pub struct DistortionProgram;

impl FragmentProgram for DistortionProgram {
    fn name(&self) -> &'static str {
        "distortion"
    }

    fn uniforms(&self) -> Vec<UniformDecl> {
        vec![
            UniformDecl::new("iResolution", UniformKind::Vec2),
            UniformDecl::new("iTime", UniformKind::Float),
            UniformDecl::new("iMouse", UniformKind::Vec2),
        ]
    }

    fn shade(&self, u: &ShaderUniformSet, frag: Point, content: Option<&PixelBuffer>) -> [f32; 4] {
        let Some(content) = content else {
            return [0.0; 4];
        };
        let [rw, rh] = u.vec2("iResolution");
        if rw <= 0.0 || rh <= 0.0 {
            return [0.0; 4];
        }
        let [mx, my] = u.vec2("iMouse");
        let uv = (frag.x as f32 / rw, frag.y as f32 / rh);
        let mouse = (mx / rw, my / rh);
        let (dx, dy) = (uv.0 - mouse.0, uv.1 - mouse.1);
        let d = (dx * dx + dy * dy).sqrt();
        let strength = 0.05 * (-10.0 * d).exp();
        let wave = (2.0 * u.float("iTime") - 20.0 * d).sin();
        let sx = frag.x + f64::from(dx * strength * wave * rw);
        let sy = frag.y + f64::from(dy * strength * wave * rh);
        content.sample_bilinear(sx, sy).map(|v| v / 255.0)
    }
}

/// Tilt of the content layer in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    /// Rotation around the horizontal axis.
    pub rotation_x_deg: f64,
    /// Rotation around the vertical axis.
    pub rotation_y_deg: f64,
}

/// Touch-driven liquid warp with tilt and a parallax glow.
///
/// Owns its own program instance; the handle is released when the overlay is dropped.
#[derive(Debug)]
pub struct DistortionOverlay {
    handle: Option<ShaderHandle>,
    fallback_color: Color,
    clock: PhaseClock,
    touch: Point,
    drag_offset: Vec2,
}

impl DistortionOverlay {
    /// Bind a fresh program on `bridge`, or fall back to a flat `fallback_color` wash.
    pub fn new(bridge: &ShaderBridge, fallback_color: Color) -> GlyphFxResult<Self> {
        let handle = match bridge.bind(Arc::new(DistortionProgram)) {
            Ok(h) => Some(h),
            Err(GlyphFxError::UnsupportedCapability(msg)) => {
                tracing::warn!(reason = %msg, "distortion overlay using flat fallback");
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            handle,
            fallback_color,
            clock: PhaseClock::new(WARP_PERIOD_MS, LoopMode::Restart)?
                .with_domain(PhaseDomain::Radians),
            touch: Point::ZERO,
            drag_offset: Vec2::ZERO,
        })
    }

    /// `true` when the warp is replaced by the flat wash.
    pub fn is_fallback(&self) -> bool {
        self.handle.is_none()
    }

    /// Current warp centre.
    pub fn touch_point(&self) -> Point {
        self.touch
    }

    /// Drag distance accumulated since the last drag end.
    pub fn drag_offset(&self) -> Vec2 {
        self.drag_offset
    }

    /// Tap: move the warp centre.
    pub fn on_tap(&mut self, at: Point) {
        self.touch = at;
    }

    /// Drag step: accumulate `delta` and follow the pointer.
    pub fn on_drag(&mut self, at: Point, delta: Vec2) {
        self.drag_offset += delta;
        self.touch = at;
    }

    /// Drag released.
    pub fn on_drag_end(&mut self) {
        self.drag_offset = Vec2::ZERO;
    }

    /// Tilt derived from the drag offset.
    pub fn tilt(&self) -> Tilt {
        Tilt {
            rotation_x_deg: (-self.drag_offset.y / 20.0).clamp(-MAX_TILT_DEG, MAX_TILT_DEG),
            rotation_y_deg: (self.drag_offset.x / 20.0).clamp(-MAX_TILT_DEG, MAX_TILT_DEG),
        }
    }

    /// Cyan glow centred on the touch point, shifted by the parallax offset.
    pub fn glow_fill(&self) -> FillSource {
        FillSource::Radial(RadialGradient {
            center: self.touch + self.drag_offset * PARALLAX,
            radius: GLOW_RADIUS,
            stops: GradientStops::even(&[
                Color::from_argb32(0xFF80DEEA).with_alpha(0.05),
                Color::TRANSPARENT,
            ]),
            tile: TileMode::Clamp,
        })
    }

    /// Warp, tilt and glow `content` at `elapsed_ms`.
    #[tracing::instrument(level = "trace", skip_all, fields(fallback = self.is_fallback()))]
    pub fn apply(&mut self, content: &PixelBuffer, elapsed_ms: f64) -> GlyphFxResult<PixelBuffer> {
        if content.is_empty() {
            return Ok(PixelBuffer::empty());
        }
        let (w, h) = (content.width(), content.height());
        let warped = match self.handle.as_mut() {
            Some(handle) => {
                handle.set_uniform("iResolution", UniformValue::Vec2([w as f32, h as f32]))?;
                handle.set_uniform(
                    "iTime",
                    UniformValue::Float(self.clock.tick(elapsed_ms).value),
                )?;
                handle.set_uniform(
                    "iMouse",
                    UniformValue::Vec2([self.touch.x as f32, self.touch.y as f32]),
                )?;
                handle.evaluate(w, h, Some(content))?
            }
            None => {
                let mut out = content.clone();
                out.draw_over(
                    &PixelBuffer::filled(w, h, self.fallback_color),
                    Vec2::ZERO,
                    1.0,
                );
                out
            }
        };

        let mut out = PixelBuffer::new(w, h);
        out.draw_over_affine(&warped, self.tilt_transform(w, h), 1.0);
        out.draw_over(&self.glow_fill().render(w, h), Vec2::ZERO, 1.0);
        Ok(out)
    }

    /// Orthographic projection of the tilted layer around its centre.
    fn tilt_transform(&self, w: u32, h: u32) -> Affine {
        let t = self.tilt();
        let c = Vec2::new(f64::from(w) / 2.0, f64::from(h) / 2.0);
        Affine::translate(c)
            * Affine::scale_non_uniform(
                t.rotation_y_deg.to_radians().cos(),
                t.rotation_x_deg.to_radians().cos(),
            )
            * Affine::translate(-c)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/distortion.rs"]
mod tests;
