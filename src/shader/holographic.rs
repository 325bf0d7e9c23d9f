use std::sync::Arc;

use crate::animation::clock::{LoopMode, PhaseClock};
use crate::compositor::buffer::PixelBuffer;
use crate::compositor::composite::composite_with_fill;
use crate::compositor::fill::FillSource;
use crate::compositor::mask::GlyphMask;
use crate::foundation::core::{Color, Point};
use crate::foundation::error::{GlyphFxError, GlyphFxResult};
use crate::foundation::math::{mix, smoothstep};
use crate::shader::bridge::{FragmentProgram, ShaderBridge, ShaderHandle};
use crate::shader::uniforms::{ShaderUniformSet, UniformDecl, UniformKind, UniformValue};

/// Milliseconds for one sweep at speed 1.
pub const HOLO_BASE_PERIOD_MS: f64 = 3500.0;

/// Tunables of the holographic brush.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HoloParams {
    /// Sweeps per 3.5 s; `0` freezes the beam at its start position.
    pub speed: f32,
    /// Beam angle in degrees.
    pub angle_deg: f32,
    /// Vertical offset added to fragment coordinates.
    pub y_offset: f32,
    /// Colour under the beam.
    pub base_color: Color,
    /// Beam brightness multiplier.
    pub intensity: f32,
    /// Beam half-width in pixels.
    pub beam_width: f32,
    /// Mix a cosine palette into the base colour.
    pub enable_gradient: bool,
}

impl Default for HoloParams {
    fn default() -> Self {
        Self {
            speed: 0.3,
            angle_deg: -20.0,
            y_offset: 0.0,
            base_color: Color::from_argb32(0xFFA0A4A8),
            intensity: 0.85,
            beam_width: 90.0,
            enable_gradient: true,
        }
    }
}

impl HoloParams {
    /// Beam time in `[0, 1)` at `elapsed_ms`.
    pub fn time_at(&self, elapsed_ms: f64) -> f32 {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return 0.0;
        }
        match PhaseClock::new(HOLO_BASE_PERIOD_MS / f64::from(self.speed), LoopMode::Restart) {
            Ok(clock) => clock.tick(elapsed_ms).value,
            Err(_) => 0.0,
        }
    }
}

/// Diagonal light band over a base colour with an optional cosine palette.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoloProgram;

fn soft_gradient(t: f32) -> [f32; 3] {
    const TAU: f32 = 6.28318;
    [0.0, 0.15, 0.3].map(|d| 0.75 + 0.3 * (TAU * (t + d)).cos())
}

impl FragmentProgram for HoloProgram {
    fn name(&self) -> &'static str {
        "holographic"
    }

    fn uniforms(&self) -> Vec<UniformDecl> {
        vec![
            UniformDecl::new("resolution", UniformKind::Vec2),
            UniformDecl::new("time", UniformKind::Float),
            UniformDecl::new("angle", UniformKind::Float),
            UniformDecl::new("yOffset", UniformKind::Float),
            UniformDecl::new("intensity", UniformKind::Float),
            UniformDecl::new("beamWidth", UniformKind::Float),
            UniformDecl::new("enableGradient", UniformKind::Int),
            UniformDecl::new("baseColor", UniformKind::Vec4),
        ]
    }

    fn shade(&self, u: &ShaderUniformSet, frag: Point, _content: Option<&PixelBuffer>) -> [f32; 4] {
        let time = u.float("time");
        let gx = frag.x as f32;
        let gy = frag.y as f32 + u.float("yOffset");
        let (ux, uy) = (gx / 800.0, gy / 800.0);

        let base = u.vec4("baseColor");
        let mut color = [base[0], base[1], base[2]];
        if u.int("enableGradient") != 0 {
            let g = soft_gradient(ux * 0.5 + uy * 0.2);
            for i in 0..3 {
                color[i] = mix(color[i], g[i], 0.6);
            }
        }

        let (s, c) = u.float("angle").sin_cos();
        let px = gx * c - gy * s;
        let beam_pos = time * 2500.0 - 700.0;
        let dist = (px - beam_pos).abs();
        let beam_int = 1.0 - smoothstep(0.0, u.float("beamWidth"), dist);

        let palette = soft_gradient(ux * 2.0 + time);
        let boost = beam_int * u.float("intensity");
        const BEAM: [f32; 3] = [0.95, 0.95, 1.0];
        for i in 0..3 {
            let beam = mix(BEAM[i], palette[i], 0.25);
            color[i] = (color[i] + beam * boost).clamp(0.0, 1.0);
        }
        [color[0], color[1], color[2], 1.0]
    }
}

/// Holographic fill bound to its own program instance, or a flat base-colour fallback.
#[derive(Debug)]
pub struct HolographicBrush {
    params: HoloParams,
    handle: Option<ShaderHandle>,
}

impl HolographicBrush {
    /// Bind a fresh program on `bridge`.
    ///
    /// Hosts without shader support get the flat fallback; a full handle table is an error.
    pub fn new(bridge: &ShaderBridge, params: HoloParams) -> GlyphFxResult<Self> {
        let handle = match bridge.bind(Arc::new(HoloProgram)) {
            Ok(h) => Some(h),
            Err(GlyphFxError::UnsupportedCapability(msg)) => {
                tracing::warn!(reason = %msg, "holographic brush using flat fallback");
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Self { params, handle })
    }

    /// Brush parameters.
    pub fn params(&self) -> &HoloParams {
        &self.params
    }

    /// `true` when rendering the flat substitute.
    pub fn is_fallback(&self) -> bool {
        self.handle.is_none()
    }

    /// Paint for a `width x height` area at `elapsed_ms`.
    pub fn fill(&mut self, width: u32, height: u32, elapsed_ms: f64) -> GlyphFxResult<FillSource> {
        let p = self.params;
        let Some(handle) = self.handle.as_mut() else {
            return Ok(FillSource::Solid(p.base_color.with_alpha(1.0)));
        };
        handle.set_uniform(
            "resolution",
            UniformValue::Vec2([width as f32, height as f32]),
        )?;
        handle.set_uniform("time", UniformValue::Float(p.time_at(elapsed_ms)))?;
        handle.set_uniform("angle", UniformValue::Float(p.angle_deg.to_radians()))?;
        handle.set_uniform("yOffset", UniformValue::Float(p.y_offset))?;
        handle.set_uniform("intensity", UniformValue::Float(p.intensity))?;
        handle.set_uniform("beamWidth", UniformValue::Float(p.beam_width))?;
        handle.set_uniform(
            "enableGradient",
            UniformValue::Int(i32::from(p.enable_gradient)),
        )?;
        handle.set_uniform("baseColor", UniformValue::Vec4(p.base_color.to_array()))?;
        let pixels = handle.evaluate(width, height, None)?;
        Ok(FillSource::Pixels(Arc::new(pixels)))
    }

    /// Glyphs of `mask` painted with the brush.
    #[tracing::instrument(level = "trace", skip_all, fields(fallback = self.is_fallback()))]
    pub fn render(&mut self, mask: &GlyphMask, elapsed_ms: f64) -> GlyphFxResult<PixelBuffer> {
        if mask.is_empty() {
            return Ok(PixelBuffer::empty());
        }
        let fill = self.fill(mask.width(), mask.height(), elapsed_ms)?;
        Ok(composite_with_fill(mask, &fill))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/holographic.rs"]
mod tests;
