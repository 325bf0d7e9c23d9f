use crate::foundation::core::Color;
use crate::foundation::error::{GlyphFxError, GlyphFxResult};

/// Host-tunable effect parameters. Missing JSON fields keep their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectTuning {
    /// Neon flicker coefficient; dips happen with probability `speed * 0.1` per frame.
    pub neon_flicker_speed: f32,
    /// Glitch probability and magnitude multiplier.
    pub glitch_intensity: f32,
    /// Glitch main colour.
    pub glitch_base: Color,
    /// Glitch colour shifted right; also tints the slice band.
    pub glitch_split_a: Color,
    /// Glitch colour shifted left.
    pub glitch_split_b: Color,
    /// Metallic gradient tilt in degrees.
    pub metallic_angle_deg: f32,
    /// Extrusion depth in pixels.
    pub three_d_depth: u32,
    /// Extrusion direction in degrees.
    pub three_d_angle_deg: f32,
    /// Slow flame rise half-period; the fast layer runs four times quicker.
    pub fire_rise_ms: f64,
    /// Liquid wave period.
    pub liquid_wave_ms: f64,
    /// Circuit data packet travel time.
    pub circuit_packet_ms: f64,
    /// Spotlight one-way sweep time.
    pub spotlight_sweep_ms: f64,
    /// Chromatic jitter half-period.
    pub chromatic_jitter_ms: f64,
    /// Sketch reveal duration.
    pub sketch_reveal_ms: f64,
    /// Gradient flow loop period.
    pub gradient_flow_ms: f64,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            neon_flicker_speed: 0.2,
            glitch_intensity: 1.0,
            glitch_base: Color::BLACK,
            glitch_split_a: Color::from_argb32(0xFFFF00FF),
            glitch_split_b: Color::from_argb32(0xFF0000FF),
            metallic_angle_deg: 10.0,
            three_d_depth: 15,
            three_d_angle_deg: 30.0,
            fire_rise_ms: 2000.0,
            liquid_wave_ms: 3000.0,
            circuit_packet_ms: 2000.0,
            spotlight_sweep_ms: 3000.0,
            chromatic_jitter_ms: 100.0,
            sketch_reveal_ms: 2000.0,
            gradient_flow_ms: 10_000.0,
        }
    }
}

impl EffectTuning {
    /// Reject values no effect can render with.
    pub fn validate(&self) -> GlyphFxResult<()> {
        let coefficients = [
            ("neon_flicker_speed", self.neon_flicker_speed),
            ("glitch_intensity", self.glitch_intensity),
            ("metallic_angle_deg", self.metallic_angle_deg),
            ("three_d_angle_deg", self.three_d_angle_deg),
        ];
        for (name, v) in coefficients {
            if !v.is_finite() {
                return Err(GlyphFxError::validation(format!("{name} must be finite")));
            }
        }
        if self.neon_flicker_speed < 0.0 || self.glitch_intensity < 0.0 {
            return Err(GlyphFxError::validation(
                "flicker speed and glitch intensity must be >= 0",
            ));
        }
        if self.three_d_depth > 256 {
            return Err(GlyphFxError::validation("three_d_depth must be <= 256"));
        }
        let periods = [
            ("fire_rise_ms", self.fire_rise_ms),
            ("liquid_wave_ms", self.liquid_wave_ms),
            ("circuit_packet_ms", self.circuit_packet_ms),
            ("spotlight_sweep_ms", self.spotlight_sweep_ms),
            ("chromatic_jitter_ms", self.chromatic_jitter_ms),
            ("sketch_reveal_ms", self.sketch_reveal_ms),
            ("gradient_flow_ms", self.gradient_flow_ms),
        ];
        for (name, v) in periods {
            if !v.is_finite() || v <= 0.0 {
                return Err(GlyphFxError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}
