use super::*;
use crate::shader::bridge::HostCaps;

fn full_mask(w: u32, h: u32) -> GlyphMask {
    GlyphMask::new(w, h, h as f32, vec![255; (w * h) as usize]).unwrap()
}

#[test]
fn unsupported_host_paints_flat_opaque_base() {
    let bridge = ShaderBridge::new(HostCaps {
        shaders: false,
        ..HostCaps::default()
    });
    let params = HoloParams {
        base_color: Color::from_argb32(0x802C3E50),
        ..HoloParams::default()
    };
    let mut brush = HolographicBrush::new(&bridge, params).unwrap();
    assert!(brush.is_fallback());

    let out = brush.render(&full_mask(6, 4), 1234.0).unwrap();
    let expected = [0x2C, 0x3E, 0x50, 0xFF];
    for y in 0..4 {
        for x in 0..6 {
            assert_eq!(out.pixel(x, y), expected);
        }
    }
}

#[test]
fn zero_speed_freezes_time() {
    let params = HoloParams {
        speed: 0.0,
        ..HoloParams::default()
    };
    assert_eq!(params.time_at(0.0), 0.0);
    assert_eq!(params.time_at(9999.0), 0.0);
}

#[test]
fn time_loops_over_scaled_period() {
    let params = HoloParams {
        speed: 0.5,
        ..HoloParams::default()
    };
    assert!((params.time_at(3500.0) - 0.5).abs() < 1e-6);
    assert!(params.time_at(7000.0).abs() < 1e-6);
}

#[test]
fn beam_brightens_pixels_it_crosses() {
    let mut u = ShaderUniformSet::new(&HoloProgram.uniforms());
    u.set("baseColor", UniformValue::Vec4([0.2, 0.2, 0.2, 1.0])).unwrap();
    u.set("beamWidth", UniformValue::Float(50.0)).unwrap();
    u.set("intensity", UniformValue::Float(1.0)).unwrap();
    // time 0.28 puts the beam at x = 0 with no rotation.
    u.set("time", UniformValue::Float(0.28)).unwrap();

    let on = HoloProgram.shade(&u, Point::new(0.0, 10.0), None);
    let off = HoloProgram.shade(&u, Point::new(400.0, 10.0), None);
    assert!(on[0] > 0.9);
    assert!((off[0] - 0.2).abs() < 1e-6);
    assert_eq!(on[3], 1.0);
    assert_eq!(off[3], 1.0);
}

#[test]
fn gradient_flag_mixes_palette() {
    let mut u = ShaderUniformSet::new(&HoloProgram.uniforms());
    u.set("baseColor", UniformValue::Vec4([0.0, 0.0, 0.0, 1.0])).unwrap();
    let flat = HoloProgram.shade(&u, Point::new(2000.0, 0.0), None);
    u.set("enableGradient", UniformValue::Int(1)).unwrap();
    let tinted = HoloProgram.shade(&u, Point::new(2000.0, 0.0), None);
    assert_eq!(flat[..3], [0.0, 0.0, 0.0]);
    assert!(tinted[0] > 0.2);
}

#[test]
fn bound_brush_paints_only_the_glyph() {
    let bridge = ShaderBridge::new(HostCaps::default());
    let mut brush = HolographicBrush::new(&bridge, HoloParams::default()).unwrap();
    assert!(!brush.is_fallback());
    assert_eq!(bridge.live_handles(), 1);

    let mut alpha = vec![0u8; 16];
    alpha[5] = 255;
    let mask = GlyphMask::new(4, 4, 4.0, alpha).unwrap();
    let out = brush.render(&mask, 500.0).unwrap();
    assert_eq!(out.pixel(1, 1)[3], 255);
    assert_eq!(out.covered_pixels(), 1);

    drop(brush);
    assert_eq!(bridge.live_handles(), 0);
}

#[test]
fn exhausted_bridge_is_an_error() {
    let bridge = ShaderBridge::new(HostCaps {
        shaders: true,
        max_live_handles: 0,
    });
    let err = HolographicBrush::new(&bridge, HoloParams::default()).unwrap_err();
    assert!(err.is_recoverable());
}
