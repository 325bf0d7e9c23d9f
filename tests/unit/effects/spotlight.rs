use super::*;
use crate::animation::rng::SequenceRng;

fn strip() -> GlyphMask {
    GlyphMask::new(100, 4, 3.0, vec![255; 400]).unwrap()
}

#[test]
fn band_sweeps_out_and_back() {
    let fx = SpotlightEffect::new(3000.0).unwrap();
    assert_eq!(fx.band_start(100.0, 0.0), -50.0);
    assert!((fx.band_start(100.0, 3000.0) - 100.0).abs() < 1e-6);
    assert!((fx.band_start(100.0, 6000.0) + 50.0).abs() < 1e-6);
    assert!((fx.band_start(100.0, 1500.0) - 25.0).abs() < 1e-6);
}

#[test]
fn band_lights_only_where_it_is() {
    let fx = SpotlightEffect::new(3000.0).unwrap();
    let mut rng = SequenceRng::from_floats([0.5]);
    // Band spans x in [25, 75) with its peak at 50.
    let out = fx.render(&strip(), FrameCtx::at(1500.0), &mut rng).unwrap();
    let lit = out.pixels.pixel(50, 1);
    assert!(lit[0] > 240, "peak should be bright: {lit:?}");
    assert_eq!(out.pixels.pixel(5, 1), [0x44, 0x44, 0x44, 255]);
    assert_eq!(out.pixels.pixel(95, 1), [0x44, 0x44, 0x44, 255]);
}
