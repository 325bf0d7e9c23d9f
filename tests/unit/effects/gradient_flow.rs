use super::*;
use crate::animation::rng::SequenceRng;

#[test]
fn shift_wraps_at_twice_the_width() {
    let fx = GradientFlowEffect::new(10_000.0).unwrap();
    assert_eq!(fx.shift(300.0, 0.0), 0.0);
    // 2500 ms -> 1000 px -> 1000 mod 600.
    assert!((fx.shift(300.0, 2500.0) - 400.0).abs() < 1e-3);
    assert!(fx.shift(300.0, 9999.0) < 600.0);
    assert_eq!(fx.shift(0.0, 2500.0), 0.0);
}

#[test]
fn fill_moves_with_time() {
    let fx = GradientFlowEffect::new(10_000.0).unwrap();
    let mask = GlyphMask::new(30, 10, 8.0, vec![255; 300]).unwrap();
    let mut rng = SequenceRng::from_floats([0.5]);
    let a = fx.render(&mask, FrameCtx::at(0.0), &mut rng).unwrap();
    let b = fx.render(&mask, FrameCtx::at(100.0), &mut rng).unwrap();
    assert_ne!(a, b);
    assert_eq!(a.pixels.covered_pixels(), 300);
}

#[test]
fn gradient_mirrors_outside_its_axis() {
    let fx = GradientFlowEffect::new(10_000.0).unwrap();
    let g = fx.gradient(100.0, 0.0, 0.0).unwrap();
    assert_eq!(g.tile, TileMode::Mirror);
    assert_eq!(g.color_at(Point::new(-100.0, 0.0)), Color::from_argb32(0xFF8E24AA));
    assert_eq!(g.color_at(Point::new(300.0, 0.0)), Color::from_argb32(0xFF8E24AA));
}
