use super::*;
use crate::animation::rng::SequenceRng;

fn block_mask() -> GlyphMask {
    GlyphMask::new(10, 10, 8.0, vec![255; 100]).unwrap()
}

#[test]
fn extrusion_grows_the_canvas_towards_the_angle() {
    let face = Color::from_argb32(0xFF2E86C1);
    let fx = ThreeDEffect::new(face, 15, 30.0);
    let out = fx
        .render(&block_mask(), FrameCtx::at(0.0), &mut SequenceRng::from_floats([0.5]))
        .unwrap();
    assert_eq!((out.pixels.width(), out.pixels.height()), (23, 18));
    assert_eq!(out.origin, Vec2::ZERO);
    assert_eq!(out.pixels.pixel(5, 5), face.to_premul().to_array());
    assert_eq!(out.pixels.pixel(20, 14), [0, 0, 0, 255]);
    assert_eq!(out.pixels.pixel(22, 0)[3], 0);
}

#[test]
fn negative_directions_pad_the_leading_edges() {
    let fx = ThreeDEffect::new(Color::WHITE, 4, 180.0);
    let out = fx
        .render(&block_mask(), FrameCtx::at(0.0), &mut SequenceRng::from_floats([0.5]))
        .unwrap();
    assert_eq!(out.origin, Vec2::new(4.0, 0.0));
    assert_eq!(out.pixels.width(), 14);
    assert_eq!(out.pixels.pixel(1, 5), [0, 0, 0, 255]);
}

#[test]
fn zero_depth_is_just_the_face() {
    let fx = ThreeDEffect::new(Color::WHITE, 0, 30.0);
    let out = fx
        .render(&block_mask(), FrameCtx::at(0.0), &mut SequenceRng::from_floats([0.5]))
        .unwrap();
    assert_eq!((out.pixels.width(), out.pixels.height()), (10, 10));
    assert_eq!(out.pixels.covered_pixels(), 100);
}
