use super::*;
use crate::animation::rng::SequenceRng;

fn block_mask() -> GlyphMask {
    GlyphMask::new(20, 10, 8.0, vec![255; 200]).unwrap()
}

#[test]
fn missed_draws_leave_text_in_place() {
    let mut rng = SequenceRng::from_floats([0.99]);
    let draw = GlitchDraw::sample(&mut rng, 1.0);
    assert_eq!(draw.offset, Vec2::ZERO);
    assert_eq!(draw.split_x, 0.0);
    assert_eq!(draw.slice_y, None);
    assert_eq!(rng.draws(), 6);
}

#[test]
fn hits_take_the_low_end_of_each_range() {
    let mut rng = SequenceRng::from_floats([0.0]);
    let draw = GlitchDraw::sample(&mut rng, 1.0);
    assert_eq!(draw.offset, Vec2::new(-5.0, -2.0));
    assert_eq!(draw.split_x, -8.0);
    // A slice at 0% counts as no slice.
    assert_eq!(draw.slice_y, None);
    assert_eq!(draw.slice_height, 2.0);
    assert_eq!(draw.slice_offset, -10.0);
}

#[test]
fn zero_intensity_never_glitches() {
    let mut rng = SequenceRng::from_floats([0.0]);
    let draw = GlitchDraw::sample(&mut rng, 0.0);
    assert_eq!(draw.offset, Vec2::ZERO);
    assert_eq!(draw.split_x, 0.0);
    assert_eq!(draw.slice_y, None);
}

#[test]
fn calm_frame_shows_base_colour() {
    let fx = GlitchEffect::default();
    let out = fx
        .render(&block_mask(), FrameCtx::at(0.0), &mut SequenceRng::from_floats([0.99]))
        .unwrap();
    assert_eq!((out.pixels.width(), out.pixels.height()), (30, 20));
    assert_eq!(out.origin, Vec2::new(5.0, 5.0));
    assert_eq!(out.pixels.pixel(10, 8), [255, 255, 255, 255]);
    assert_eq!(out.pixels.pixel(2, 8)[3], 0);
}

#[test]
fn slice_band_is_shifted_sideways() {
    let fx = GlitchEffect::default();
    let draw = GlitchDraw {
        slice_y: Some(50.0),
        slice_height: 4.0,
        slice_offset: 3.0,
        ..GlitchDraw::default()
    };
    let out = fx.render_with(&block_mask(), &draw);
    // Glyphs span x in [5, 25); the band spills past the right edge.
    assert_eq!(out.pixels.pixel(26, 11), [0, 204, 204, 204]);
    assert_eq!(out.pixels.pixel(26, 8)[3], 0);
    assert_eq!(out.pixels.pixel(26, 14)[3], 0);
}

#[test]
fn split_copies_fringe_both_sides() {
    let fx = GlitchEffect::default();
    let draw = GlitchDraw {
        split_x: 3.0,
        ..GlitchDraw::default()
    };
    let out = fx.render_with(&block_mask(), &draw);
    let left = out.pixels.pixel(3, 8);
    let right = out.pixels.pixel(26, 8);
    assert!(left[0] > 0 && left[1] == 0, "red copy on the left: {left:?}");
    assert!(right[2] > 0 && right[0] == 0, "cyan copy on the right: {right:?}");
}
