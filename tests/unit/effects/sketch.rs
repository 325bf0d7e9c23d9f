use super::*;
use crate::animation::rng::SequenceRng;

fn block_mask() -> GlyphMask {
    GlyphMask::new(40, 20, 16.0, vec![255; 800]).unwrap()
}

#[test]
fn jitter_depends_only_on_text() {
    let a = SketchEffect::new("Danke", 2000.0).unwrap();
    let b = SketchEffect::new("Danke", 500.0).unwrap();
    let c = SketchEffect::new("Merci", 2000.0).unwrap();
    assert_eq!(a.jitter(), b.jitter());
    assert_ne!(a.jitter(), c.jitter());
    assert!(a
        .jitter()
        .iter()
        .all(|v| v.x.abs() <= 1.5 && v.y.abs() <= 1.5));
}

#[test]
fn reveal_runs_once_and_holds() {
    let fx = SketchEffect::new("Tak", 2000.0).unwrap();
    assert_eq!(fx.revealed(0.0), (0.0, false));
    assert_eq!(fx.revealed(1000.0), (0.5, false));
    assert_eq!(fx.revealed(2000.0), (1.0, true));
    assert_eq!(fx.revealed(60_000.0), (1.0, true));
}

#[test]
fn nothing_visible_before_the_reveal_starts() {
    let fx = SketchEffect::new("Tak", 2000.0).unwrap();
    let mut rng = SequenceRng::from_floats([0.5]);
    let start = fx.render(&block_mask(), FrameCtx::at(0.0), &mut rng).unwrap();
    assert_eq!((start.pixels.width(), start.pixels.height()), (50, 30));
    assert!(start.is_blank());
}

#[test]
fn half_reveal_shows_only_the_left_half() {
    let fx = SketchEffect::new("Tak", 2000.0).unwrap();
    let mut rng = SequenceRng::from_floats([0.5]);
    let half = fx.render(&block_mask(), FrameCtx::at(1000.0), &mut rng).unwrap();
    let right_side = (25..50).flat_map(|x| (0..30).map(move |y| (x, y)));
    assert!(right_side.into_iter().all(|(x, y)| half.pixels.pixel(x, y)[3] == 0));
    assert!(half.pixels.covered_pixels() > 0);

    let full = fx.render(&block_mask(), FrameCtx::at(2500.0), &mut rng).unwrap();
    assert!(full.pixels.covered_pixels() > half.pixels.covered_pixels());
    // Outline only: the middle of the block stays empty.
    assert_eq!(full.pixels.pixel(25, 15)[3], 0);
}

#[test]
fn stroke_reaches_outside_the_glyph_bounds() {
    let mut fx = SketchEffect::new("Tak", 2000.0).unwrap();
    fx.jitter = [Vec2::ZERO; PASSES];
    let mut rng = SequenceRng::from_floats([0.5]);
    let full = fx.render(&block_mask(), FrameCtx::at(2500.0), &mut rng).unwrap();
    assert_eq!(full.origin, Vec2::new(5.0, 5.0));

    // The block spans x 5..45 and y 5..25 in the padded frame.
    assert!(full.pixels.pixel(4, 15)[3] > 0);
    assert!(full.pixels.pixel(45, 15)[3] > 0);
    assert!(full.pixels.pixel(25, 4)[3] > 0);
    assert!(full.pixels.pixel(25, 25)[3] > 0);
    assert!(full.pixels.pixel(5, 15)[3] > 0);
    assert_eq!(full.pixels.pixel(0, 15)[3], 0);
}
