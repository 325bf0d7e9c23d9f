use super::*;
use crate::animation::rng::SequenceRng;

fn centre_block() -> GlyphMask {
    let mut alpha = vec![0u8; 60 * 40];
    for y in 15..25 {
        for x in 25..35 {
            alpha[y * 60 + x] = 255;
        }
    }
    GlyphMask::new(60, 40, 30.0, alpha).unwrap()
}

#[test]
fn packet_travel_respects_direction() {
    let forward = Trace {
        horizontal: true,
        pos: 0.5,
        length: 0.5,
        offset: 0.0,
        direction: 1.0,
    };
    let backward = Trace {
        direction: -1.0,
        ..forward
    };
    assert!((forward.travel(0.25) - 0.25).abs() < 1e-6);
    assert!((backward.travel(0.25) - 0.75).abs() < 1e-6);
    assert_eq!(forward.travel(0.0), 0.0);
    assert_eq!(backward.travel(0.0), 0.0);
}

#[test]
fn layout_is_seeded() {
    let a = CircuitEffect::new(2000.0, 4).unwrap();
    let b = CircuitEffect::new(2000.0, 4).unwrap();
    let c = CircuitEffect::new(2000.0, 5).unwrap();
    assert_eq!(a.traces(), b.traces());
    assert_ne!(a.traces(), c.traces());
    assert_eq!(a.traces().len(), 15);
    assert!(a
        .traces()
        .iter()
        .all(|t| (0.2..0.7).contains(&t.length) && t.direction.abs() == 1.0));
}

#[test]
fn panel_fills_glyphs_and_traces_cross_the_layer() {
    let fx = CircuitEffect::new(2000.0, 11).unwrap();
    let out = fx
        .render(&centre_block(), FrameCtx::at(500.0), &mut SequenceRng::from_floats([0.5]))
        .unwrap();
    assert_eq!(out.pixels.pixel(30, 20)[3], 255);
    assert!(out.pixels.covered_pixels() > 100);
}
