use super::*;

fn canvas() -> Canvas {
    Canvas::new(100, 200).unwrap()
}

#[test]
fn word_transition_fades_linearly() {
    let mid = TransitionState::word(SlideDirection::FromBottom, canvas(), 400.0, 800.0);
    assert_eq!(mid.progress, 0.5);
    assert_eq!(mid.entering.opacity, 0.5);
    assert_eq!(mid.exiting.opacity, 0.5);
    assert!(!mid.is_finished());
    let done = TransitionState::word(SlideDirection::FromBottom, canvas(), 900.0, 800.0);
    assert!(done.is_finished());
}

#[test]
fn word_slides_cover_a_full_span() {
    let start = TransitionState::word(SlideDirection::FromBottom, canvas(), 0.0, 800.0);
    assert_eq!(start.entering.offset, Vec2::new(0.0, 200.0));
    assert_eq!(start.exiting.offset, Vec2::ZERO);

    let end = TransitionState::word(SlideDirection::FromRight, canvas(), 800.0, 800.0);
    assert_eq!(end.entering.offset, Vec2::ZERO);
    assert_eq!(end.exiting.offset, Vec2::new(-100.0, 0.0));

    let top = TransitionState::word(SlideDirection::FromTop, canvas(), 0.0, 800.0);
    assert_eq!(top.entering.offset, Vec2::new(0.0, -200.0));
}

#[test]
fn intro_to_loop_scales_both_layers() {
    let start = TransitionState::intro_to_loop(0.0, 1000.0);
    assert_eq!(start.entering.scale, 0.8);
    assert_eq!(start.exiting.scale, 1.0);
    assert_eq!(start.entering.opacity, 0.0);
    let end = TransitionState::intro_to_loop(1000.0, 1000.0);
    assert_eq!(end.entering.scale, 1.0);
    assert_eq!(end.exiting.scale, 1.5);
    assert!(end.exiting.is_hidden());
}

#[test]
fn outro_rises_from_the_bottom() {
    let start = TransitionState::loop_to_outro(canvas(), 0.0, 800.0);
    assert_eq!(start.entering.offset, Vec2::new(0.0, 200.0));
    let end = TransitionState::loop_to_outro(canvas(), 800.0, 800.0);
    assert_eq!(end.entering.offset, Vec2::ZERO);
    assert_eq!(end.entering.opacity, 1.0);
}

#[test]
fn zero_duration_finishes_immediately() {
    assert!(TransitionState::intro_to_loop(0.0, 0.0).is_finished());
    assert!(TransitionState::word(SlideDirection::FromLeft, canvas(), 0.0, f64::NAN).is_finished());
}

#[test]
fn layer_transform_scales_about_the_centre() {
    let v = LayerVisual {
        offset: Vec2::new(10.0, 0.0),
        scale: 2.0,
        opacity: 1.0,
    };
    let t = v.transform(canvas());
    let centre = t * canvas().center();
    assert_eq!(centre, canvas().center() + Vec2::new(10.0, 0.0));
    let corner = t * crate::foundation::core::Point::new(0.0, 0.0);
    assert_eq!(corner, crate::foundation::core::Point::new(-40.0, -100.0));
    assert_eq!(LayerVisual::IDENTITY.transform(canvas()), Affine::IDENTITY);
}
