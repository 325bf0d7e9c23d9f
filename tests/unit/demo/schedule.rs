use super::*;

#[test]
fn default_schedule_has_thirty_words_in_order() {
    let schedule = DemoSchedule::default();
    assert_eq!(schedule.len(), 30);
    assert_eq!(schedule.get(0).unwrap().text, "Thank You");
    assert_eq!(schedule.get(29).unwrap().text, "Дякую");
    assert!(schedule.get(30).is_none());
}

#[test]
fn selection_is_a_pure_function_of_position() {
    for i in 0..60 {
        let a = select(i, "Merci");
        let b = select(i, "Merci");
        assert_eq!(a, b);
        assert_eq!(a.kind.index(), i % 11);
        assert_eq!(a.palette, (i / 11) % 3);
        assert_eq!(a.direction.index(), i % 4);
    }
}

#[test]
fn gracias_is_neon_sliding_from_the_top() {
    let schedule = DemoSchedule::new(&["Thank You", "Gracias", "Merci"]);
    let w = schedule.get(1).unwrap();
    assert_eq!(w.text, "Gracias");
    assert_eq!(w.kind, EffectKind::Neon);
    assert_eq!(w.direction, SlideDirection::FromTop);
    assert_eq!(w.direction.index(), 1);
}

#[test]
fn long_words_use_the_small_size() {
    assert_eq!(word_style("Teşekkürler", EffectKind::Liquid).font_size, 55.0);
    assert_eq!(word_style("Obrigado", EffectKind::Liquid).font_size, 75.0);
    // Counted in characters, not bytes.
    assert_eq!(word_style("ありがとう", EffectKind::Liquid).font_size, 75.0);
}

#[test]
fn variant_style_overrides() {
    assert_eq!(word_style("Tak", EffectKind::Circuit).weight, 800);
    assert_eq!(word_style("Tak", EffectKind::Chromatic).weight, 800);
    assert_eq!(word_style("Tak", EffectKind::GradientFlow).weight, 800);
    assert_eq!(word_style("Tak", EffectKind::Neon).weight, 900);
    assert_eq!(word_style("Tak", EffectKind::Glitch).family, FontFamilyKind::Monospace);
    assert_eq!(word_style("Tak", EffectKind::Metallic).family, FontFamilyKind::Serif);
    assert_eq!(word_style("Tak", EffectKind::Sketch).family, FontFamilyKind::Cursive);
    assert_eq!(word_style("Tak", EffectKind::Fire).family, FontFamilyKind::SansSerif);
    assert_eq!(word_style("Tak", EffectKind::Fire).letter_spacing, 1.0);
}

#[test]
fn slides_exit_opposite_to_where_they_enter() {
    for i in 0..4 {
        let d = SlideDirection::from_index(i);
        assert_eq!(d.enter_from() + d.exit_to(), Vec2::ZERO);
    }
    assert_eq!(SlideDirection::FromBottom.enter_from(), Vec2::new(0.0, 1.0));
    assert_eq!(SlideDirection::FromLeft.exit_to(), Vec2::new(1.0, 0.0));
    assert_eq!(SlideDirection::from_index(6), SlideDirection::FromRight);
}

#[test]
fn spec_is_seeded_with_the_position() {
    let w = select(17, "Dank u");
    let spec = w.spec();
    assert_eq!(spec.variant_seed, 17);
    assert_eq!(spec.kind, EffectKind::Metallic);
    assert_eq!(spec.style, w.style);
}

#[test]
fn schedule_serializes_for_the_cli() {
    let json = serde_json::to_value(DemoSchedule::new(&["Tak"])).unwrap();
    let first = &json["words"][0];
    assert_eq!(first["kind"], "liquid");
    assert_eq!(first["direction"], "from_bottom");
    assert_eq!(first["theme"]["prefer_light_chrome"], true);
}
