use super::*;

#[test]
fn spotlight_is_the_only_dark_theme() {
    for kind in EffectKind::ALL {
        let theme = theme_for(kind);
        assert_eq!(theme.prefer_light_chrome, kind != EffectKind::Spotlight, "{kind}");
    }
}

#[test]
fn spotlight_uses_a_wide_dark_radial() {
    let Background::Radial {
        inner,
        outer,
        radius,
    } = theme_for(EffectKind::Spotlight).background
    else {
        panic!("expected radial background");
    };
    assert_eq!(inner, Color::from_argb32(0xFF212121));
    assert_eq!(outer, Color::BLACK);
    assert_eq!(radius, Some(1800.0));
}

#[test]
fn titles_are_light() {
    assert!(intro_theme().prefer_light_chrome);
    assert!(outro_theme().prefer_light_chrome);
}

#[test]
fn solid_background_fills_the_canvas() {
    let canvas = Canvas::new(4, 3).unwrap();
    let px = outro_theme().background.render(canvas);
    assert_eq!((px.width(), px.height()), (4, 3));
    let expected = Color::from_argb32(0xFFF2F4F7).to_premul().to_array();
    assert_eq!(px.pixel(0, 0), expected);
    assert_eq!(px.pixel(3, 2), expected);
}

#[test]
fn radial_background_darkens_outwards() {
    let canvas = Canvas::new(41, 41).unwrap();
    let px = theme_for(EffectKind::Liquid).background.render(canvas);
    let centre = px.pixel(20, 20);
    let corner = px.pixel(0, 0);
    assert_eq!(centre[3], 255);
    assert!(centre[0] > corner[0]);
    // Beyond the default radius the outer colour is clamped.
    assert_eq!(corner, Color::from_argb32(0xFFCFD8DC).to_premul().to_array());
}
