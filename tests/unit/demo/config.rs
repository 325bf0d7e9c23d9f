use super::*;

#[test]
fn defaults_describe_the_full_demo() {
    let cfg = DemoConfig::default();
    cfg.validate().unwrap();
    assert_eq!((cfg.canvas.width, cfg.canvas.height), (720, 1280));
    assert_eq!(cfg.words.len(), 30);
    assert_eq!(cfg.intro.text, "10,000");
    assert_eq!(cfg.intro.style.letter_spacing, -4.0);
    assert_eq!(cfg.intro.holo.speed, 0.7);
    assert_eq!(cfg.outro.text, "More will come");
    assert_eq!(cfg.outro.holo.base_color, Color::from_argb32(0xFF0077B5));
    assert_eq!(cfg.timings.word_transition_ms, 800.0);
    assert!(cfg.host.shaders);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = DemoConfig::from_json_str(
        r##"{
            "canvas": { "width": 200, "height": 100 },
            "host": { "shaders": false },
            "tuning": { "glitch_base": "#FF0000" }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.canvas.width, 200);
    assert!(!cfg.host.shaders);
    assert_eq!(cfg.host.max_live_handles, 8);
    assert_eq!(cfg.tuning.glitch_base, Color::from_argb32(0xFFFF0000));
    assert_eq!(cfg.intro, TitleConfig::intro());
    assert_eq!(cfg.words.len(), 30);
}

#[test]
fn a_given_title_fills_its_gaps_with_generic_defaults() {
    let cfg = DemoConfig::from_json_str(r#"{ "outro": { "text": "Bye" } }"#).unwrap();
    assert_eq!(cfg.outro.text, "Bye");
    assert_eq!(cfg.outro.holo, HoloParams::default());
    assert_eq!(cfg.intro, TitleConfig::intro());
}

#[test]
fn invalid_values_are_rejected() {
    let zero = r#"{ "canvas": { "width": 0, "height": 10 } }"#;
    assert!(matches!(
        DemoConfig::from_json_str(zero),
        Err(GlyphFxError::Validation(_))
    ));
    let tiny_cache = r#"{ "mask_cache_entries": 2 }"#;
    assert!(DemoConfig::from_json_str(tiny_cache).is_err());
    let bad_font = r#"{ "intro": { "text": "x", "style": { "font_size": -1, "family": "serif",
        "weight": 900, "letter_spacing": 0, "align": "center" } } }"#;
    assert!(DemoConfig::from_json_str(bad_font).is_err());
    assert!(matches!(
        DemoConfig::from_json_str("{ not json"),
        Err(GlyphFxError::Serde(_))
    ));
}

#[test]
fn missing_file_is_reported() {
    let err = DemoConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("not/here.json"));
}

#[test]
fn serialized_config_loads_back() {
    let mut cfg = DemoConfig::default();
    cfg.words = vec!["Tak".to_owned(), "Kiitos".to_owned()];
    cfg.timings.word_ms = 1500.0;
    let json = cfg.to_json_string().unwrap();
    assert_eq!(DemoConfig::from_json_str(&json).unwrap(), cfg);
    assert_eq!(cfg.schedule().len(), 2);
}
