use super::*;

fn timings() -> StageTimings {
    StageTimings::default()
}

#[test]
fn stages_follow_the_fixed_holds() {
    let t = timings();
    let n = 3;
    assert_eq!(stage_at(&t, n, 0.0), DemoStage::Intro);
    assert_eq!(stage_at(&t, n, 2999.9), DemoStage::Intro);
    assert_eq!(stage_at(&t, n, 3000.0), DemoStage::Loop);
    let outro = 3000.0 + n as f64 * 2000.0 + 500.0;
    assert_eq!(t.outro_start_ms(n), outro);
    assert_eq!(stage_at(&t, n, outro - 0.1), DemoStage::Loop);
    assert_eq!(stage_at(&t, n, outro), DemoStage::Outro);
    assert_eq!(stage_at(&t, n, 1e9), DemoStage::Outro);
}

#[test]
fn words_advance_every_hold_and_linger_through_the_tail() {
    let t = timings();
    assert_eq!(word_index_at(&t, 3, 2000.0), None);
    assert_eq!(word_index_at(&t, 3, 3000.0), Some(0));
    assert_eq!(word_index_at(&t, 3, 4999.0), Some(0));
    assert_eq!(word_index_at(&t, 3, 5000.0), Some(1));
    assert_eq!(word_index_at(&t, 3, 9200.0), Some(2));
    assert_eq!(word_index_at(&t, 3, 9500.0), None);
}

#[test]
fn empty_schedule_still_reaches_the_outro() {
    let t = timings();
    assert_eq!(word_index_at(&t, 0, 3100.0), None);
    assert_eq!(stage_at(&t, 0, 3499.0), DemoStage::Loop);
    assert_eq!(stage_at(&t, 0, 3500.0), DemoStage::Outro);
}

#[test]
fn machine_reports_changes_once() {
    let mut m = Orchestrator::new(timings(), 2).unwrap();
    assert_eq!(m.stage(), DemoStage::Intro);

    let tick = m.advance(2999.0);
    assert_eq!(tick.left_stage, None);
    assert!(!tick.word_changed);

    let tick = m.advance(1.0);
    assert_eq!(tick.stage, DemoStage::Loop);
    assert_eq!(tick.left_stage, Some(DemoStage::Intro));
    assert_eq!(tick.word, Some(0));
    assert!(tick.word_changed);

    let tick = m.advance(16.0);
    assert_eq!(tick.left_stage, None);
    assert!(!tick.word_changed);
    assert_eq!(m.stage_elapsed_ms(), 16.0);

    let tick = m.advance_to(5000.0);
    assert_eq!(tick.word, Some(1));
    assert!(tick.word_changed);
}

#[test]
fn outro_is_terminal_and_time_never_rewinds() {
    let mut m = Orchestrator::new(timings(), 2).unwrap();
    let tick = m.advance_to(7500.0);
    assert_eq!(tick.stage, DemoStage::Outro);
    assert_eq!(tick.left_stage, Some(DemoStage::Intro));

    let back = m.advance_to(100.0);
    assert_eq!(back.stage, DemoStage::Outro);
    assert_eq!(back.elapsed_ms, 7500.0);
    assert_eq!(back.left_stage, None);

    for _ in 0..100 {
        assert_eq!(m.advance(10_000.0).stage, DemoStage::Outro);
    }
    assert_eq!(m.advance(-50.0).elapsed_ms, m.elapsed_ms());
    assert_eq!(m.advance(f64::NAN).stage, DemoStage::Outro);
}

#[test]
fn invalid_timings_are_rejected() {
    let bad = StageTimings {
        word_ms: 0.0,
        ..timings()
    };
    assert!(Orchestrator::new(bad, 3).is_err());
    let bad = StageTimings {
        intro_ms: f64::INFINITY,
        ..timings()
    };
    assert!(bad.validate().is_err());
    let t: StageTimings = serde_json::from_str(r#"{"word_ms": 1000}"#).unwrap();
    assert_eq!(t.word_ms, 1000.0);
    assert_eq!(t.intro_ms, 3000.0);
}
