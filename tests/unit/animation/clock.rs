use super::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn restart_wraps_continuously() {
    let c = PhaseClock::new(2000.0, LoopMode::Restart).unwrap();
    assert_eq!(c.tick(2000.0), c.tick(0.0));
    assert!(approx(c.tick(500.0).value, 0.25));
    assert!(approx(c.tick(4500.0).value, 0.25));
    assert!(!c.tick(10_000.0).completed);
}

#[test]
fn reverse_peaks_at_half_period() {
    let c = PhaseClock::new(1000.0, LoopMode::Reverse).unwrap();
    let period = c.period_ms().unwrap();
    assert_eq!(period, 2000.0);

    let peak = c.tick(period / 2.0).value;
    assert!(approx(peak, 1.0));
    assert!(c.tick(period / 2.0 - 50.0).value < peak);
    assert!(c.tick(period / 2.0 + 50.0).value < peak);
    assert!(approx(c.tick(1500.0).value, 0.5));
    assert!(approx(c.tick(period).value, 0.0));
}

#[test]
fn once_clamps_and_signals_completion() {
    let c = PhaseClock::new(3000.0, LoopMode::Once).unwrap();
    assert!(!c.tick(2999.0).completed);
    let done = c.tick(3000.0);
    assert!(done.completed);
    assert_eq!(done.value, 1.0);
    assert_eq!(c.tick(1.0e9), done);
    assert!(c.period_ms().is_none());
}

#[test]
fn radians_domain_scales_to_tau() {
    let c = PhaseClock::new(2000.0, LoopMode::Restart)
        .unwrap()
        .with_domain(PhaseDomain::Radians);
    let p = c.tick(1000.0);
    assert!(approx(p.value, std::f32::consts::PI));
    assert!(approx(p.unit(PhaseDomain::Radians), 0.5));
}

#[test]
fn rejects_degenerate_durations_and_negative_time() {
    assert!(PhaseClock::new(0.0, LoopMode::Restart).is_err());
    assert!(PhaseClock::new(f64::NAN, LoopMode::Once).is_err());

    let c = PhaseClock::new(100.0, LoopMode::Restart).unwrap();
    assert_eq!(c.tick(-50.0).value, 0.0);
    assert_eq!(c.tick(f64::INFINITY).value, 0.0);
}
