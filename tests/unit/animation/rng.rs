use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn floats_stay_in_unit_range() {
    let mut r = Rng64::new(7);
    for _ in 0..1000 {
        let v = r.next_f32();
        assert!((0.0..1.0).contains(&v));
    }
    let mut e = EntropyRng::new();
    for _ in 0..1000 {
        let v = e.range_f32(-5.0, 5.0);
        assert!((-5.0..5.0).contains(&v));
    }
}

#[test]
fn ranges_respect_bounds() {
    let mut r = Rng64::new(99);
    for _ in 0..1000 {
        let v = r.range_i32(-8, 8);
        assert!((-8..8).contains(&v));
        assert!(r.index(4) < 4);
    }
    assert_eq!(r.range_i32(3, 3), 3);
    assert_eq!(r.index(0), 0);
}

#[test]
fn sequence_cycles_and_counts() {
    let mut s = SequenceRng::from_floats([0.1, 0.9]);
    assert_eq!(s.next_f32(), 0.1);
    assert_eq!(s.next_f32(), 0.9);
    assert_eq!(s.next_f32(), 0.1);
    assert_eq!(s.draws(), 3);

    assert!(s.chance(0.95));
    assert!(!s.chance(0.05));
}

#[test]
fn sequence_drives_integer_helpers() {
    let mut s = SequenceRng::from_floats([0.0, 0.5, 1.0]);
    assert_eq!(s.range_i32(-5, 5), -5);
    assert_eq!(s.range_i32(-5, 5), 0);
    assert_eq!(s.range_i32(-5, 5), 4);
}

#[test]
fn trait_objects_are_usable() {
    let mut boxed: Box<dyn RandomSource> = Box::new(SequenceRng::from_floats([0.25]));
    assert_eq!(boxed.range_f32(0.0, 4.0), 1.0);
}

#[test]
fn entropy_rng_draws_live_values_in_range() {
    let mut rng = EntropyRng::new();
    for _ in 0..256 {
        let f = rng.next_f32();
        assert!((0.0..1.0).contains(&f));
        assert!(rng.index(7) < 7);
    }
}
