use super::*;

const ALL: [Ease; 4] = [
    Ease::Linear,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::FastOutSlowIn,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn fast_out_slow_in_front_loads_motion() {
    assert!(Ease::FastOutSlowIn.apply(0.5) > 0.7);
}
