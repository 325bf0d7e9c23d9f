use super::*;

fn square(w: u32, inner: std::ops::Range<u32>) -> GlyphMask {
    let mut alpha = vec![0u8; (w * w) as usize];
    for y in inner.clone() {
        for x in inner.clone() {
            alpha[(y * w + x) as usize] = 255;
        }
    }
    GlyphMask::new(w, w, w as f32, alpha).unwrap()
}

#[test]
fn new_rejects_mismatched_coverage() {
    assert!(GlyphMask::new(2, 2, 1.0, vec![0; 3]).is_err());
}

#[test]
fn padding_shifts_coverage_and_baseline() {
    let m = square(4, 1..3);
    let p = m.padded(Insets {
        left: 2,
        top: 3,
        right: 1,
        bottom: 0,
    });
    assert_eq!((p.width(), p.height()), (7, 7));
    assert_eq!(p.baseline(), 7.0);
    assert_eq!(p.alpha_at(3, 4), 255);
    assert_eq!(p.alpha_at(1, 4), 0);
    assert!(GlyphMask::empty().padded(Insets::uniform(5)).is_empty());
}

#[test]
fn outline_is_a_ring() {
    let m = square(21, 5..16);
    let o = m.outline(2.0);
    assert_eq!(o.alpha_at(10, 10), 0);
    assert_eq!(o.alpha_at(5, 10), 255);
    assert_eq!(o.alpha_at(4, 10), 255);
    assert_eq!(o.alpha_at(0, 10), 0);
}

#[test]
fn blur_softens_edges() {
    let m = square(11, 4..7);
    let b = m.blurred(2.0);
    assert!(b.alpha_at(5, 5) < 255);
    assert!(b.alpha_at(2, 5) > 0);
}

#[test]
fn mask_keys_distinguish_style() {
    let a = TextStyle::default();
    let mut b = a;
    b.weight = 800;
    assert_eq!(MaskKey::new("Hi", &a), MaskKey::new("Hi", &a));
    assert_ne!(MaskKey::new("Hi", &a), MaskKey::new("Hi", &b));
    assert_ne!(MaskKey::new("Hi", &a), MaskKey::new("Ho", &a));
}

#[test]
fn style_validation() {
    let mut s = TextStyle::default();
    assert!(s.validate().is_ok());
    s.font_size = 0.0;
    assert!(s.validate().is_err());
    s.font_size = 10.0;
    s.weight = 0;
    assert!(s.validate().is_err());
}
