use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul::<4>(&src, 1, 2, 0, 1.0);
    assert_eq!(out, src);
}

#[test]
fn interior_of_constant_image_is_preserved() {
    let (w, h) = (9u32, 9u32);
    let src = [10u8, 20, 30, 40].repeat((w * h) as usize);
    let out = blur_rgba8_premul::<4>(&src, w, h, 2, 1.0);
    let centre = ((4 * w + 4) * 4) as usize;
    assert_eq!(&out[centre..centre + 4], &[10, 20, 30, 40]);
    // Edges fade toward transparent.
    assert!(out[3] < 40);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul::<4>(&src, w, h, 2, 1.2);

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 16);
}

#[test]
fn single_channel_blur_matches_alpha_of_rgba_blur() {
    let (w, h) = (6u32, 5u32);
    let alpha: Vec<u8> = (0..w * h).map(|i| if i % 7 == 0 { 255 } else { 0 }).collect();
    let rgba: Vec<u8> = alpha.iter().flat_map(|&a| [a, a, a, a]).collect();

    let a1 = blur_rgba8_premul::<1>(&alpha, w, h, 3, 1.5);
    let a4 = blur_rgba8_premul::<4>(&rgba, w, h, 3, 1.5);
    let a4_alpha: Vec<u8> = a4.chunks_exact(4).map(|px| px[3]).collect();
    assert_eq!(a1, a4_alpha);
}
