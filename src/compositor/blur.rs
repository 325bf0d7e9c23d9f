use rayon::prelude::*;

/// Separable gaussian blur over `C`-channel u8 rasters (premultiplied RGBA or bare alpha).
///
/// Pixels outside the raster count as transparent, so halos fade out at the edges instead of
/// smearing the border colour inward.
pub(crate) fn blur_rgba8_premul<const C: usize>(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> Vec<u8> {
    if radius == 0 || width == 0 || height == 0 || !sigma.is_finite() || sigma <= 0.0 {
        return src.to_vec();
    }
    let kernel = gaussian_kernel_q16(radius, sigma);
    let mut tmp = vec![0u8; src.len()];
    let mut out = vec![0u8; src.len()];
    horizontal_pass::<C>(src, &mut tmp, width, &kernel);
    vertical_pass::<C>(&tmp, &mut out, width, height, &kernel);
    out
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> Vec<u32> {
    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    weights
}

fn horizontal_pass<const C: usize>(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = width as usize;
    dst.par_chunks_mut(w * C)
        .zip(src.par_chunks(w * C))
        .for_each(|(out_row, in_row)| {
            for x in 0..w as i64 {
                let mut acc = [0u64; C];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = x + ki as i64 - radius;
                    if sx < 0 || sx >= w as i64 {
                        continue;
                    }
                    let idx = sx as usize * C;
                    for c in 0..C {
                        acc[c] += u64::from(kw) * u64::from(in_row[idx + c]);
                    }
                }
                let o = x as usize * C;
                for c in 0..C {
                    out_row[o + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass<const C: usize>(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = width as usize;
    let h = height as i64;
    dst.par_chunks_mut(w * C)
        .enumerate()
        .for_each(|(y, out_row)| {
            for x in 0..w {
                let mut acc = [0u64; C];
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = y as i64 + ki as i64 - radius;
                    if sy < 0 || sy >= h {
                        continue;
                    }
                    let idx = (sy as usize * w + x) * C;
                    for c in 0..C {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                for c in 0..C {
                    out_row[x * C + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/blur.rs"]
mod tests;
