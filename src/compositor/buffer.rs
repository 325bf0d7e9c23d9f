use rayon::prelude::*;

use crate::compositor::blur::blur_rgba8_premul;
use crate::compositor::composite::{PremulRgba8, over, scale_px};
use crate::compositor::mask::GlyphMask;
use crate::foundation::core::{Affine, Color, Point, Rect, Vec2};
use crate::foundation::error::{GlyphFxError, GlyphFxResult};
use crate::foundation::math::blur_sigma;

/// Premultiplied RGBA8 raster, row-major, tightly packed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Zero-sized buffer, the output of rendering empty text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Buffer filled with one colour.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let px = color.to_premul().to_array();
        let mut out = Self::new(width, height);
        for d in out.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
        out
    }

    /// Wrap already-premultiplied bytes.
    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> GlyphFxResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GlyphFxError::render("pixel buffer size overflow"))?;
        if data.len() != expected {
            return Err(GlyphFxError::render(format!(
                "pixel buffer expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            data,
        }
    }

    /// Copy out of a `vello_cpu` render target.
    pub(crate) fn from_pixmap(pixmap: &vello_cpu::Pixmap) -> Self {
        Self {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` when the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`; transparent when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> PremulRgba8 {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: PremulRgba8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// `true` when every pixel has zero alpha (always true for empty buffers).
    pub fn is_fully_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Bilinear sample in premultiplied space with transparent edges. `(x, y)` in pixel units,
    /// pixel centres at `+0.5`.
    pub fn sample_bilinear(&self, x: f64, y: f64) -> [f32; 4] {
        if self.is_empty() {
            return [0.0; 4];
        }
        let fx = x - 0.5;
        let fy = y - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = (fx - x0) as f32;
        let ty = (fy - y0) as f32;
        let fetch = |xi: f64, yi: f64| -> [f32; 4] {
            if xi < 0.0 || yi < 0.0 || xi >= f64::from(self.width) || yi >= f64::from(self.height)
            {
                return [0.0; 4];
            }
            let p = self.pixel(xi as u32, yi as u32);
            [
                f32::from(p[0]),
                f32::from(p[1]),
                f32::from(p[2]),
                f32::from(p[3]),
            ]
        };
        let a = fetch(x0, y0);
        let b = fetch(x0 + 1.0, y0);
        let c = fetch(x0, y0 + 1.0);
        let d = fetch(x0 + 1.0, y0 + 1.0);
        let mut out = [0.0f32; 4];
        for i in 0..4 {
            let top = a[i] + (b[i] - a[i]) * tx;
            let bottom = c[i] + (d[i] - c[i]) * tx;
            out[i] = top + (bottom - top) * ty;
        }
        out
    }

    /// Draw `src` source-over with its top-left corner at `offset`.
    ///
    /// Integral offsets copy pixels directly; fractional offsets resample bilinearly.
    pub fn draw_over(&mut self, src: &PixelBuffer, offset: Vec2, opacity: f32) {
        if self.is_empty() || opacity <= 0.0 {
            return;
        }
        let integral = offset.x.fract() == 0.0 && offset.y.fract() == 0.0;
        let w = self.width as usize;
        self.data
            .par_chunks_mut(w * 4)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, d) in row.chunks_exact_mut(4).enumerate() {
                    let sx = x as f64 - offset.x;
                    let sy = y as f64 - offset.y;
                    let s = if integral {
                        if sx < 0.0 || sy < 0.0 {
                            [0; 4]
                        } else {
                            src.pixel(sx as u32, sy as u32)
                        }
                    } else {
                        quantize(src.sample_bilinear(sx + 0.5, sy + 0.5))
                    };
                    if s[3] == 0 {
                        continue;
                    }
                    let out = over([d[0], d[1], d[2], d[3]], s, opacity);
                    d.copy_from_slice(&out);
                }
            });
    }

    /// Draw `src` source-over through an affine transform mapping `src` space to this buffer.
    pub fn draw_over_affine(&mut self, src: &PixelBuffer, transform: Affine, opacity: f32) {
        if self.is_empty() || src.is_empty() || opacity <= 0.0 {
            return;
        }
        if transform.determinant().abs() < 1e-12 {
            return;
        }
        let inv = transform.inverse();
        let w = self.width as usize;
        self.data
            .par_chunks_mut(w * 4)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, d) in row.chunks_exact_mut(4).enumerate() {
                    let p = inv * Point::new(x as f64 + 0.5, y as f64 + 0.5);
                    let s = quantize(src.sample_bilinear(p.x, p.y));
                    if s[3] == 0 {
                        continue;
                    }
                    let out = over([d[0], d[1], d[2], d[3]], s, opacity);
                    d.copy_from_slice(&out);
                }
            });
    }

    /// Keep pixels only where `mask` (placed at `offset`) covers; destination-in.
    pub fn clip_to_mask(&mut self, mask: &GlyphMask, offset: Vec2) {
        if self.is_empty() {
            return;
        }
        let ox = offset.x.round() as i64;
        let oy = offset.y.round() as i64;
        let w = self.width as usize;
        self.data
            .par_chunks_mut(w * 4)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, d) in row.chunks_exact_mut(4).enumerate() {
                    let a = mask.alpha_at_signed(x as i64 - ox, y as i64 - oy);
                    if a == 255 {
                        continue;
                    }
                    let out = scale_px([d[0], d[1], d[2], d[3]], a);
                    d.copy_from_slice(&out);
                }
            });
    }

    /// Clear everything outside `rect`, rounding edges to whole pixels.
    pub fn clip_to_rect(&mut self, rect: Rect) {
        let x0 = rect.x0.max(0.0).round() as u32;
        let y0 = rect.y0.max(0.0).round() as u32;
        let x1 = rect.x1.max(0.0).round() as u32;
        let y1 = rect.y1.max(0.0).round() as u32;
        let w = self.width as usize;
        if w == 0 {
            return;
        }
        for (y, row) in self.data.chunks_exact_mut(w * 4).enumerate() {
            let y = y as u32;
            for (x, d) in row.chunks_exact_mut(4).enumerate() {
                let x = x as u32;
                if x < x0 || x >= x1 || y < y0 || y >= y1 {
                    d.fill(0);
                }
            }
        }
    }

    /// Alpha channel as a glyph mask with the given baseline.
    pub fn to_mask(&self, baseline: f32) -> GlyphMask {
        let alpha = self.data.chunks_exact(4).map(|px| px[3]).collect();
        GlyphMask::from_parts(self.width, self.height, baseline, alpha)
    }

    /// Gaussian-blurred copy; `radius` uses the usual radius-to-sigma conversion.
    pub fn blurred(&self, radius: f32) -> PixelBuffer {
        if self.is_empty() || !radius.is_finite() || radius <= 0.0 {
            return self.clone();
        }
        let sigma = blur_sigma(radius);
        let kernel_radius = (sigma * 3.0).ceil() as u32;
        let data =
            blur_rgba8_premul::<4>(&self.data, self.width, self.height, kernel_radius, sigma);
        Self::from_raw(self.width, self.height, data)
    }

    /// Straight-alpha RGBA8 bytes for image encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

fn quantize(px: [f32; 4]) -> PremulRgba8 {
    let q = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    let a = q(px[3]);
    [q(px[0]).min(a), q(px[1]).min(a), q(px[2]).min(a), a]
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/buffer.rs"]
mod tests;
