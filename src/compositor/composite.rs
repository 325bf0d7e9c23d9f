use crate::compositor::buffer::PixelBuffer;
use crate::compositor::fill::FillSource;
use crate::compositor::mask::GlyphMask;
use crate::foundation::core::Vec2;
use crate::foundation::math::mul_div255_u8;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over with an extra layer opacity.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub(crate) fn scale_px(px: PremulRgba8, k: u8) -> PremulRgba8 {
    let k = u16::from(k);
    [
        mul_div255_u8(u16::from(px[0]), k),
        mul_div255_u8(u16::from(px[1]), k),
        mul_div255_u8(u16::from(px[2]), k),
        mul_div255_u8(u16::from(px[3]), k),
    ]
}

/// Paint `fill` everywhere, then keep it only where `mask` covers (source-in).
///
/// An empty mask yields an empty buffer.
#[tracing::instrument(level = "trace", skip_all, fields(w = mask.width(), h = mask.height()))]
pub fn composite_with_fill(mask: &GlyphMask, fill: &FillSource) -> PixelBuffer {
    if mask.is_empty() {
        return PixelBuffer::empty();
    }
    let mut out = fill.render(mask.width(), mask.height());
    out.clip_to_mask(mask, Vec2::ZERO);
    out
}

/// Geometry a [`Layer`] restricts its fill to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayerShape {
    /// Full glyph coverage.
    Fill,
    /// Stroke of the glyph outline with the given width in pixels.
    Outline {
        /// Stroke width.
        width: f32,
    },
}

/// One halo or core pass of a layered glyph composite.
#[derive(Clone, Debug)]
pub struct Layer {
    /// Paint restricted to [`Layer::shape`].
    pub fill: FillSource,
    /// Glyph geometry used as the source-in mask.
    pub shape: LayerShape,
    /// Blur radius applied to this layer alone before it is drawn.
    pub blur_radius: f32,
    /// Translation of the layer relative to the mask origin.
    pub offset: Vec2,
    /// Layer opacity.
    pub opacity: f32,
}

impl Layer {
    /// Sharp, unshifted, opaque glyph fill.
    pub fn fill(fill: FillSource) -> Self {
        Self {
            fill,
            shape: LayerShape::Fill,
            blur_radius: 0.0,
            offset: Vec2::ZERO,
            opacity: 1.0,
        }
    }

    /// Sharp outline stroke of `width` pixels.
    pub fn outline(fill: FillSource, width: f32) -> Self {
        Self {
            shape: LayerShape::Outline { width },
            ..Self::fill(fill)
        }
    }

    /// Same layer blurred by `radius`.
    pub fn blurred(mut self, radius: f32) -> Self {
        self.blur_radius = radius;
        self
    }

    /// Same layer translated by `offset`.
    pub fn shifted(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// Composite glow layers onto a transparent buffer the size of `mask`.
///
/// Layers are blurred independently and drawn back-to-front: larger blur first, ties broken by the
/// caller's order, so sharp cores always land on top.
#[tracing::instrument(level = "trace", skip_all, fields(layers = layers.len()))]
pub fn compose_layers(mask: &GlyphMask, layers: &[Layer]) -> PixelBuffer {
    if mask.is_empty() {
        return PixelBuffer::empty();
    }

    let mut order: Vec<&Layer> = layers.iter().collect();
    order.sort_by(|a, b| b.blur_radius.total_cmp(&a.blur_radius));

    let mut out = PixelBuffer::new(mask.width(), mask.height());
    let mut outline_cache: Vec<(u32, GlyphMask)> = Vec::new();
    for layer in order {
        let colored = match layer.shape {
            LayerShape::Fill => composite_with_fill(mask, &layer.fill),
            LayerShape::Outline { width } => {
                let key = width.to_bits();
                let idx = match outline_cache.iter().position(|(k, _)| *k == key) {
                    Some(i) => i,
                    None => {
                        outline_cache.push((key, mask.outline(width)));
                        outline_cache.len() - 1
                    }
                };
                composite_with_fill(&outline_cache[idx].1, &layer.fill)
            }
        };
        let colored = if layer.blur_radius > 0.0 {
            colored.blurred(layer.blur_radius)
        } else {
            colored
        };
        out.draw_over(&colored, layer.offset, layer.opacity);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/composite.rs"]
mod tests;
