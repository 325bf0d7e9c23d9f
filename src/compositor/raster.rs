use std::collections::HashMap;
use std::sync::Mutex;

use crate::compositor::mask::{FontFamilyKind, GlyphMask, TextStyle};
use crate::foundation::error::{GlyphFxError, GlyphFxResult};

/// Shapes text into a coverage mask.
///
/// Implementations must be pure: the same `(text, style)` always yields the same mask, which is
/// what lets [`crate::compositor::cache::MaskCache`] memoize them.
pub trait GlyphRasterizer: Send + Sync {
    /// Rasterize `text`. Empty text yields [`GlyphMask::empty`], not an error.
    fn rasterize(&self, text: &str, style: &TextStyle) -> GlyphFxResult<GlyphMask>;
}

/// Mask extent along one axis, bounded by what the vello_cpu target can address.
fn mask_side(extent: f32, axis: &str) -> GlyphFxResult<u16> {
    if extent > f32::from(u16::MAX) {
        return Err(GlyphFxError::exhausted(format!(
            "text mask {axis} {extent} exceeds {} px",
            u16::MAX
        )));
    }
    Ok(extent.max(0.0) as u16)
}

/// Font-free rasterizer that draws one solid block per visible character.
///
/// Metrics follow a fixed em box: advance `0.6 * size + letter_spacing`, line height
/// `ceil(1.25 * size)`, baseline at `size`. Useful for headless hosts and deterministic tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockRasterizer;

impl GlyphRasterizer for BlockRasterizer {
    #[tracing::instrument(level = "debug", skip(self, style), fields(size = style.font_size))]
    fn rasterize(&self, text: &str, style: &TextStyle) -> GlyphFxResult<GlyphMask> {
        style.validate()?;
        if text.is_empty() {
            return Ok(GlyphMask::empty());
        }

        let size = style.font_size;
        let advance = (size * 0.6 + style.letter_spacing).max(1.0);
        let line_h = (size * 1.25).ceil().max(1.0);
        let lines: Vec<&str> = text.split('\n').collect();
        let widths: Vec<f32> = lines
            .iter()
            .map(|l| l.chars().count() as f32 * advance)
            .collect();
        let width = u32::from(mask_side(
            widths.iter().copied().fold(0.0f32, f32::max).ceil(),
            "width",
        )?);
        let height = u32::from(mask_side(line_h * lines.len() as f32, "height")?);
        if width == 0 || height == 0 {
            return Ok(GlyphMask::empty());
        }

        // Heavier weights fill more of the cell.
        let ink = 0.5 + 0.4 * (f32::from(style.weight.clamp(100, 900)) - 100.0) / 800.0;
        let cell_w = advance * ink;
        let top = size * 0.25;
        let mut alpha = vec![0u8; (width as usize) * (height as usize)];
        for (li, (line, lw)) in lines.iter().zip(&widths).enumerate() {
            let x_start = (width as f32 - lw) * style.align.factor();
            let y0 = (li as f32 * line_h + top).floor() as u32;
            let y1 = (li as f32 * line_h + size).ceil() as u32;
            for (ci, ch) in line.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let cx = x_start + ci as f32 * advance + (advance - cell_w) / 2.0;
                let x0 = cx.floor().max(0.0) as u32;
                let x1 = ((cx + cell_w).ceil() as u32).min(width);
                for y in y0..y1.min(height) {
                    let row = (y as usize) * (width as usize);
                    alpha[row + x0 as usize..row + x1 as usize].fill(255);
                }
            }
        }

        GlyphMask::new(width, height, size, alpha)
    }
}

/// Raw font bytes per family slot. Missing slots fall back to sans-serif.
#[derive(Clone, Debug, Default)]
pub struct FontSet {
    faces: HashMap<FontFamilyKind, Vec<u8>>,
}

impl FontSet {
    /// Font set with a single face used for every family.
    pub fn single(bytes: Vec<u8>) -> Self {
        Self::default().with_face(FontFamilyKind::SansSerif, bytes)
    }

    /// Add or replace the face for `family`.
    pub fn with_face(mut self, family: FontFamilyKind, bytes: Vec<u8>) -> Self {
        self.faces.insert(family, bytes);
        self
    }

    /// Load a face from disk.
    pub fn with_face_file(
        self,
        family: FontFamilyKind,
        path: &std::path::Path,
    ) -> GlyphFxResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            GlyphFxError::validation(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Ok(self.with_face(family, bytes))
    }
}

struct RegisteredFace {
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

struct ParleyState {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
}

/// Rasterizer that shapes with Parley and fills glyph outlines with `vello_cpu`.
pub struct ParleyRasterizer {
    state: Mutex<ParleyState>,
    faces: HashMap<FontFamilyKind, RegisteredFace>,
}

impl std::fmt::Debug for ParleyRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyRasterizer")
            .field("families", &self.faces.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl ParleyRasterizer {
    /// Register every face of `fonts`. A sans-serif face is required.
    pub fn new(fonts: FontSet) -> GlyphFxResult<Self> {
        if !fonts.faces.contains_key(&FontFamilyKind::SansSerif) {
            return Err(GlyphFxError::validation(
                "font set needs a sans-serif face as fallback",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let mut faces = HashMap::new();
        for (kind, bytes) in fonts.faces {
            let families = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                GlyphFxError::validation(format!("no font families registered for {kind:?}"))
            })?;
            let family_name = font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| GlyphFxError::validation("registered font family has no name"))?
                .to_string();
            tracing::debug!(?kind, family = %family_name, "registered font face");
            faces.insert(
                kind,
                RegisteredFace {
                    family_name,
                    font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
                },
            );
        }

        Ok(Self {
            state: Mutex::new(ParleyState {
                font_ctx,
                layout_ctx: parley::LayoutContext::new(),
            }),
            faces,
        })
    }

    fn face(&self, family: FontFamilyKind) -> GlyphFxResult<&RegisteredFace> {
        self.faces
            .get(&family)
            .or_else(|| self.faces.get(&FontFamilyKind::SansSerif))
            .ok_or_else(|| GlyphFxError::render("no font face registered"))
    }
}

impl GlyphRasterizer for ParleyRasterizer {
    #[tracing::instrument(level = "debug", skip(self, style), fields(size = style.font_size))]
    fn rasterize(&self, text: &str, style: &TextStyle) -> GlyphFxResult<GlyphMask> {
        style.validate()?;
        if text.is_empty() {
            return Ok(GlyphMask::empty());
        }
        let face = self.face(style.family)?;

        let layout = {
            let mut guard = self
                .state
                .lock()
                .map_err(|_| GlyphFxError::render("text layout state poisoned"))?;
            let ParleyState {
                font_ctx,
                layout_ctx,
            } = &mut *guard;
            let mut builder = layout_ctx.ranged_builder(font_ctx, text, 1.0, true);
            builder.push_default(parley::style::StyleProperty::FontStack(
                parley::style::FontStack::Source(std::borrow::Cow::Owned(
                    face.family_name.clone(),
                )),
            ));
            builder.push_default(parley::style::StyleProperty::FontSize(style.font_size));
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::new(f32::from(style.weight)),
            ));
            builder.push_default(parley::style::StyleProperty::LetterSpacing(
                style.letter_spacing,
            ));
            let mut layout: parley::Layout<()> = builder.build(text);
            layout.break_all_lines(None);
            layout
        };

        let width = layout.width().ceil();
        let height = layout.height().ceil();
        if width < 1.0 || height < 1.0 {
            return Ok(GlyphMask::empty());
        }
        let w = mask_side(width, "width")?;
        let h = mask_side(height, "height")?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        let mut baseline = None;
        for line in layout.lines() {
            let metrics = line.metrics();
            baseline.get_or_insert(metrics.baseline);
            let shift = (width - metrics.advance).max(0.0) * style.align.factor();
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x + shift,
                    y: g.y,
                });
                ctx.glyph_run(&face.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let alpha = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();
        GlyphMask::new(
            u32::from(w),
            u32::from(h),
            baseline.unwrap_or(style.font_size),
            alpha,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/raster.rs"]
mod tests;
