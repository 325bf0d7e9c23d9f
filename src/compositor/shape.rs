use kurbo::Shape;

use crate::compositor::buffer::PixelBuffer;
use crate::foundation::core::{BezPath, Color, Point, Rect};
use crate::foundation::error::{GlyphFxError, GlyphFxResult};

/// Anti-aliased vector painter backed by a `vello_cpu` render context.
///
/// Effects use it for the parts that are geometry rather than glyph coverage: circuit traces,
/// water surfaces, bubbles and glow discs.
pub struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl std::fmt::Debug for Painter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Painter")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Painter {
    /// Transparent painter of `width x height` pixels.
    pub fn new(width: u32, height: u32) -> GlyphFxResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| GlyphFxError::render("painter width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| GlyphFxError::render("painter height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(GlyphFxError::render("painter must be at least 1x1"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
        })
    }

    fn set_color(&mut self, color: Color) {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            q(color.r),
            q(color.g),
            q(color.b),
            q(color.a),
        ));
    }

    /// Fill a closed path (non-zero winding).
    pub fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.set_color(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_color(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    /// Fill a disc.
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let path = kurbo::Circle::new(center, radius).to_path(0.1);
        self.fill_path(&path, color);
    }

    /// Stroke `path` with round caps and joins.
    pub fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color) {
        if width <= 0.0 {
            return;
        }
        let style = kurbo::Stroke::new(width)
            .with_caps(kurbo::Cap::Round)
            .with_join(kurbo::Join::Round);
        let outline = kurbo::stroke(path.iter(), &style, &kurbo::StrokeOpts::default(), 0.1);
        self.fill_path(&outline, color);
    }

    /// Stroke a straight segment.
    pub fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.stroke_path(&path, width, color);
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> PixelBuffer {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        PixelBuffer::from_pixmap(&pixmap)
    }
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/shape.rs"]
mod tests;
