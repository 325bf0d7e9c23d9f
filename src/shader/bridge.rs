use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::compositor::buffer::PixelBuffer;
use crate::foundation::core::Point;
use crate::foundation::error::{GlyphFxError, GlyphFxResult};
use crate::shader::uniforms::{ShaderUniformSet, UniformDecl, UniformValue};

/// A fragment program the bridge can bind and evaluate per pixel.
///
/// The bridge never looks inside `shade`; it only owns the uniform block and drives evaluation.
pub trait FragmentProgram: Send + Sync + std::fmt::Debug {
    /// Program name for logs.
    fn name(&self) -> &'static str;

    /// Uniforms the program reads.
    fn uniforms(&self) -> Vec<UniformDecl>;

    /// Colour at fragment `frag` (pixel centre), premultiplied, components in `[0, 1]`.
    ///
    /// `content` is the child layer for programs that sample what lies beneath them.
    fn shade(
        &self,
        uniforms: &ShaderUniformSet,
        frag: Point,
        content: Option<&PixelBuffer>,
    ) -> [f32; 4];
}

/// What the host rendering layer can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HostCaps {
    /// Fragment programs can be evaluated.
    pub shaders: bool,
    /// Maximum number of simultaneously bound programs.
    pub max_live_handles: usize,
}

impl Default for HostCaps {
    fn default() -> Self {
        Self {
            shaders: true,
            max_live_handles: 8,
        }
    }
}

/// Binds fragment programs and tracks how many handles are alive.
#[derive(Clone, Debug)]
pub struct ShaderBridge {
    caps: HostCaps,
    live: Arc<AtomicUsize>,
}

impl ShaderBridge {
    /// Bridge for a host with `caps`.
    pub fn new(caps: HostCaps) -> Self {
        Self {
            caps,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Host capabilities this bridge was created with.
    pub fn caps(&self) -> HostCaps {
        self.caps
    }

    /// Handles currently bound.
    pub fn live_handles(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Bind `program` to a fresh, zeroed uniform block.
    ///
    /// Fails with `UnsupportedCapability` when the host cannot run shaders and with
    /// `ResourceExhausted` when the live-handle limit is reached.
    pub fn bind(&self, program: Arc<dyn FragmentProgram>) -> GlyphFxResult<ShaderHandle> {
        if !self.caps.shaders {
            return Err(GlyphFxError::unsupported(format!(
                "host cannot evaluate shader '{}'",
                program.name()
            )));
        }
        let max = self.caps.max_live_handles;
        self.live
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < max).then_some(n + 1)
            })
            .map_err(|n| {
                GlyphFxError::exhausted(format!("shader handle limit reached ({n}/{max})"))
            })?;

        tracing::debug!(program = program.name(), "shader handle bound");
        let uniforms = ShaderUniformSet::new(&program.uniforms());
        Ok(ShaderHandle {
            program,
            uniforms,
            live: Arc::clone(&self.live),
        })
    }
}

/// One bound program instance with its own uniforms. Dropping it releases the slot.
#[derive(Debug)]
pub struct ShaderHandle {
    program: Arc<dyn FragmentProgram>,
    uniforms: ShaderUniformSet,
    live: Arc<AtomicUsize>,
}

impl ShaderHandle {
    /// Write one uniform.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> GlyphFxResult<()> {
        self.uniforms.set(name, value)
    }

    /// Current uniform block.
    pub fn uniforms(&self) -> &ShaderUniformSet {
        &self.uniforms
    }

    /// Run the program over a `width x height` grid.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(program = self.program.name(), width = width, height = height)
    )]
    pub fn evaluate(
        &self,
        width: u32,
        height: u32,
        content: Option<&PixelBuffer>,
    ) -> GlyphFxResult<PixelBuffer> {
        if width == 0 || height == 0 {
            return Ok(PixelBuffer::new(width, height));
        }
        let w = width as usize;
        let len = w
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GlyphFxError::render("shader target size overflow"))?;
        let mut data = vec![0u8; len];
        data.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
            for (x, d) in row.chunks_exact_mut(4).enumerate() {
                let frag = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let c = self.program.shade(&self.uniforms, frag, content);
                let a = to_u8(c[3]);
                d[0] = to_u8(c[0]).min(a);
                d[1] = to_u8(c[1]).min(a);
                d[2] = to_u8(c[2]).min(a);
                d[3] = a;
            }
        });
        PixelBuffer::from_premul_bytes(width, height, data)
    }
}

impl Drop for ShaderHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::AcqRel);
        tracing::debug!(program = self.program.name(), "shader handle released");
    }
}

fn to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/shader/bridge.rs"]
mod tests;
