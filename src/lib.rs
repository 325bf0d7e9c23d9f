//! Procedural text effects on the CPU.
//!
//! Text is rasterized once into a [`GlyphMask`], then painted by one of eleven effects
//! ([`Effect`]) as a pure function of elapsed time and an injected random stream. Holographic
//! titles and the touch distortion run through a [`ShaderBridge`] that falls back to flat colours
//! on hosts without shader support. The [`demo`] module strings it together into a scripted
//! Intro -> Loop -> Outro sequence.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Phase clocks, easing curves and injectable randomness.
pub mod animation;
/// Glyph masks, pixel buffers, fills and the mask cache.
pub mod compositor;
pub mod demo;
pub mod effects;
/// Shared value types and the error enum.
pub mod foundation;
/// Fragment programs, uniforms and the host shader bridge.
pub mod shader;

pub use animation::clock::{LoopMode, Phase, PhaseClock, PhaseDomain};
pub use animation::ease::Ease;
pub use animation::rng::{EntropyRng, RandomSource, Rng64, SequenceRng};
pub use compositor::buffer::PixelBuffer;
pub use compositor::cache::MaskCache;
pub use compositor::composite::composite_with_fill;
pub use compositor::fill::FillSource;
pub use compositor::mask::{FontFamilyKind, GlyphMask, TextAlign, TextStyle};
pub use compositor::raster::{BlockRasterizer, FontSet, GlyphRasterizer, ParleyRasterizer};
pub use demo::{DemoConfig, DemoPlayer, DemoSchedule, DemoStage, HostEvent};
pub use effects::{
    Effect, EffectFrame, EffectKind, EffectSpec, EffectTuning, FrameCtx, TextEffect,
};
pub use foundation::core::{Canvas, Color, Insets};
pub use foundation::error::{GlyphFxError, GlyphFxResult};
pub use shader::bridge::{FragmentProgram, HostCaps, ShaderBridge, ShaderHandle};
pub use shader::distortion::DistortionOverlay;
pub use shader::holographic::{HoloParams, HolographicBrush};
