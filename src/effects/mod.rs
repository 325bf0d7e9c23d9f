//! The eleven text effects.
//!
//! Each variant renders a [`GlyphMask`] into premultiplied pixels as a pure function of the frame
//! time and the injected random stream. The output is at least as large as the mask; variants that
//! draw halos, extrusions or jitter pad the mask first and report where the glyphs landed through
//! [`EffectFrame::origin`].

use std::fmt;
use std::str::FromStr;

use crate::animation::rng::{RandomSource, Rng64};
use crate::compositor::buffer::PixelBuffer;
use crate::compositor::composite::composite_with_fill;
use crate::compositor::fill::FillSource;
use crate::compositor::mask::{GlyphMask, MaskKey, TextStyle};
use crate::foundation::core::{Color, Vec2};
use crate::foundation::error::{GlyphFxError, GlyphFxResult};

/// Chromatic aberration.
pub mod chromatic;
/// Circuit board traces with travelling packets.
pub mod circuit;
/// Blurred flame layers.
pub mod fire;
/// RGB split and slice glitch.
pub mod glitch;
/// Scrolling mirrored gradient.
pub mod gradient_flow;
/// Rising water level with bubbles.
pub mod liquid;
/// Angled metal gradient.
pub mod metallic;
/// Flickering neon tube.
pub mod neon;
/// Pencil outline reveal.
pub mod sketch;
/// Sweeping light band.
pub mod spotlight;
/// Stacked extrusion.
pub mod three_d;
/// Host-tunable effect parameters.
pub mod tuning;

pub use chromatic::ChromaticEffect;
pub use circuit::CircuitEffect;
pub use fire::FireEffect;
pub use glitch::GlitchEffect;
pub use gradient_flow::GradientFlowEffect;
pub use liquid::LiquidEffect;
pub use metallic::MetallicEffect;
pub use neon::NeonEffect;
pub use sketch::SketchEffect;
pub use spotlight::SpotlightEffect;
pub use three_d::ThreeDEffect;
pub use tuning::EffectTuning;

/// Effect variants in schedule order: `EffectKind::from_index(i)` is the variant of word `i`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EffectKind {
    /// Wave-filled glyphs with rising bubbles.
    Liquid = 0,
    /// Flickering glow tube.
    Neon = 1,
    /// Blurred flame layers under a hot core.
    Fire = 2,
    /// Extruded glyphs.
    ThreeD = 3,
    /// Circuit traces over a dark panel.
    Circuit = 4,
    /// RGB split, jitter and slice glitches.
    Glitch = 5,
    /// Specular metal gradient.
    Metallic = 6,
    /// Light band sweeping over dim glyphs.
    Spotlight = 7,
    /// Lens aberration colour fringes.
    Chromatic = 8,
    /// Hand-drawn outline reveal.
    Sketch = 9,
    /// Scrolling mirrored gradient.
    GradientFlow = 10,
}

impl EffectKind {
    /// Every variant in index order.
    pub const ALL: [EffectKind; 11] = [
        Self::Liquid,
        Self::Neon,
        Self::Fire,
        Self::ThreeD,
        Self::Circuit,
        Self::Glitch,
        Self::Metallic,
        Self::Spotlight,
        Self::Chromatic,
        Self::Sketch,
        Self::GradientFlow,
    ];

    /// Number of variants.
    pub const COUNT: usize = Self::ALL.len();

    /// Variant for schedule position `i` (`i mod 11`).
    pub const fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::COUNT]
    }

    /// Index in `0..11`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Liquid => "liquid",
            Self::Neon => "neon",
            Self::Fire => "fire",
            Self::ThreeD => "three_d",
            Self::Circuit => "circuit",
            Self::Glitch => "glitch",
            Self::Metallic => "metallic",
            Self::Spotlight => "spotlight",
            Self::Chromatic => "chromatic",
            Self::Sketch => "sketch",
            Self::GradientFlow => "gradient_flow",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = GlyphFxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        if key.is_empty() {
            return Err(GlyphFxError::validation("effect kind must be non-empty"));
        }
        if let Ok(i) = key.parse::<usize>() {
            return Self::ALL
                .get(i)
                .copied()
                .ok_or_else(|| GlyphFxError::validation(format!("effect index {i} out of range")));
        }
        let alias = match key.as_str() {
            "3d" | "threed" => "three_d",
            "gradientflow" | "gradient" => "gradient_flow",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|k| k.name() == alias)
            .ok_or_else(|| GlyphFxError::validation(format!("unknown effect kind '{s}'")))
    }
}

/// Colour family shared by palette-driven variants: `(i / 11) mod 3`.
pub fn palette_index(position: u64) -> usize {
    ((position / EffectKind::COUNT as u64) % 3) as usize
}

/// What to render for one word. Rebuilt whenever text or style changes.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectSpec {
    /// Text to draw.
    pub text: String,
    /// Text style.
    pub style: TextStyle,
    /// Variant.
    pub kind: EffectKind,
    /// Seed for per-instance colour choices and layouts; the schedule position in the demo.
    pub variant_seed: u64,
}

impl EffectSpec {
    /// Spec for `text` drawn with `kind`.
    pub fn new(
        text: impl Into<String>,
        style: TextStyle,
        kind: EffectKind,
        variant_seed: u64,
    ) -> Self {
        Self {
            text: text.into(),
            style,
            kind,
            variant_seed,
        }
    }

    /// Mask cache key of this spec.
    pub fn mask_key(&self) -> MaskKey {
        MaskKey::new(&self.text, &self.style)
    }
}

/// Per-frame input shared by all variants.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameCtx {
    /// Milliseconds since the effect instance was mounted.
    pub elapsed_ms: f64,
}

impl FrameCtx {
    /// Frame at `elapsed_ms`.
    pub fn at(elapsed_ms: f64) -> Self {
        Self { elapsed_ms }
    }
}

/// Rendered effect output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectFrame {
    /// Premultiplied pixels.
    pub pixels: PixelBuffer,
    /// Position of the mask's top-left corner inside `pixels`.
    pub origin: Vec2,
}

impl EffectFrame {
    /// Frame whose glyphs start at the buffer origin.
    pub fn unpadded(pixels: PixelBuffer) -> Self {
        Self {
            pixels,
            origin: Vec2::ZERO,
        }
    }

    /// Empty output for empty text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when nothing was drawn into a non-empty area.
    pub fn is_blank(&self) -> bool {
        self.pixels.is_fully_transparent()
    }
}

/// A renderable text effect.
pub trait TextEffect: Send + Sync {
    /// Variant tag.
    fn kind(&self) -> EffectKind;

    /// Render `mask` at `frame`, drawing per-frame randomness from `rng`.
    ///
    /// An empty mask produces [`EffectFrame::empty`].
    fn render(
        &self,
        mask: &GlyphMask,
        frame: FrameCtx,
        rng: &mut dyn RandomSource,
    ) -> GlyphFxResult<EffectFrame>;
}

/// Closed set of effect instances, dispatched through [`TextEffect`].
#[derive(Clone, Debug)]
pub enum Effect {
    /// See [`LiquidEffect`].
    Liquid(LiquidEffect),
    /// See [`NeonEffect`].
    Neon(NeonEffect),
    /// See [`FireEffect`].
    Fire(FireEffect),
    /// See [`ThreeDEffect`].
    ThreeD(ThreeDEffect),
    /// See [`CircuitEffect`].
    Circuit(CircuitEffect),
    /// See [`GlitchEffect`].
    Glitch(GlitchEffect),
    /// See [`MetallicEffect`].
    Metallic(MetallicEffect),
    /// See [`SpotlightEffect`].
    Spotlight(SpotlightEffect),
    /// See [`ChromaticEffect`].
    Chromatic(ChromaticEffect),
    /// See [`SketchEffect`].
    Sketch(SketchEffect),
    /// See [`GradientFlowEffect`].
    GradientFlow(GradientFlowEffect),
}

/// Neon tube colours.
pub const NEON_PALETTE: [Color; 4] = [
    Color::from_argb32(0xFFD500F9),
    Color::from_argb32(0xFF2962FF),
    Color::from_argb32(0xFFFF0048),
    Color::from_argb32(0xFF0091EA),
];

/// Extrusion face colours.
pub const THREE_D_PALETTE: [Color; 4] = [
    Color::from_argb32(0xFF2E86C1),
    Color::from_argb32(0xFFE74C3C),
    Color::from_argb32(0xFF8E44AD),
    Color::from_argb32(0xFF27AE60),
];

/// Gold, silver and bronze.
pub const METAL_PALETTE: [Color; 3] = [
    Color::from_argb32(0xFFFFD700),
    Color::from_argb32(0xFFC0C0C0),
    Color::from_argb32(0xFFCD7F32),
];

/// Colour picked from `palette` by a generator seeded with `seed`.
pub fn seeded_pick(palette: &[Color], seed: u64) -> Color {
    if palette.is_empty() {
        return Color::TRANSPARENT;
    }
    let mut rng = Rng64::new(seed);
    palette[rng.index(palette.len())]
}

impl Effect {
    /// Instantiate the variant named by `spec`.
    ///
    /// Colour choices derive from `spec.variant_seed` so the same spec always looks the same.
    pub fn from_spec(spec: &EffectSpec, tuning: &EffectTuning) -> GlyphFxResult<Self> {
        let seed = spec.variant_seed;
        Ok(match spec.kind {
            EffectKind::Liquid => Self::Liquid(LiquidEffect::new(tuning.liquid_wave_ms, seed)?),
            EffectKind::Neon => Self::Neon(NeonEffect::new(
                seeded_pick(&NEON_PALETTE, seed),
                tuning.neon_flicker_speed,
            )),
            EffectKind::Fire => Self::Fire(FireEffect::new(tuning.fire_rise_ms)?),
            EffectKind::ThreeD => Self::ThreeD(ThreeDEffect::new(
                seeded_pick(&THREE_D_PALETTE, seed),
                tuning.three_d_depth,
                tuning.three_d_angle_deg,
            )),
            EffectKind::Circuit => {
                Self::Circuit(CircuitEffect::new(tuning.circuit_packet_ms, seed)?)
            }
            EffectKind::Glitch => Self::Glitch(GlitchEffect {
                base: tuning.glitch_base,
                split_a: tuning.glitch_split_a,
                split_b: tuning.glitch_split_b,
                intensity: tuning.glitch_intensity,
            }),
            EffectKind::Metallic => Self::Metallic(MetallicEffect::new(
                METAL_PALETTE[palette_index(seed)],
                tuning.metallic_angle_deg,
            )),
            EffectKind::Spotlight => {
                Self::Spotlight(SpotlightEffect::new(tuning.spotlight_sweep_ms)?)
            }
            EffectKind::Chromatic => {
                Self::Chromatic(ChromaticEffect::new(tuning.chromatic_jitter_ms)?)
            }
            EffectKind::Sketch => {
                Self::Sketch(SketchEffect::new(&spec.text, tuning.sketch_reveal_ms)?)
            }
            EffectKind::GradientFlow => {
                Self::GradientFlow(GradientFlowEffect::new(tuning.gradient_flow_ms)?)
            }
        })
    }

    fn inner(&self) -> &dyn TextEffect {
        match self {
            Self::Liquid(e) => e,
            Self::Neon(e) => e,
            Self::Fire(e) => e,
            Self::ThreeD(e) => e,
            Self::Circuit(e) => e,
            Self::Glitch(e) => e,
            Self::Metallic(e) => e,
            Self::Spotlight(e) => e,
            Self::Chromatic(e) => e,
            Self::Sketch(e) => e,
            Self::GradientFlow(e) => e,
        }
    }
}

impl TextEffect for Effect {
    fn kind(&self) -> EffectKind {
        self.inner().kind()
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(kind = %self.kind(), elapsed_ms = frame.elapsed_ms)
    )]
    fn render(
        &self,
        mask: &GlyphMask,
        frame: FrameCtx,
        rng: &mut dyn RandomSource,
    ) -> GlyphFxResult<EffectFrame> {
        if mask.is_empty() {
            return Ok(EffectFrame::empty());
        }
        self.inner().render(mask, frame, rng)
    }
}

/// Glyphs of `mask` in one flat colour.
pub(crate) fn solid_glyphs(mask: &GlyphMask, color: Color) -> PixelBuffer {
    composite_with_fill(mask, &FillSource::Solid(color))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/mod.rs"]
mod tests;
