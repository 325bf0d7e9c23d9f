use std::path::Path;

use crate::compositor::mask::{FontFamilyKind, TextAlign, TextStyle};
use crate::demo::orchestrator::StageTimings;
use crate::demo::schedule::{DEFAULT_WORDS, DemoSchedule};
use crate::effects::EffectTuning;
use crate::foundation::core::{Canvas, Color};
use crate::foundation::error::{GlyphFxError, GlyphFxResult};
use crate::shader::bridge::HostCaps;
use crate::shader::holographic::HoloParams;

/// A holographic title card.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Title text.
    pub text: String,
    /// Title style.
    pub style: TextStyle,
    /// Brush parameters.
    pub holo: HoloParams,
}

impl TitleConfig {
    /// The "10,000" intro card.
    pub fn intro() -> Self {
        Self {
            text: "10,000".to_owned(),
            style: TextStyle {
                font_size: 110.0,
                family: FontFamilyKind::SansSerif,
                weight: 900,
                letter_spacing: -4.0,
                align: TextAlign::Center,
            },
            holo: HoloParams {
                speed: 0.7,
                base_color: Color::from_argb32(0xFF2C3E50),
                intensity: 1.0,
                beam_width: 100.0,
                ..HoloParams::default()
            },
        }
    }

    /// The "More will come" outro card.
    pub fn outro() -> Self {
        Self {
            text: "More will come".to_owned(),
            style: TextStyle {
                font_size: 55.0,
                family: FontFamilyKind::SansSerif,
                weight: 800,
                letter_spacing: 0.0,
                align: TextAlign::Center,
            },
            holo: HoloParams {
                speed: 0.3,
                base_color: Color::from_argb32(0xFF0077B5),
                intensity: 1.0,
                beam_width: 80.0,
                ..HoloParams::default()
            },
        }
    }
}

fn default_intro() -> TitleConfig {
    TitleConfig::intro()
}

fn default_outro() -> TitleConfig {
    TitleConfig::outro()
}

/// Everything a host can tune about the demo. Missing JSON fields keep their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Stage and transition durations.
    pub timings: StageTimings,
    /// Words in playback order.
    pub words: Vec<String>,
    /// Intro card.
    #[serde(default = "default_intro")]
    pub intro: TitleConfig,
    /// Outro card.
    #[serde(default = "default_outro")]
    pub outro: TitleConfig,
    /// Host shader support and handle budget.
    pub host: HostCaps,
    /// Distinct `(text, style)` masks kept at once.
    pub mask_cache_entries: usize,
    /// Per-effect parameters.
    pub tuning: EffectTuning,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 720,
                height: 1280,
            },
            timings: StageTimings::default(),
            words: DEFAULT_WORDS.iter().map(|w| (*w).to_owned()).collect(),
            intro: TitleConfig::intro(),
            outro: TitleConfig::outro(),
            host: HostCaps::default(),
            mask_cache_entries: 64,
            tuning: EffectTuning::default(),
        }
    }
}

impl DemoConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> GlyphFxResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| GlyphFxError::serde(format!("demo config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> GlyphFxResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            GlyphFxError::Other(anyhow::anyhow!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> GlyphFxResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GlyphFxError::serde(e.to_string()))
    }

    /// Check every section.
    pub fn validate(&self) -> GlyphFxResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        self.timings.validate()?;
        self.intro.style.validate()?;
        self.outro.style.validate()?;
        self.tuning.validate()?;
        // The outro title can mount while two words are still on screen.
        if self.mask_cache_entries < 3 {
            return Err(GlyphFxError::validation("mask_cache_entries must be >= 3"));
        }
        Ok(())
    }

    /// Deterministic schedule over the configured words.
    pub fn schedule(&self) -> DemoSchedule {
        DemoSchedule::new(&self.words)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/demo/config.rs"]
mod tests;
