use crate::compositor::buffer::PixelBuffer;
use crate::compositor::fill::{FillSource, GradientStops, RadialGradient, TileMode};
use crate::effects::EffectKind;
use crate::foundation::core::{Canvas, Color};

/// Full-canvas backdrop behind a stage.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Background {
    /// One flat colour.
    Solid {
        /// Fill colour.
        color: Color,
    },
    /// Radial gradient centred on the canvas.
    Radial {
        /// Colour at the centre.
        inner: Color,
        /// Colour at `radius` and beyond.
        outer: Color,
        /// Gradient radius; `None` uses half the shorter canvas side.
        radius: Option<f64>,
    },
}

impl Background {
    /// Radial backdrop with the default radius.
    pub const fn radial(inner: u32, outer: u32) -> Self {
        Self::Radial {
            inner: Color::from_argb32(inner),
            outer: Color::from_argb32(outer),
            radius: None,
        }
    }

    /// Paint the backdrop over a whole canvas.
    pub fn render(&self, canvas: Canvas) -> PixelBuffer {
        match *self {
            Self::Solid { color } => PixelBuffer::filled(canvas.width, canvas.height, color),
            Self::Radial {
                inner,
                outer,
                radius,
            } => {
                let radius = radius
                    .unwrap_or_else(|| f64::from(canvas.width.min(canvas.height)) / 2.0);
                FillSource::Radial(RadialGradient {
                    center: canvas.center(),
                    radius,
                    stops: GradientStops::even(&[inner, outer]),
                    tile: TileMode::Clamp,
                })
                .render(canvas.width, canvas.height)
            }
        }
    }
}

/// Backdrop plus the status-bar contrast hint sent to the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    /// What to paint behind the content.
    pub background: Background,
    /// `true` asks the host for dark icons on light chrome.
    pub prefer_light_chrome: bool,
}

impl Theme {
    const fn light(background: Background) -> Self {
        Self {
            background,
            prefer_light_chrome: true,
        }
    }
}

/// Spotlight needs darkness to read, so it is the one dark entry.
const SPOTLIGHT_THEME: Theme = Theme {
    background: Background::Radial {
        inner: Color::from_argb32(0xFF212121),
        outer: Color::from_argb32(0xFF000000),
        radius: Some(1800.0),
    },
    prefer_light_chrome: false,
};

/// Theme shown behind a word drawn with `kind`.
pub fn theme_for(kind: EffectKind) -> Theme {
    match kind {
        EffectKind::Spotlight => SPOTLIGHT_THEME,
        EffectKind::Liquid => Theme::light(Background::radial(0xFFFFFFFF, 0xFFCFD8DC)),
        EffectKind::Neon => Theme::light(Background::radial(0xFFFFFFFF, 0xFFF3E5F5)),
        EffectKind::Fire => Theme::light(Background::radial(0xFFFFFDE7, 0xFFFFE0B2)),
        EffectKind::ThreeD => Theme::light(Background::radial(0xFFFFFFFF, 0xFFECEFF1)),
        EffectKind::Circuit => Theme::light(Background::radial(0xFFFFFFFF, 0xFFE3F2FD)),
        EffectKind::Glitch => Theme::light(Background::radial(0xFFFAFAFA, 0xFFE0F2F1)),
        EffectKind::Metallic => Theme::light(Background::radial(0xFFFFFFFF, 0xFFE0F7FA)),
        EffectKind::Chromatic => Theme::light(Background::radial(0xFFFFFFFF, 0xFFFAFAFA)),
        EffectKind::Sketch => Theme::light(Background::radial(0xFFFFFFFF, 0xFFFFFDE7)),
        EffectKind::GradientFlow => Theme::light(Background::radial(0xFFFFFFFF, 0xFFF3E5F5)),
    }
}

/// Theme behind the intro title.
pub fn intro_theme() -> Theme {
    Theme::light(Background::radial(0xFFFFFFFF, 0xFFE8EAED))
}

/// Theme behind the outro title.
pub fn outro_theme() -> Theme {
    Theme::light(Background::Solid {
        color: Color::from_argb32(0xFFF2F4F7),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/demo/theme.rs"]
mod tests;
