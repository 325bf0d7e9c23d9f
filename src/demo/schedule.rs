use crate::compositor::mask::{FontFamilyKind, TextAlign, TextStyle};
use crate::demo::theme::{Theme, theme_for};
use crate::effects::{EffectKind, EffectSpec, palette_index};
use crate::foundation::core::Vec2;

/// "Thank you" in thirty languages, in playback order.
pub const DEFAULT_WORDS: [&str; 30] = [
    "Thank You",
    "Gracias",
    "Merci",
    "Danke",
    "شكراً",
    "ありがとう",
    "谢谢",
    "Спасибо",
    "Obrigado",
    "Grazie",
    "Ευχαριστώ",
    "Tack",
    "감사합니다",
    "Dziękuję",
    "Teşekkürler",
    "धन्यवाद",
    "Dank u",
    "Cảm ơn",
    "ขอบคุณ",
    "Terima Kasih",
    "תודה",
    "Salamat",
    "Děkuji",
    "Köszönöm",
    "Mulțumesc",
    "Takk",
    "Kiitos",
    "Tak",
    "Terima Kasih",
    "Дякую",
];

/// Words longer than this many characters use the small font size.
const LONG_WORD_CHARS: usize = 8;
const SMALL_FONT_PX: f32 = 55.0;
const LARGE_FONT_PX: f32 = 75.0;

/// Paired enter/exit slide of a word, chosen by `i mod 4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideDirection {
    /// Enters from the bottom edge, exits through the top.
    FromBottom = 0,
    /// Enters from the top edge, exits through the bottom.
    FromTop = 1,
    /// Enters from the right edge, exits through the left.
    FromRight = 2,
    /// Enters from the left edge, exits through the right.
    FromLeft = 3,
}

impl SlideDirection {
    /// Direction for schedule position `i`.
    pub const fn from_index(i: usize) -> Self {
        match i % 4 {
            0 => Self::FromBottom,
            1 => Self::FromTop,
            2 => Self::FromRight,
            _ => Self::FromLeft,
        }
    }

    /// Index in `0..4`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Unit vector (y down) pointing at the edge the incoming word starts from.
    pub fn enter_from(self) -> Vec2 {
        match self {
            Self::FromBottom => Vec2::new(0.0, 1.0),
            Self::FromTop => Vec2::new(0.0, -1.0),
            Self::FromRight => Vec2::new(1.0, 0.0),
            Self::FromLeft => Vec2::new(-1.0, 0.0),
        }
    }

    /// Unit vector (y down) pointing at the edge the outgoing word leaves through.
    pub fn exit_to(self) -> Vec2 {
        -self.enter_from()
    }
}

/// Style of word `text` drawn with `kind`.
pub fn word_style(text: &str, kind: EffectKind) -> TextStyle {
    let font_size = if text.chars().count() > LONG_WORD_CHARS {
        SMALL_FONT_PX
    } else {
        LARGE_FONT_PX
    };
    let mut style = TextStyle {
        font_size,
        family: FontFamilyKind::SansSerif,
        weight: 900,
        letter_spacing: 1.0,
        align: TextAlign::Center,
    };
    match kind {
        EffectKind::Circuit | EffectKind::Chromatic | EffectKind::GradientFlow => {
            style.weight = 800;
        }
        EffectKind::Glitch => style.family = FontFamilyKind::Monospace,
        EffectKind::Metallic => style.family = FontFamilyKind::Serif,
        EffectKind::Sketch => style.family = FontFamilyKind::Cursive,
        _ => {}
    }
    style
}

/// Everything the demo derives from one schedule position.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WordSelection {
    /// Position in the schedule.
    pub position: usize,
    /// Word drawn at this position.
    pub text: String,
    /// `position mod 11`.
    pub kind: EffectKind,
    /// `(position / 11) mod 3`.
    pub palette: usize,
    /// `position mod 4`.
    pub direction: SlideDirection,
    /// Per-word style.
    pub style: TextStyle,
    /// Background and chrome while the word is shown.
    pub theme: Theme,
}

impl WordSelection {
    /// Effect spec for this word, seeded with its position.
    pub fn spec(&self) -> EffectSpec {
        EffectSpec::new(
            self.text.clone(),
            self.style,
            self.kind,
            self.position as u64,
        )
    }
}

/// Selection for word `text` at schedule position `position`. Pure.
pub fn select(position: usize, text: &str) -> WordSelection {
    let kind = EffectKind::from_index(position);
    WordSelection {
        position,
        text: text.to_owned(),
        kind,
        palette: palette_index(position as u64),
        direction: SlideDirection::from_index(position),
        style: word_style(text, kind),
        theme: theme_for(kind),
    }
}

/// Fixed, index-addressable word sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DemoSchedule {
    words: Vec<WordSelection>,
}

impl DemoSchedule {
    /// Schedule over `words` in order.
    pub fn new<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            words: words
                .iter()
                .enumerate()
                .map(|(i, w)| select(i, w.as_ref()))
                .collect(),
        }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `true` when there are no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Selection at `position`.
    pub fn get(&self, position: usize) -> Option<&WordSelection> {
        self.words.get(position)
    }

    /// All selections in order.
    pub fn words(&self) -> &[WordSelection] {
        &self.words
    }
}

impl Default for DemoSchedule {
    fn default() -> Self {
        Self::new(&DEFAULT_WORDS)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/demo/schedule.rs"]
mod tests;
