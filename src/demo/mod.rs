//! Scripted "thank you" demo: a title card, thirty words each drawn with a different effect, and
//! a closing card.
//!
//! Everything that decides what is shown when ([`schedule`], [`theme`], [`orchestrator`],
//! [`transitions`]) is a pure function of position and elapsed time. [`player`] turns those
//! decisions into pixels.

/// JSON-loadable demo settings.
pub mod config;
/// Stage state machine.
pub mod orchestrator;
/// Frame rendering and host events.
pub mod player;
/// Per-word effect, style and direction selection.
pub mod schedule;
/// Background and chrome per stage.
pub mod theme;
/// Enter and exit placement over time.
pub mod transitions;

pub use config::{DemoConfig, TitleConfig};
pub use orchestrator::{DemoStage, Orchestrator, StageTimings, Tick, stage_at, word_index_at};
pub use player::{DemoPlayer, HostEvent};
pub use schedule::{DEFAULT_WORDS, DemoSchedule, SlideDirection, WordSelection, select};
pub use theme::{Background, Theme, theme_for};
pub use transitions::{LayerVisual, TransitionState};
