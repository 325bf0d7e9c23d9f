//! Intro -> Loop -> Outro state machine.
//!
//! Stage and word are pure functions of elapsed time ([`stage_at`], [`word_index_at`]). The
//! [`Orchestrator`] wraps them with a monotonic clock so callers can feed frame deltas and learn
//! what changed since the previous tick.

use std::fmt;

use crate::foundation::error::{GlyphFxError, GlyphFxResult};

/// Demo stage. `Outro` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoStage {
    /// Title card.
    Intro,
    /// One word after another.
    Loop,
    /// Closing card; never left.
    Outro,
}

impl fmt::Display for DemoStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Intro => "intro",
            Self::Loop => "loop",
            Self::Outro => "outro",
        })
    }
}

/// Stage and transition durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StageTimings {
    /// Intro hold before the loop starts.
    pub intro_ms: f64,
    /// Hold per word.
    pub word_ms: f64,
    /// Pause after the last word before the outro.
    pub outro_tail_ms: f64,
    /// Cross-word fade and slide.
    pub word_transition_ms: f64,
    /// Intro -> Loop fade and scale.
    pub intro_transition_ms: f64,
    /// Loop -> Outro fade and slide.
    pub outro_transition_ms: f64,
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            intro_ms: 3000.0,
            word_ms: 2000.0,
            outro_tail_ms: 500.0,
            word_transition_ms: 800.0,
            intro_transition_ms: 1000.0,
            outro_transition_ms: 800.0,
        }
    }
}

impl StageTimings {
    /// Reject negative, non-finite or zero-length holds.
    pub fn validate(&self) -> GlyphFxResult<()> {
        let all = [
            ("intro_ms", self.intro_ms),
            ("word_ms", self.word_ms),
            ("outro_tail_ms", self.outro_tail_ms),
            ("word_transition_ms", self.word_transition_ms),
            ("intro_transition_ms", self.intro_transition_ms),
            ("outro_transition_ms", self.outro_transition_ms),
        ];
        for (name, v) in all {
            if !v.is_finite() || v < 0.0 {
                return Err(GlyphFxError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if self.word_ms <= 0.0 {
            return Err(GlyphFxError::validation("word_ms must be > 0"));
        }
        Ok(())
    }

    /// When the loop begins.
    pub fn loop_start_ms(&self) -> f64 {
        self.intro_ms
    }

    /// When word `position` becomes current.
    pub fn word_start_ms(&self, position: usize) -> f64 {
        self.intro_ms + position as f64 * self.word_ms
    }

    /// When the outro begins for a schedule of `word_count` words.
    pub fn outro_start_ms(&self, word_count: usize) -> f64 {
        self.word_start_ms(word_count) + self.outro_tail_ms
    }
}

/// Stage at `elapsed_ms` since the demo started.
pub fn stage_at(timings: &StageTimings, word_count: usize, elapsed_ms: f64) -> DemoStage {
    if elapsed_ms >= timings.outro_start_ms(word_count) {
        DemoStage::Outro
    } else if elapsed_ms >= timings.loop_start_ms() {
        DemoStage::Loop
    } else {
        DemoStage::Intro
    }
}

/// Current word at `elapsed_ms`, if the loop is showing one.
///
/// The last word stays current through the tail pause.
pub fn word_index_at(timings: &StageTimings, word_count: usize, elapsed_ms: f64) -> Option<usize> {
    if word_count == 0 || stage_at(timings, word_count, elapsed_ms) != DemoStage::Loop {
        return None;
    }
    let into_loop = (elapsed_ms - timings.loop_start_ms()).max(0.0);
    let index = (into_loop / timings.word_ms).floor() as usize;
    Some(index.min(word_count - 1))
}

/// What one [`Orchestrator::advance`] call observed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Elapsed time after the advance.
    pub elapsed_ms: f64,
    /// Stage after the advance.
    pub stage: DemoStage,
    /// Current word after the advance.
    pub word: Option<usize>,
    /// Stage before the advance, when it differs.
    pub left_stage: Option<DemoStage>,
    /// `true` when `word` differs from the previous tick.
    pub word_changed: bool,
}

/// Monotonic driver over [`stage_at`].
#[derive(Clone, Debug)]
pub struct Orchestrator {
    timings: StageTimings,
    word_count: usize,
    elapsed_ms: f64,
    stage: DemoStage,
    word: Option<usize>,
}

impl Orchestrator {
    /// Fresh machine in `Intro` at time zero.
    pub fn new(timings: StageTimings, word_count: usize) -> GlyphFxResult<Self> {
        timings.validate()?;
        Ok(Self {
            timings,
            word_count,
            elapsed_ms: 0.0,
            stage: stage_at(&timings, word_count, 0.0),
            word: word_index_at(&timings, word_count, 0.0),
        })
    }

    /// Durations in use.
    pub fn timings(&self) -> &StageTimings {
        &self.timings
    }

    /// Number of scheduled words.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Time consumed so far.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Current stage.
    pub fn stage(&self) -> DemoStage {
        self.stage
    }

    /// Current word.
    pub fn word(&self) -> Option<usize> {
        self.word
    }

    /// Milliseconds since the current stage was entered.
    pub fn stage_elapsed_ms(&self) -> f64 {
        let start = match self.stage {
            DemoStage::Intro => 0.0,
            DemoStage::Loop => self.timings.loop_start_ms(),
            DemoStage::Outro => self.timings.outro_start_ms(self.word_count),
        };
        (self.elapsed_ms - start).max(0.0)
    }

    /// Advance by a frame delta. Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, delta_ms: f64) -> Tick {
        let delta = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };
        self.advance_to(self.elapsed_ms + delta)
    }

    /// Advance to an absolute time. Earlier times leave the machine where it is.
    pub fn advance_to(&mut self, elapsed_ms: f64) -> Tick {
        if elapsed_ms.is_finite() && elapsed_ms > self.elapsed_ms {
            self.elapsed_ms = elapsed_ms;
        }
        let previous_stage = self.stage;
        let previous_word = self.word;
        // Outro is terminal even if the timings were to say otherwise.
        self.stage = if previous_stage == DemoStage::Outro {
            DemoStage::Outro
        } else {
            stage_at(&self.timings, self.word_count, self.elapsed_ms)
        };
        self.word = word_index_at(&self.timings, self.word_count, self.elapsed_ms);
        if self.stage != previous_stage {
            tracing::info!(
                from = %previous_stage,
                to = %self.stage,
                elapsed_ms = self.elapsed_ms,
                "stage changed"
            );
        }
        Tick {
            elapsed_ms: self.elapsed_ms,
            stage: self.stage,
            word: self.word,
            left_stage: (self.stage != previous_stage).then_some(previous_stage),
            word_changed: self.word != previous_word,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/demo/orchestrator.rs"]
mod tests;
