use crate::foundation::error::{GlyphFxError, GlyphFxResult};

/// How a phase behaves once `elapsed` passes the clock duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Sawtooth: jump back to 0 at every multiple of the duration.
    Restart,
    /// Triangle wave with period `2 * duration`.
    Reverse,
    /// Ramp to 1 and hold, reporting completion.
    Once,
}

/// Range the phase value is mapped onto.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseDomain {
    /// `[0, 1]`
    #[default]
    Unit,
    /// `[0, 2π]`
    Radians,
}

/// One sampled phase value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phase {
    /// Phase value in the clock's domain.
    pub value: f32,
    /// `true` once a [`LoopMode::Once`] clock has reached its end. Always `false` for looping
    /// modes.
    pub completed: bool,
}

impl Phase {
    /// Phase value normalized back to `[0, 1]` regardless of domain.
    pub fn unit(self, domain: PhaseDomain) -> f32 {
        match domain {
            PhaseDomain::Unit => self.value,
            PhaseDomain::Radians => self.value / std::f32::consts::TAU,
        }
    }
}

/// Pure mapping from elapsed milliseconds to a phase.
///
/// A clock holds no running state: the same `elapsed_ms` always yields the same [`Phase`], so
/// effect instances can be sampled at arbitrary times in tests without waiting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseClock {
    duration_ms: f64,
    mode: LoopMode,
    domain: PhaseDomain,
}

impl PhaseClock {
    /// Build a unit-domain clock.
    pub fn new(duration_ms: f64, mode: LoopMode) -> GlyphFxResult<Self> {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(GlyphFxError::validation(format!(
                "clock duration must be finite and > 0, got {duration_ms}"
            )));
        }
        Ok(Self {
            duration_ms,
            mode,
            domain: PhaseDomain::Unit,
        })
    }

    /// Same clock mapped onto `domain`.
    pub fn with_domain(mut self, domain: PhaseDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Duration of one ramp in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Loop behaviour.
    pub fn mode(&self) -> LoopMode {
        self.mode
    }

    /// Output domain.
    pub fn domain(&self) -> PhaseDomain {
        self.domain
    }

    /// Time after which the output repeats. `None` for [`LoopMode::Once`].
    pub fn period_ms(&self) -> Option<f64> {
        match self.mode {
            LoopMode::Restart => Some(self.duration_ms),
            LoopMode::Reverse => Some(self.duration_ms * 2.0),
            LoopMode::Once => None,
        }
    }

    /// Sample the phase at `elapsed_ms` since the owning instance mounted.
    ///
    /// Negative or non-finite elapsed times are treated as 0.
    pub fn tick(&self, elapsed_ms: f64) -> Phase {
        let t = if elapsed_ms.is_finite() {
            elapsed_ms.max(0.0)
        } else {
            0.0
        };
        let d = self.duration_ms;

        let (unit, completed) = match self.mode {
            LoopMode::Restart => ((t % d) / d, false),
            LoopMode::Reverse => {
                let u = t % (2.0 * d);
                let v = if u <= d { u / d } else { (2.0 * d - u) / d };
                (v, false)
            }
            LoopMode::Once => {
                if t >= d {
                    (1.0, true)
                } else {
                    (t / d, false)
                }
            }
        };

        let unit = unit.clamp(0.0, 1.0) as f32;
        let value = match self.domain {
            PhaseDomain::Unit => unit,
            PhaseDomain::Radians => unit * std::f32::consts::TAU,
        };
        Phase { value, completed }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
