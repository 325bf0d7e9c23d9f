/// Injected randomness for per-tick jitter and seeded layouts.
///
/// Effects never reach for ambient randomness: production code passes an [`EntropyRng`], seeded
/// layouts use [`Rng64`], and tests substitute a [`SequenceRng`] to pin exact frame outputs.
pub trait RandomSource: Send {
    /// Next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Uniform float in `[0, 1)`.
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) * (1.0 / ((1u64 << 24) as f32))
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniform float in `[lo, hi)`.
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Uniform integer in `[lo, hi)`. Returns `lo` when the range is empty.
    fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo) as f32;
        let step = (self.next_f32() * span).floor() as i32;
        lo + step.min(hi - lo - 1)
    }

    /// Uniform index into a slice of length `len`. Returns 0 for `len == 0`.
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }
}

/// SplitMix64 generator for reproducible seeded layouts (circuit traces, bubbles, sketch jitter).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Seeded generator.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for Rng64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// Entropy-seeded generator for live flicker and glitch draws.
#[derive(Clone, Debug)]
pub struct EntropyRng(fastrand::Rng);

impl EntropyRng {
    /// Generator seeded from the OS.
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRng {
    fn next_u64(&mut self) -> u64 {
        self.0.u64(..)
    }

    fn next_f32(&mut self) -> f32 {
        self.0.f32()
    }
}

/// Fixed cyclic sequence of floats in `[0, 1)`. Intended for tests.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    /// Cycle through `values` (each clamped into `[0, 1)`). An empty list yields zeros.
    pub fn from_floats(values: impl Into<Vec<f32>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 0.999_999))
            .collect();
        Self { values, cursor: 0 }
    }

    /// How many values have been drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_u64(&mut self) -> u64 {
        let f = self.next_f32();
        ((f as f64) * ((1u64 << 53) as f64)) as u64 * (1 << 11)
    }

    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/rng.rs"]
mod tests;
