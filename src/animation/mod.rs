/// Pure elapsed-time to phase mapping.
pub mod clock;
/// Easing curves.
pub mod ease;
/// Random sources for per-frame jitter.
pub mod rng;
