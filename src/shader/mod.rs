/// Program binding and evaluation.
pub mod bridge;
/// Touch-driven ripple overlay.
pub mod distortion;
/// Holographic title brush.
pub mod holographic;
/// Typed uniform storage.
pub mod uniforms;
