use crate::animation::ease::Ease;
use crate::demo::schedule::SlideDirection;
use crate::foundation::core::{Affine, Canvas, Vec2};

/// How one full-canvas layer is placed while a transition runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerVisual {
    /// Translation in pixels.
    pub offset: Vec2,
    /// Uniform scale about the canvas centre.
    pub scale: f64,
    /// Layer opacity.
    pub opacity: f32,
}

impl LayerVisual {
    /// Layer drawn as-is.
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
        opacity: 1.0,
    };

    /// Fully faded out.
    pub const HIDDEN: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
        opacity: 0.0,
    };

    /// `true` when drawing the layer changes nothing.
    pub fn is_hidden(&self) -> bool {
        self.opacity <= 0.0
    }

    /// Canvas-space transform: scale about the centre, then translate.
    pub fn transform(&self, canvas: Canvas) -> Affine {
        let c = canvas.center().to_vec2();
        Affine::translate(self.offset + c) * Affine::scale(self.scale) * Affine::translate(-c)
    }
}

/// Incoming and outgoing layer placement at one instant of a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionState {
    /// Linear progress in `[0, 1]`.
    pub progress: f32,
    /// Placement of the content being shown.
    pub entering: LayerVisual,
    /// Placement of the content being replaced.
    pub exiting: LayerVisual,
}

fn progress(elapsed_ms: f64, duration_ms: f64) -> f32 {
    if duration_ms.is_nan() || duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0) as f32
}

fn lerp(a: f64, b: f64, t: f32) -> f64 {
    let t = f64::from(t);
    a * (1.0 - t) + b * t
}

fn slide_span(direction: Vec2, canvas: Canvas) -> Vec2 {
    Vec2::new(
        direction.x * f64::from(canvas.width),
        direction.y * f64::from(canvas.height),
    )
}

impl TransitionState {
    /// Nothing in flight.
    pub const SETTLED: Self = Self {
        progress: 1.0,
        entering: LayerVisual::IDENTITY,
        exiting: LayerVisual::HIDDEN,
    };

    /// `true` once the outgoing layer no longer shows.
    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Word change: linear cross-fade with the incoming word sliding in from one edge and the
    /// outgoing word sliding out through the opposite one, each by a full canvas span.
    pub fn word(
        direction: SlideDirection,
        canvas: Canvas,
        elapsed_ms: f64,
        duration_ms: f64,
    ) -> Self {
        let t = progress(elapsed_ms, duration_ms);
        let slide = Ease::FastOutSlowIn.apply(t);
        let enter_from = slide_span(direction.enter_from(), canvas);
        let exit_to = slide_span(direction.exit_to(), canvas);
        Self {
            progress: t,
            entering: LayerVisual {
                offset: enter_from * f64::from(1.0 - slide),
                scale: 1.0,
                opacity: t,
            },
            exiting: LayerVisual {
                offset: exit_to * f64::from(slide),
                scale: 1.0,
                opacity: 1.0 - t,
            },
        }
    }

    /// Intro -> Loop: cross-fade, loop grows from 0.8 while the intro swells to 1.5.
    pub fn intro_to_loop(elapsed_ms: f64, duration_ms: f64) -> Self {
        let t = progress(elapsed_ms, duration_ms);
        Self {
            progress: t,
            entering: LayerVisual {
                offset: Vec2::ZERO,
                scale: lerp(0.8, 1.0, t),
                opacity: t,
            },
            exiting: LayerVisual {
                offset: Vec2::ZERO,
                scale: lerp(1.0, 1.5, t),
                opacity: 1.0 - t,
            },
        }
    }

    /// Loop -> Outro: outro slides up from the bottom edge and fades in; the loop fades out.
    pub fn loop_to_outro(canvas: Canvas, elapsed_ms: f64, duration_ms: f64) -> Self {
        let t = progress(elapsed_ms, duration_ms);
        let slide = Ease::FastOutSlowIn.apply(t);
        Self {
            progress: t,
            entering: LayerVisual {
                offset: Vec2::new(0.0, f64::from(canvas.height) * f64::from(1.0 - slide)),
                scale: 1.0,
                opacity: t,
            },
            exiting: LayerVisual {
                offset: Vec2::ZERO,
                scale: 1.0,
                opacity: 1.0 - t,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/demo/transitions.rs"]
mod tests;
