//! Frame-driven demo playback.
//!
//! [`DemoPlayer`] owns every per-stage resource: one effect instance per visible word, one
//! holographic brush per visible title, and the glyph masks they draw. Instances are created when
//! their content appears and dropped once their exit transition finishes, which releases shader
//! handles and evicts masks. Rendering failures never stall the schedule; they are reported as
//! [`HostEvent::EffectSkipped`] and the layer keeps its last good frame when the failure is
//! transient. A brush, effect or mask that could not be built is retried on the next frame.

use std::sync::Arc;

use crate::animation::rng::{EntropyRng, RandomSource};
use crate::compositor::buffer::PixelBuffer;
use crate::compositor::cache::MaskCache;
use crate::compositor::mask::GlyphMask;
use crate::compositor::raster::GlyphRasterizer;
use crate::demo::config::{DemoConfig, TitleConfig};
use crate::demo::orchestrator::{DemoStage, Orchestrator, Tick};
use crate::demo::schedule::{DemoSchedule, WordSelection};
use crate::demo::theme::{Theme, intro_theme, outro_theme};
use crate::demo::transitions::{LayerVisual, TransitionState};
use crate::effects::{Effect, EffectFrame, EffectKind, FrameCtx, TextEffect};
use crate::foundation::core::{Canvas, Vec2};
use crate::foundation::error::{GlyphFxError, GlyphFxResult};
use crate::shader::bridge::ShaderBridge;
use crate::shader::holographic::HolographicBrush;

/// Notification for the host application.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum HostEvent {
    /// The demo entered `stage`.
    StageChanged {
        /// New stage.
        stage: DemoStage,
        /// Chrome contrast hint for the new stage.
        prefer_light_chrome: bool,
    },
    /// A new word became current.
    WordChanged {
        /// Schedule position.
        position: usize,
        /// Word text.
        text: String,
        /// Effect drawing it.
        kind: EffectKind,
        /// Chrome contrast hint for its theme.
        prefer_light_chrome: bool,
    },
    /// A layer could not be rendered; the schedule carried on.
    EffectSkipped {
        /// Stage the layer belongs to.
        stage: DemoStage,
        /// Word position, for loop layers.
        position: Option<usize>,
        /// Error text.
        reason: String,
        /// Whether the last good frame is being shown instead.
        retained_previous: bool,
    },
    /// A title is drawn with its flat colour because the host has no shader support.
    ShaderFallback {
        /// Title text.
        title: String,
    },
}

struct WordInstance {
    selection: WordSelection,
    effect: Option<Box<dyn TextEffect>>,
    mask: Option<Arc<GlyphMask>>,
    mounted_at_ms: f64,
    last: Option<EffectFrame>,
    reported: bool,
}

struct TitleInstance {
    stage: DemoStage,
    config: TitleConfig,
    theme: Theme,
    brush: Option<HolographicBrush>,
    mask: Option<Arc<GlyphMask>>,
    mounted_at_ms: f64,
    last: Option<PixelBuffer>,
    reported: bool,
}

/// Plays the demo one frame at a time onto a canvas-sized buffer.
pub struct DemoPlayer {
    config: DemoConfig,
    canvas: Canvas,
    schedule: DemoSchedule,
    orchestrator: Orchestrator,
    cache: MaskCache,
    rasterizer: Arc<dyn GlyphRasterizer>,
    bridge: ShaderBridge,
    rng: Box<dyn RandomSource>,
    intro: Option<TitleInstance>,
    outro: Option<TitleInstance>,
    current: Option<WordInstance>,
    previous: Option<WordInstance>,
    events: Vec<HostEvent>,
    frame: PixelBuffer,
}

impl std::fmt::Debug for DemoPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoPlayer")
            .field("canvas", &self.canvas)
            .field("stage", &self.orchestrator.stage())
            .field("word", &self.orchestrator.word())
            .field("elapsed_ms", &self.orchestrator.elapsed_ms())
            .field("cache", &self.cache)
            .field("live_handles", &self.bridge.live_handles())
            .finish_non_exhaustive()
    }
}

impl DemoPlayer {
    /// Validate `config` and mount the intro.
    pub fn new(config: DemoConfig, rasterizer: Arc<dyn GlyphRasterizer>) -> GlyphFxResult<Self> {
        config.validate()?;
        let canvas = Canvas::new(config.canvas.width, config.canvas.height)?;
        let schedule = config.schedule();
        let orchestrator = Orchestrator::new(config.timings, schedule.len())?;
        let mut player = Self {
            canvas,
            cache: MaskCache::new(config.mask_cache_entries),
            bridge: ShaderBridge::new(config.host),
            rng: Box::new(EntropyRng::new()),
            schedule,
            orchestrator,
            rasterizer,
            intro: None,
            outro: None,
            current: None,
            previous: None,
            events: Vec::new(),
            frame: PixelBuffer::new(canvas.width, canvas.height),
            config,
        };
        let intro = player.mount_title(DemoStage::Intro, 0.0);
        player.intro = Some(intro);
        player.events.push(HostEvent::StageChanged {
            stage: DemoStage::Intro,
            prefer_light_chrome: intro_theme().prefer_light_chrome,
        });
        Ok(player)
    }

    /// Replace the per-frame random source, e.g. with a fixed sequence in tests.
    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Output size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Word schedule being played.
    pub fn schedule(&self) -> &DemoSchedule {
        &self.schedule
    }

    /// Current stage.
    pub fn stage(&self) -> DemoStage {
        self.orchestrator.stage()
    }

    /// Current word position.
    pub fn word(&self) -> Option<usize> {
        self.orchestrator.word()
    }

    /// Time consumed so far.
    pub fn elapsed_ms(&self) -> f64 {
        self.orchestrator.elapsed_ms()
    }

    /// Shader bridge shared by the titles.
    pub fn bridge(&self) -> &ShaderBridge {
        &self.bridge
    }

    /// Glyph masks currently resident.
    pub fn cache(&self) -> &MaskCache {
        &self.cache
    }

    /// Contrast hint for the content currently shown.
    pub fn prefer_light_chrome(&self) -> bool {
        self.theme_now().prefer_light_chrome
    }

    /// Last rendered frame.
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    /// Take all events raised since the previous call.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance by a frame delta and render.
    pub fn advance(&mut self, delta_ms: f64) -> &PixelBuffer {
        let tick = self.orchestrator.advance(delta_ms);
        self.render_tick(tick)
    }

    /// Advance to an absolute time and render. Earlier times re-render the current instant.
    pub fn render_at(&mut self, elapsed_ms: f64) -> &PixelBuffer {
        let tick = self.orchestrator.advance_to(elapsed_ms);
        self.render_tick(tick)
    }

    fn theme_now(&self) -> Theme {
        match self.orchestrator.stage() {
            DemoStage::Intro => intro_theme(),
            DemoStage::Outro => outro_theme(),
            DemoStage::Loop => self
                .orchestrator
                .word()
                .and_then(|i| self.schedule.get(i))
                .map_or_else(intro_theme, |w| w.theme),
        }
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(stage = %tick.stage, elapsed_ms = tick.elapsed_ms)
    )]
    fn render_tick(&mut self, tick: Tick) -> &PixelBuffer {
        self.apply_tick(tick);
        self.evict_finished(tick.elapsed_ms);

        let timings = *self.orchestrator.timings();
        let stage_ms = self.orchestrator.stage_elapsed_ms();
        self.frame = match tick.stage {
            DemoStage::Intro => self.title_layer(DemoStage::Intro, tick.elapsed_ms),
            DemoStage::Loop if self.intro.is_some() => {
                let t = TransitionState::intro_to_loop(stage_ms, timings.intro_transition_ms);
                let intro_layer = self.title_layer(DemoStage::Intro, tick.elapsed_ms);
                let loop_layer = self.loop_layer(tick.elapsed_ms);
                self.cross(&intro_layer, &loop_layer, t)
            }
            DemoStage::Loop => self.loop_layer(tick.elapsed_ms),
            DemoStage::Outro if self.current.is_some() => {
                let t = TransitionState::loop_to_outro(
                    self.canvas,
                    stage_ms,
                    timings.outro_transition_ms,
                );
                let loop_layer = self.loop_layer(tick.elapsed_ms);
                let outro_layer = self.title_layer(DemoStage::Outro, tick.elapsed_ms);
                self.cross(&loop_layer, &outro_layer, t)
            }
            DemoStage::Outro => self.title_layer(DemoStage::Outro, tick.elapsed_ms),
        };
        &self.frame
    }

    /// Mount and announce whatever the tick brought into view.
    fn apply_tick(&mut self, tick: Tick) {
        if tick.left_stage.is_some() {
            if tick.stage == DemoStage::Outro && self.outro.is_none() {
                let start = self.orchestrator.timings().outro_start_ms(self.schedule.len());
                let outro = self.mount_title(DemoStage::Outro, start);
                self.outro = Some(outro);
            }
            self.events.push(HostEvent::StageChanged {
                stage: tick.stage,
                prefer_light_chrome: self.theme_now().prefer_light_chrome,
            });
        }
        let Some(position) = tick.word.filter(|_| tick.word_changed) else {
            return;
        };
        if let Some(old) = self.previous.take() {
            self.unmount_word(old);
        }
        let start = self.orchestrator.timings().word_start_ms(position);
        if let Some(word) = self.mount_word(position, start) {
            self.events.push(HostEvent::WordChanged {
                position,
                text: word.selection.text.clone(),
                kind: word.selection.kind,
                prefer_light_chrome: word.selection.theme.prefer_light_chrome,
            });
            self.previous = self.current.replace(word);
        }
    }

    /// Drop instances whose exit transition has completed.
    fn evict_finished(&mut self, now_ms: f64) {
        let timings = *self.orchestrator.timings();
        let stage = self.orchestrator.stage();
        let stage_ms = self.orchestrator.stage_elapsed_ms();

        let intro_done = match stage {
            DemoStage::Intro => false,
            DemoStage::Loop => stage_ms >= timings.intro_transition_ms,
            DemoStage::Outro => true,
        };
        if intro_done && let Some(intro) = self.intro.take() {
            self.unmount_title(intro);
        }

        let word_swap_done = self
            .current
            .as_ref()
            .is_some_and(|w| now_ms - w.mounted_at_ms >= timings.word_transition_ms);
        if (word_swap_done || stage == DemoStage::Outro)
            && let Some(old) = self.previous.take()
        {
            self.unmount_word(old);
        }

        if stage == DemoStage::Outro
            && stage_ms >= timings.outro_transition_ms
            && let Some(last) = self.current.take()
        {
            self.unmount_word(last);
        }
    }

    fn draw_layer(&self, frame: &mut PixelBuffer, layer: &PixelBuffer, visual: LayerVisual) {
        if visual.is_hidden() {
            return;
        }
        if visual.scale == 1.0 {
            let offset = Vec2::new(visual.offset.x.round(), visual.offset.y.round());
            frame.draw_over(layer, offset, visual.opacity);
        } else {
            frame.draw_over_affine(layer, visual.transform(self.canvas), visual.opacity);
        }
    }

    /// Opaque canvas with `exiting` and `entering` placed per `t`.
    fn cross(
        &self,
        exiting: &PixelBuffer,
        entering: &PixelBuffer,
        t: TransitionState,
    ) -> PixelBuffer {
        let mut out = PixelBuffer::new(self.canvas.width, self.canvas.height);
        self.draw_layer(&mut out, exiting, t.exiting);
        self.draw_layer(&mut out, entering, t.entering);
        out
    }

    /// Top-left position that centres a `width x height` box on the canvas.
    fn centred(&self, width: u32, height: u32) -> Vec2 {
        Vec2::new(
            ((f64::from(self.canvas.width) - f64::from(width)) / 2.0).round(),
            ((f64::from(self.canvas.height) - f64::from(height)) / 2.0).round(),
        )
    }

    fn mount_title(&mut self, stage: DemoStage, mounted_at_ms: f64) -> TitleInstance {
        let (config, theme) = match stage {
            DemoStage::Outro => (self.config.outro.clone(), outro_theme()),
            _ => (self.config.intro.clone(), intro_theme()),
        };
        let mut title = TitleInstance {
            stage,
            theme,
            brush: None,
            mask: None,
            mounted_at_ms,
            last: None,
            reported: false,
            config,
        };
        self.acquire_title(&mut title);
        tracing::debug!(%stage, text = %title.config.text, "title mounted");
        title
    }

    /// Bind the brush and fetch the mask if either is still missing.
    fn acquire_title(&mut self, title: &mut TitleInstance) {
        if title.brush.is_none() {
            match HolographicBrush::new(&self.bridge, title.config.holo) {
                Ok(brush) => {
                    if brush.is_fallback() {
                        self.events.push(HostEvent::ShaderFallback {
                            title: title.config.text.clone(),
                        });
                    }
                    title.brush = Some(brush);
                }
                Err(e) => self.report_once(&mut title.reported, title.stage, None, &e, false),
            }
        }
        if title.mask.is_none() {
            match self.cache.get_or_rasterize(
                &*self.rasterizer,
                &title.config.text,
                &title.config.style,
            ) {
                Ok(mask) => title.mask = Some(mask),
                Err(e) => self.report_once(&mut title.reported, title.stage, None, &e, false),
            }
        }
    }

    fn unmount_title(&mut self, title: TitleInstance) {
        self.cache.evict(&title.config.text, &title.config.style);
        tracing::debug!(stage = %title.stage, "title unmounted");
    }

    fn mount_word(&mut self, position: usize, mounted_at_ms: f64) -> Option<WordInstance> {
        let selection = self.schedule.get(position)?.clone();
        let mut word = WordInstance {
            selection,
            effect: None,
            mask: None,
            mounted_at_ms,
            last: None,
            reported: false,
        };
        self.acquire_word(&mut word);
        tracing::debug!(position, kind = %word.selection.kind, "word mounted");
        Some(word)
    }

    /// Build the effect and fetch the mask if either is still missing.
    fn acquire_word(&mut self, word: &mut WordInstance) {
        let position = Some(word.selection.position);
        if word.effect.is_none() {
            match Effect::from_spec(&word.selection.spec(), &self.config.tuning) {
                Ok(effect) => word.effect = Some(Box::new(effect)),
                Err(e) => {
                    self.report_once(&mut word.reported, DemoStage::Loop, position, &e, false);
                }
            }
        }
        if word.mask.is_none() {
            match self.cache.get_or_rasterize(
                &*self.rasterizer,
                &word.selection.text,
                &word.selection.style,
            ) {
                Ok(mask) => word.mask = Some(mask),
                Err(e) => {
                    self.report_once(&mut word.reported, DemoStage::Loop, position, &e, false);
                }
            }
        }
    }

    fn unmount_word(&mut self, word: WordInstance) {
        let still_used = self.current.iter().chain(self.previous.iter()).any(|w| {
            w.selection.text == word.selection.text && w.selection.style == word.selection.style
        });
        if !still_used {
            self.cache.evict(&word.selection.text, &word.selection.style);
        }
        tracing::debug!(position = word.selection.position, "word unmounted");
    }

    fn report(
        &mut self,
        stage: DemoStage,
        position: Option<usize>,
        err: &GlyphFxError,
        retained_previous: bool,
    ) {
        tracing::warn!(%stage, ?position, error = %err, retained_previous, "layer skipped");
        self.events.push(HostEvent::EffectSkipped {
            stage,
            position,
            reason: err.to_string(),
            retained_previous,
        });
    }

    /// Report `err` unless this instance already raised an event.
    fn report_once(
        &mut self,
        reported: &mut bool,
        stage: DemoStage,
        position: Option<usize>,
        err: &GlyphFxError,
        retained_previous: bool,
    ) {
        if !*reported {
            *reported = true;
            self.report(stage, position, err, retained_previous);
        }
    }

    /// Background plus centred title for `stage`.
    fn title_layer(&mut self, stage: DemoStage, now_ms: f64) -> PixelBuffer {
        let slot = match stage {
            DemoStage::Outro => self.outro.take(),
            _ => self.intro.take(),
        };
        let Some(mut title) = slot else {
            return PixelBuffer::new(self.canvas.width, self.canvas.height);
        };
        self.acquire_title(&mut title);
        let mut layer = title.theme.background.render(self.canvas);
        if let (Some(brush), Some(mask)) = (title.brush.as_mut(), title.mask.as_ref()) {
            match brush.render(mask, now_ms - title.mounted_at_ms) {
                Ok(pixels) => title.last = Some(pixels),
                Err(e) => {
                    let retained = e.is_recoverable() && title.last.is_some();
                    if !retained {
                        title.last = None;
                    }
                    self.report_once(&mut title.reported, stage, None, &e, retained);
                }
            }
        }
        if let Some(pixels) = &title.last {
            let at = self.centred(pixels.width(), pixels.height());
            layer.draw_over(pixels, at, 1.0);
        }
        match stage {
            DemoStage::Outro => self.outro = Some(title),
            _ => self.intro = Some(title),
        }
        layer
    }

    /// Background plus the current word, cross-fading from the previous one while it exits.
    fn loop_layer(&mut self, now_ms: f64) -> PixelBuffer {
        let Some(mut current) = self.current.take() else {
            return intro_theme().background.render(self.canvas);
        };
        let mut previous = self.previous.take();
        let transition = previous.as_ref().map(|_| {
            TransitionState::word(
                current.selection.direction,
                self.canvas,
                now_ms - current.mounted_at_ms,
                self.orchestrator.timings().word_transition_ms,
            )
        });

        let mut layer = match (&previous, transition) {
            (Some(prev), Some(t)) => {
                let mut bg = prev.selection.theme.background.render(self.canvas);
                let next = current.selection.theme.background.render(self.canvas);
                bg.draw_over(&next, Vec2::ZERO, t.progress);
                bg
            }
            _ => current.selection.theme.background.render(self.canvas),
        };

        let visuals = transition.unwrap_or(TransitionState::SETTLED);
        if let Some(prev) = previous.as_mut() {
            let pixels = self.word_pixels(prev, now_ms);
            self.draw_layer(&mut layer, &pixels, visuals.exiting);
        }
        let pixels = self.word_pixels(&mut current, now_ms);
        self.draw_layer(&mut layer, &pixels, visuals.entering);

        self.current = Some(current);
        self.previous = previous;
        layer
    }

    /// One word's effect output centred on a transparent canvas-sized buffer.
    fn word_pixels(&mut self, word: &mut WordInstance, now_ms: f64) -> PixelBuffer {
        let mut out = PixelBuffer::new(self.canvas.width, self.canvas.height);
        self.acquire_word(word);
        if let (Some(effect), Some(mask)) = (word.effect.as_deref(), word.mask.as_ref()) {
            let ctx = FrameCtx::at(now_ms - word.mounted_at_ms);
            match effect.render(mask, ctx, self.rng.as_mut()) {
                Ok(frame) => word.last = Some(frame),
                Err(e) => {
                    let retained = e.is_recoverable() && word.last.is_some();
                    if !retained {
                        word.last = None;
                    }
                    let position = Some(word.selection.position);
                    self.report_once(&mut word.reported, DemoStage::Loop, position, &e, retained);
                }
            }
            if let Some(frame) = &word.last {
                let at = self.centred(mask.width(), mask.height()) - frame.origin;
                out.draw_over(&frame.pixels, at, 1.0);
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/demo/player.rs"]
mod tests;
