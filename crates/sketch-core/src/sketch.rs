//! The frame-update model shared by both sketches.
//!
//! A [`Sketch`] owns its primitives and knows how to draw them; a [`Scene`]
//! wraps one with the clock, glitch trigger, RNG and viewport, and runs one
//! frame at a time against a [`Surface`] and an [`AudioReactor`].

use crate::audio::{AudioReactor, AudioSink};
use crate::cave::Cave;
use crate::clock::SceneClock;
use crate::error::{DrawError, SceneError};
use crate::glitch::{GlitchLine, GlitchLines, GlitchTrigger};
use crate::ouroboros::Ouroboros;
use crate::surface::{Surface, Viewport};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// What a sketch sees while drawing one frame.
pub struct FrameView<'a> {
    pub t: f64,
    pub viewport: Viewport,
    /// Glitch artifacts rolled for this frame; empty when the trial missed.
    pub glitch: &'a [GlitchLine],
}

pub trait Sketch {
    const NAME: &'static str;
    /// Amount added to scene time after every frame.
    const TIME_STEP: f64;

    /// Build the fixed primitive set for a viewport.
    fn build<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self
    where
        Self: Sized;

    fn primitive_count(&self) -> usize;

    fn glitch_trigger(&self) -> GlitchTrigger;

    /// Draw the whole frame, including the glitch overlay wherever this
    /// sketch layers it.
    fn draw<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        view: &FrameView<'_>,
    ) -> Result<(), DrawError>;

    /// Per-frame state besides scene time (e.g. rotation).
    fn advance(&mut self) {}
}

/// Outcome of one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Scene time the frame was drawn at.
    pub t: f64,
    pub glitch_lines: usize,
    pub bursts: usize,
}

impl FrameStats {
    pub fn glitched(&self) -> bool {
        self.glitch_lines > 0
    }
}

pub struct Scene<K: Sketch, R: Rng> {
    sketch: K,
    clock: SceneClock,
    trigger: GlitchTrigger,
    rng: R,
    viewport: Viewport,
    overlay: GlitchLines,
}

impl<K: Sketch, R: Rng> Scene<K, R> {
    pub fn new(width: f32, height: f32, mut rng: R) -> Result<Self, SceneError> {
        let viewport = Viewport::new(width, height)?;
        let sketch = K::build(viewport, &mut rng);
        let trigger = sketch.glitch_trigger();
        log::info!(
            "[scene] {} built: {} primitives in {:.0}x{:.0}",
            K::NAME,
            sketch.primitive_count(),
            width,
            height
        );
        Ok(Self {
            sketch,
            clock: SceneClock::new(K::TIME_STEP),
            trigger,
            rng,
            viewport,
            overlay: GlitchLines::new(),
        })
    }

    /// Run one frame: roll the glitch trial, draw, fire bursts, advance time.
    ///
    /// A failed surface call aborts the drawing but time still advances and
    /// the bursts for an already-rolled glitch still fire. The next frame's
    /// `begin_frame` clears whatever state the aborted one left open.
    pub fn frame<S, A>(
        &mut self,
        surface: &mut S,
        audio: &mut AudioReactor<A>,
    ) -> Result<FrameStats, DrawError>
    where
        S: Surface + ?Sized,
        A: AudioSink,
    {
        let t = self.clock.t();
        let bursts = self
            .trigger
            .roll(&mut self.rng, self.viewport, &mut self.overlay);
        let view = FrameView {
            t,
            viewport: self.viewport,
            glitch: &self.overlay,
        };
        let drawn = match surface.begin_frame() {
            Ok(()) => self.sketch.draw(surface, &view),
            Err(e) => Err(e),
        };
        for _ in 0..bursts {
            audio.random_burst(&mut self.rng);
        }
        self.sketch.advance();
        self.clock.advance();
        drawn.map(|_| FrameStats {
            t,
            glitch_lines: self.overlay.len(),
            bursts,
        })
    }

    /// Track the new surface size. Primitives keep the layout they were
    /// built with.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::resized(width, height);
        log::info!("[scene] resized to {:.0}x{:.0}", width, height);
    }

    pub fn t(&self) -> f64 {
        self.clock.t()
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn sketch(&self) -> &K {
        &self.sketch
    }

    pub fn primitive_count(&self) -> usize {
        self.sketch.primitive_count()
    }

    pub fn trigger(&self) -> GlitchTrigger {
        self.trigger
    }

    /// Override the glitch trial, e.g. to force or silence glitches.
    pub fn set_trigger(&mut self, trigger: GlitchTrigger) {
        self.trigger = trigger;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SketchKind {
    #[default]
    Ouroboros,
    Cave,
}

impl SketchKind {
    pub fn name(self) -> &'static str {
        match self {
            SketchKind::Ouroboros => Ouroboros::NAME,
            SketchKind::Cave => Cave::NAME,
        }
    }
}

impl fmt::Display for SketchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SketchKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ouroboros" | "ring" => Ok(SketchKind::Ouroboros),
            "cave" | "canyon" => Ok(SketchKind::Cave),
            _ => Err(SceneError::UnknownSketch(s.to_string())),
        }
    }
}

/// Either sketch behind one type, for front ends that pick at runtime.
pub enum AnyScene<R: Rng> {
    Ouroboros(Scene<Ouroboros, R>),
    Cave(Scene<Cave, R>),
}

impl<R: Rng> AnyScene<R> {
    pub fn new(kind: SketchKind, width: f32, height: f32, rng: R) -> Result<Self, SceneError> {
        Ok(match kind {
            SketchKind::Ouroboros => AnyScene::Ouroboros(Scene::new(width, height, rng)?),
            SketchKind::Cave => AnyScene::Cave(Scene::new(width, height, rng)?),
        })
    }

    pub fn kind(&self) -> SketchKind {
        match self {
            AnyScene::Ouroboros(_) => SketchKind::Ouroboros,
            AnyScene::Cave(_) => SketchKind::Cave,
        }
    }

    pub fn frame<S, A>(
        &mut self,
        surface: &mut S,
        audio: &mut AudioReactor<A>,
    ) -> Result<FrameStats, DrawError>
    where
        S: Surface + ?Sized,
        A: AudioSink,
    {
        match self {
            AnyScene::Ouroboros(s) => s.frame(surface, audio),
            AnyScene::Cave(s) => s.frame(surface, audio),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        match self {
            AnyScene::Ouroboros(s) => s.resize(width, height),
            AnyScene::Cave(s) => s.resize(width, height),
        }
    }

    pub fn t(&self) -> f64 {
        match self {
            AnyScene::Ouroboros(s) => s.t(),
            AnyScene::Cave(s) => s.t(),
        }
    }

    pub fn frames(&self) -> u64 {
        match self {
            AnyScene::Ouroboros(s) => s.frames(),
            AnyScene::Cave(s) => s.frames(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        match self {
            AnyScene::Ouroboros(s) => s.viewport(),
            AnyScene::Cave(s) => s.viewport(),
        }
    }

    pub fn primitive_count(&self) -> usize {
        match self {
            AnyScene::Ouroboros(s) => s.primitive_count(),
            AnyScene::Cave(s) => s.primitive_count(),
        }
    }
}
