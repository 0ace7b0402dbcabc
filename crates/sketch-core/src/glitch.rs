//! Per-frame glitch overlay: a Bernoulli trial that spawns blurred line
//! artifacts and tells the caller how many noise bursts to fire.

use crate::color::Hsba;
use crate::constants::*;
use crate::error::DrawError;
use crate::surface::{Surface, Viewport};
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;

/// One blurred white streak.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchLine {
    pub from: Vec2,
    pub to: Vec2,
    pub weight: f32,
    pub alpha: f32,
    pub blur: f32,
}

impl GlitchLine {
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), DrawError> {
        surface.save()?;
        surface.set_blur(self.blur)?;
        surface.stroke_line(self.from, self.to, Hsba::white(self.alpha), self.weight)?;
        surface.restore()
    }
}

pub type GlitchLines = SmallVec<[GlitchLine; 8]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlitchPattern {
    /// Several short horizontal streaks anywhere on screen, in coordinates
    /// centred on the viewport.
    Scatter,
    /// One faint full-height line inside the horizontal margins, in canvas
    /// coordinates.
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstPolicy {
    PerLine,
    PerTrial,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchTrigger {
    pub probability: f64,
    pub pattern: GlitchPattern,
    pub bursts: BurstPolicy,
}

impl GlitchTrigger {
    pub const fn scatter() -> Self {
        Self {
            probability: SCATTER_PROBABILITY,
            pattern: GlitchPattern::Scatter,
            bursts: BurstPolicy::PerLine,
        }
    }

    pub const fn vertical() -> Self {
        Self {
            probability: VERTICAL_PROBABILITY,
            pattern: GlitchPattern::Vertical,
            bursts: BurstPolicy::PerTrial,
        }
    }

    /// Run this frame's trial. On success `out` receives the artifacts and
    /// the return value is the number of bursts to fire; otherwise `out` is
    /// left empty and `0` is returned.
    pub fn roll<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        viewport: Viewport,
        out: &mut GlitchLines,
    ) -> usize {
        out.clear();
        if !rng.gen_bool(self.probability.clamp(0.0, 1.0)) {
            return 0;
        }
        match self.pattern {
            GlitchPattern::Scatter => scatter(rng, viewport, out),
            GlitchPattern::Vertical => vertical(rng, viewport, out),
        }
        match self.bursts {
            BurstPolicy::PerLine => out.len(),
            BurstPolicy::PerTrial => 1,
        }
    }
}

// `gen_range` panics on empty ranges, which a zero-sized viewport produces.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

fn scatter<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, out: &mut GlitchLines) {
    let half_w = viewport.width * 0.5;
    let half_h = viewport.height * 0.5;
    let count = rng.gen_range(SCATTER_LINE_COUNT);
    for _ in 0..count {
        let y = uniform(rng, -half_h, half_h);
        let x1 = uniform(rng, -half_w, half_w);
        let x2 = x1 + rng.gen_range(SCATTER_LENGTH);
        out.push(GlitchLine {
            from: Vec2::new(x1, y),
            to: Vec2::new(x2, y),
            weight: rng.gen_range(SCATTER_THICKNESS),
            alpha: rng.gen_range(SCATTER_ALPHA),
            blur: SCATTER_BLUR_PX,
        });
    }
}

fn vertical<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, out: &mut GlitchLines) {
    let w = viewport.width;
    let x = uniform(
        rng,
        w * RIDGE_MARGIN_FRACTION,
        w * (1.0 - RIDGE_MARGIN_FRACTION),
    );
    out.push(GlitchLine {
        from: Vec2::new(x, 0.0),
        to: Vec2::new(x, viewport.height),
        weight: rng.gen_range(VERTICAL_THICKNESS),
        alpha: VERTICAL_ALPHA,
        blur: VERTICAL_BLUR_PX,
    });
}
