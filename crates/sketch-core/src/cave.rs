//! Cave: a canyon wall of vertical ridges flickering sideways on a smooth
//! noise field, over a warm vertical gradient.

use crate::color::Hsba;
use crate::constants::*;
use crate::error::DrawError;
use crate::field::NoiseField;
use crate::glitch::GlitchTrigger;
use crate::map_range;
use crate::sketch::{FrameView, Sketch};
use crate::surface::{Surface, Viewport};
use glam::Vec2;
use rand::Rng;

/// A vertical run of sample points sharing one anchor column.
#[derive(Clone, Debug, PartialEq)]
pub struct Ridge {
    pub base_x: f32,
    pub ys: Vec<f32>,
}

impl Ridge {
    /// Horizontal offset of every point on this ridge at time `t`.
    pub fn jitter(&self, field: &NoiseField, t: f64) -> f32 {
        let n = field.sample((self.base_x * RIDGE_NOISE_SCALE) as f64, t);
        map_range(n, 0.0, 1.0, -RIDGE_JITTER_PX, RIDGE_JITTER_PX)
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.ys.iter().map(move |&y| Vec2::new(self.base_x, y))
    }
}

pub struct Cave {
    ridges: Vec<Ridge>,
    field: NoiseField,
    scratch: Vec<Vec2>,
}

impl Cave {
    pub fn ridges(&self) -> &[Ridge] {
        &self.ridges
    }

    pub fn field(&self) -> &NoiseField {
        &self.field
    }
}

/// `count` evenly spaced values from `lo` to `hi` inclusive.
fn spread(count: usize, lo: f32, hi: f32) -> impl Iterator<Item = f32> {
    let last = count.saturating_sub(1).max(1) as f32;
    (0..count).map(move |i| map_range(i as f32, 0.0, last, lo, hi))
}

impl Sketch for Cave {
    const NAME: &'static str = "cave";
    const TIME_STEP: f64 = CAVE_TIME_STEP;

    fn build<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let (w, h) = (viewport.width, viewport.height);
        let m = RIDGE_MARGIN_FRACTION;
        let ys: Vec<f32> = spread(POINTS_PER_RIDGE, h * m, h * (1.0 - m)).collect();
        let ridges = spread(RIDGE_COUNT, w * m, w * (1.0 - m))
            .map(|base_x| Ridge {
                base_x,
                ys: ys.clone(),
            })
            .collect();
        Self {
            ridges,
            field: NoiseField::new(rng),
            scratch: Vec::with_capacity(POINTS_PER_RIDGE),
        }
    }

    fn primitive_count(&self) -> usize {
        self.ridges.iter().map(|r| r.ys.len()).sum()
    }

    fn glitch_trigger(&self) -> GlitchTrigger {
        GlitchTrigger::vertical()
    }

    fn draw<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        view: &FrameView<'_>,
    ) -> Result<(), DrawError> {
        draw_row_gradient(surface, view.viewport)?;

        // Glitch sits under the ridges here.
        for line in view.glitch {
            line.draw(surface)?;
        }

        surface.save()?;
        surface.set_blur(RIDGE_BLUR_PX)?;
        let color = Hsba::white(RIDGE_ALPHA);
        for ridge in &self.ridges {
            let dx = ridge.jitter(&self.field, view.t);
            self.scratch.clear();
            self.scratch
                .extend(ridge.points().map(|p| Vec2::new(p.x + dx, p.y)));
            surface.stroke_polyline(&self.scratch, color, RIDGE_WEIGHT)?;
        }
        surface.restore()
    }
}

/// One-pixel rows, warm and dim at the top fading to black at the bottom.
pub fn draw_row_gradient<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: Viewport,
) -> Result<(), DrawError> {
    let rows = viewport.height.ceil() as usize;
    for i in 0..rows {
        let inter = i as f32 / viewport.height;
        let b = map_range(inter, 0.0, 1.0, CAVE_GRADIENT_TOP_BRIGHTNESS, 0.0);
        let color = Hsba::new(CAVE_GRADIENT_HUE, CAVE_GRADIENT_SATURATION, b, 100.0);
        surface.fill_rect(0.0, i as f32, viewport.width, 1.0, color)?;
    }
    Ok(())
}
