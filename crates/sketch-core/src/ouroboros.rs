//! Ouroboros: a slowly turning ring of blinking dots with a three-lobed
//! radial ripple, over a radial gradient.

use crate::color::Hsba;
use crate::constants::*;
use crate::error::DrawError;
use crate::glitch::GlitchTrigger;
use crate::sketch::{FrameView, Sketch};
use crate::surface::{Surface, Viewport};
use crate::map_range;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Ring geometry shared by every dot, fixed at build time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingShape {
    pub base_radius: f32,
    pub amplitude: f32,
    pub lobes: f32,
}

impl RingShape {
    pub fn for_viewport(viewport: Viewport) -> Self {
        let base_radius = viewport.min_side() * RING_RADIUS_FRACTION;
        Self {
            base_radius,
            amplitude: base_radius * RING_AMPLITUDE_FRACTION,
            lobes: RING_LOBES,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub angle: f32,
    pub blink_phase: f32,
    pub radius_phase: f32,
}

impl Dot {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            angle: rng.gen_range(0.0..TAU),
            blink_phase: rng.gen_range(0.0..TAU),
            radius_phase: rng.gen_range(0.0..TAU),
        }
    }

    /// Position in ring space (origin at the ring centre, unrotated).
    pub fn position(&self, ring: &RingShape) -> Vec2 {
        let r = ring.base_radius
            + ring.amplitude * (ring.lobes * self.angle + self.radius_phase).sin();
        Vec2::new(r * self.angle.cos(), r * self.angle.sin())
    }

    /// Brightness in `[DOT_BRIGHTNESS_MIN, DOT_BRIGHTNESS_MAX]`.
    pub fn brightness(&self, t: f64) -> f32 {
        map_range(
            (t + self.blink_phase as f64).sin() as f32,
            -1.0,
            1.0,
            DOT_BRIGHTNESS_MIN,
            DOT_BRIGHTNESS_MAX,
        )
    }
}

pub struct Ouroboros {
    dots: Vec<Dot>,
    ring: RingShape,
    rotation: f32,
}

impl Ouroboros {
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn ring(&self) -> RingShape {
        self.ring
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

impl Sketch for Ouroboros {
    const NAME: &'static str = "ouroboros";
    const TIME_STEP: f64 = OUROBOROS_TIME_STEP;

    fn build<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let dots = (0..DOT_COUNT).map(|_| Dot::random(rng)).collect();
        Self {
            dots,
            ring: RingShape::for_viewport(viewport),
            rotation: 0.0,
        }
    }

    fn primitive_count(&self) -> usize {
        self.dots.len()
    }

    fn glitch_trigger(&self) -> GlitchTrigger {
        GlitchTrigger::scatter()
    }

    fn draw<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        view: &FrameView<'_>,
    ) -> Result<(), DrawError> {
        draw_radial_gradient(surface, view.viewport)?;

        let center = view.viewport.center();
        surface.save()?;
        surface.translate(center.x, center.y)?;
        surface.rotate(self.rotation)?;
        for dot in &self.dots {
            let p = dot.position(&self.ring);
            let b = dot.brightness(view.t);
            surface.fill_ellipse(
                p,
                DOT_HALO_DIAMETER,
                DOT_HALO_DIAMETER,
                Hsba::gray(b, DOT_HALO_ALPHA),
            )?;
            surface.fill_ellipse(p, DOT_CORE_DIAMETER, DOT_CORE_DIAMETER, Hsba::gray(b, 100.0))?;
        }
        // Streaks share the ring's frame, so they turn with it.
        for line in view.glitch {
            line.draw(surface)?;
        }
        surface.restore()
    }

    fn advance(&mut self) {
        self.rotation += RING_ROTATION_PER_FRAME;
    }
}

/// Black clear plus concentric circles brightening toward the centre.
pub fn draw_radial_gradient<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: Viewport,
) -> Result<(), DrawError> {
    surface.fill_rect(0.0, 0.0, viewport.width, viewport.height, Hsba::gray(0.0, 100.0))?;
    let center = viewport.center();
    let max_radius = viewport.half_diagonal();
    let steps = RADIAL_GRADIENT_STEPS;
    for i in (1..=steps).rev() {
        let inter = i as f32 / steps as f32;
        let b = map_range(inter, 0.0, 1.0, RADIAL_GRADIENT_CENTER_BRIGHTNESS, 0.0);
        let d = inter * max_radius * 2.0;
        surface.fill_ellipse(center, d, d, Hsba::gray(b, 100.0))?;
    }
    Ok(())
}
