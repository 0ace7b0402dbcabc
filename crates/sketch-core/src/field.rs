//! Smooth lattice noise used to jitter the cave ridges.
//!
//! A wrapped table of random values is sampled at integer lattice points and
//! blended with a cosine ease; several octaves are summed with halving
//! amplitude. Output lies in `[0, 1)` and changes slowly along both axes.

use rand::Rng;

const TABLE_BITS: usize = 12;
const TABLE_SIZE: usize = 1 << TABLE_BITS;
const TABLE_MASK: usize = TABLE_SIZE - 1;
const ROW_STRIDE: usize = 16; // lattice offset between neighbouring y cells

#[derive(Clone, Debug)]
pub struct NoiseField {
    table: Vec<f32>,
    octaves: u32,
    falloff: f32,
}

impl NoiseField {
    pub const DEFAULT_OCTAVES: u32 = 4;
    pub const DEFAULT_FALLOFF: f32 = 0.5;

    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_detail(rng, Self::DEFAULT_OCTAVES, Self::DEFAULT_FALLOFF)
    }

    pub fn with_detail<R: Rng + ?Sized>(rng: &mut R, octaves: u32, falloff: f32) -> Self {
        let table = (0..TABLE_SIZE).map(|_| rng.gen::<f32>()).collect();
        Self {
            table,
            octaves: octaves.max(1),
            falloff: falloff.clamp(0.0, 1.0),
        }
    }

    /// Sample at `(x, y)`. Negative coordinates are mirrored.
    ///
    /// Coordinates are f64 so the fractional part stays exact far from the
    /// origin; `y` is scene time for the cave.
    pub fn sample(&self, x: f64, y: f64) -> f32 {
        let (x, y) = (x.abs(), y.abs());
        let mut xi = x.floor() as usize;
        let mut yi = y.floor() as usize;
        let mut xf = (x - x.floor()) as f32;
        let mut yf = (y - y.floor()) as f32;

        let mut sum = 0.0;
        let mut amp = 0.5;
        for _ in 0..self.octaves {
            let cell = xi.wrapping_add(yi.wrapping_mul(ROW_STRIDE));
            let ex = ease(xf);
            let ey = ease(yf);

            let top = lerp(self.at(cell), self.at(cell + 1), ex);
            let bottom = lerp(self.at(cell + ROW_STRIDE), self.at(cell + ROW_STRIDE + 1), ex);
            sum += lerp(top, bottom, ey) * amp;
            amp *= self.falloff;

            xi = xi.wrapping_mul(2);
            yi = yi.wrapping_mul(2);
            xf *= 2.0;
            yf *= 2.0;
            if xf >= 1.0 {
                xi = xi.wrapping_add(1);
                xf -= 1.0;
            }
            if yf >= 1.0 {
                yi = yi.wrapping_add(1);
                yf -= 1.0;
            }
        }
        sum
    }

    #[inline]
    fn at(&self, i: usize) -> f32 {
        self.table[i & TABLE_MASK]
    }
}

#[inline]
fn ease(t: f32) -> f32 {
    0.5 * (1.0 - (t * std::f32::consts::PI).cos())
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
