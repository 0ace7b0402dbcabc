//! HSB color model matching the sketches' `(360, 100, 100, 100)` ranges.

use std::fmt::Write;

/// Hue in degrees `[0, 360)`, saturation/brightness/alpha in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsba {
    pub h: f32,
    pub s: f32,
    pub b: f32,
    pub a: f32,
}

impl Hsba {
    pub const fn new(h: f32, s: f32, b: f32, a: f32) -> Self {
        Self { h, s, b, a }
    }

    /// Achromatic color at the given brightness.
    pub const fn gray(b: f32, a: f32) -> Self {
        Self::new(0.0, 0.0, b, a)
    }

    pub const fn white(a: f32) -> Self {
        Self::gray(100.0, a)
    }

    /// Convert to 8-bit RGB plus alpha in `[0, 1]`.
    pub fn to_rgba(self) -> ([u8; 3], f32) {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let v = (self.b / 100.0).clamp(0.0, 1.0);
        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        let to8 = |u: f32| ((u + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        ([to8(r), to8(g), to8(b)], (self.a / 100.0).clamp(0.0, 1.0))
    }

    /// CSS `rgba(...)` string for canvas fill/stroke styles.
    pub fn to_css(self) -> String {
        let mut out = String::with_capacity(28);
        self.write_css(&mut out);
        out
    }

    /// Like [`Hsba::to_css`] but reuses the caller's buffer.
    pub fn write_css(self, out: &mut String) {
        let ([r, g, b], a) = self.to_rgba();
        out.clear();
        _ = write!(out, "rgba({r},{g},{b},{a:.3})");
    }
}
