/// Canvas size in CSS pixels plus the device pixel ratio backing it.
///
/// The scene lays out in CSS pixels; the canvas backing store holds
/// `css * pixel_ratio` device pixels and drawing is scaled to match.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub css_width: f32,
    pub css_height: f32,
    pub pixel_ratio: f64,
}

impl CanvasSize {
    /// Sanitise what the window reports: negative or non-finite sizes become
    /// zero, and a missing or bogus ratio falls back to 1.
    pub fn new(css_width: f64, css_height: f64, pixel_ratio: f64) -> Self {
        let css = |v: f64| if v.is_finite() { v.max(0.0) as f32 } else { 0.0 };
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            css_width: css(css_width),
            css_height: css(css_height),
            pixel_ratio,
        }
    }

    pub fn backing_width(&self) -> u32 {
        (self.css_width as f64 * self.pixel_ratio).round() as u32
    }

    pub fn backing_height(&self) -> u32 {
        (self.css_height as f64 * self.pixel_ratio).round() as u32
    }
}
