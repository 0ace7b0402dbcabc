//! Drawing surface abstraction and viewport bookkeeping.

use crate::color::Hsba;
use crate::error::{DrawError, SceneError};
use glam::Vec2;

/// Size of the drawing surface in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Validated constructor used when a scene is first built.
    pub fn new(width: f32, height: f32) -> Result<Self, SceneError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(width) && ok(height) {
            Ok(Self { width, height })
        } else {
            Err(SceneError::InvalidViewport { width, height })
        }
    }

    /// Accept whatever the host reports. Degenerate sizes draw nothing useful
    /// but must not break the loop.
    pub fn resized(width: f32, height: f32) -> Self {
        let fix = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: fix(width),
            height: fix(height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Distance from the centre to a corner.
    #[inline]
    pub fn half_diagonal(&self) -> f32 {
        self.center().length()
    }
}

/// The drawing operations the sketches need. Sizes for ellipses are
/// diameters; `weight` is the stroke width in pixels.
pub trait Surface {
    /// Called before anything else in a frame. Drops any transform, blur or
    /// saved state left behind by an aborted frame.
    fn begin_frame(&mut self) -> Result<(), DrawError>;
    fn save(&mut self) -> Result<(), DrawError>;
    fn restore(&mut self) -> Result<(), DrawError>;
    fn translate(&mut self, x: f32, y: f32) -> Result<(), DrawError>;
    fn rotate(&mut self, radians: f32) -> Result<(), DrawError>;
    /// Gaussian blur applied to subsequent draws; `0.0` disables it.
    fn set_blur(&mut self, px: f32) -> Result<(), DrawError>;

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Hsba)
        -> Result<(), DrawError>;
    fn fill_ellipse(&mut self, center: Vec2, w: f32, h: f32, color: Hsba)
        -> Result<(), DrawError>;
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Hsba, weight: f32)
        -> Result<(), DrawError>;
    fn stroke_polyline(&mut self, points: &[Vec2], color: Hsba, weight: f32)
        -> Result<(), DrawError>;
}
