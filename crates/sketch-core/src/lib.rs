pub mod audio;
pub mod cave;
pub mod clock;
pub mod color;
pub mod constants;
pub mod error;
pub mod field;
pub mod glitch;
pub mod ouroboros;
pub mod sketch;
pub mod surface;
pub mod testing;

pub use audio::*;
pub use cave::{Cave, Ridge};
pub use clock::SceneClock;
pub use color::Hsba;
pub use error::*;
pub use glitch::*;
pub use ouroboros::{Dot, Ouroboros, RingShape};
pub use sketch::*;
pub use surface::*;

/// Linear map of `v` from `[a0, a1]` onto `[b0, b1]`.
#[inline]
pub fn map_range(v: f32, a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    b0 + (v - a0) * (b1 - b0) / (a1 - a0)
}
