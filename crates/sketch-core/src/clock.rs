/// Scene time `t`, advanced by a fixed step once per frame.
///
/// Time is kept as a frame count so `t` never drifts from `frames * step`,
/// and read out in f64 so it keeps resolving single steps over long runs.
#[derive(Clone, Debug)]
pub struct SceneClock {
    step: f64,
    frames: u64,
}

impl SceneClock {
    pub fn new(step: f64) -> Self {
        Self::at_frame(step, 0)
    }

    /// A clock that has already run `frames` frames.
    pub fn at_frame(step: f64, frames: u64) -> Self {
        Self { step, frames }
    }

    #[inline]
    pub fn t(&self) -> f64 {
        self.frames as f64 * self.step
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn advance(&mut self) {
        self.frames += 1;
    }
}
