// Shared visual/audio tuning constants used by both sketches.

use std::ops::Range;

// Ouroboros layout
pub const DOT_COUNT: usize = 10_000;
pub const RING_RADIUS_FRACTION: f32 = 0.45; // of min(width, height)
pub const RING_AMPLITUDE_FRACTION: f32 = 0.1; // of the base radius
pub const RING_LOBES: f32 = 3.0;
pub const RING_ROTATION_PER_FRAME: f32 = -0.0002;

// Ouroboros dots
pub const DOT_BRIGHTNESS_MIN: f32 = 30.0;
pub const DOT_BRIGHTNESS_MAX: f32 = 100.0;
pub const DOT_CORE_DIAMETER: f32 = 4.0;
pub const DOT_HALO_DIAMETER: f32 = 10.0;
pub const DOT_HALO_ALPHA: f32 = 20.0;
pub const OUROBOROS_TIME_STEP: f64 = 0.02;

// Ouroboros background: concentric circles, bright centre fading out
pub const RADIAL_GRADIENT_STEPS: usize = 150;
pub const RADIAL_GRADIENT_CENTER_BRIGHTNESS: f32 = 10.0;

// Cave layout
pub const RIDGE_COUNT: usize = 300;
pub const POINTS_PER_RIDGE: usize = 100;
pub const RIDGE_MARGIN_FRACTION: f32 = 0.1; // inset on every side
pub const RIDGE_NOISE_SCALE: f32 = 0.005; // noise x per pixel of base x
pub const RIDGE_JITTER_PX: f32 = 5.0; // max horizontal flicker either way
pub const RIDGE_ALPHA: f32 = 70.0;
pub const RIDGE_WEIGHT: f32 = 1.0;
pub const RIDGE_BLUR_PX: f32 = 1.0;
pub const CAVE_TIME_STEP: f64 = 0.01;

// Cave background: warm rows fading to black
pub const CAVE_GRADIENT_HUE: f32 = 30.0;
pub const CAVE_GRADIENT_SATURATION: f32 = 50.0;
pub const CAVE_GRADIENT_TOP_BRIGHTNESS: f32 = 20.0;

// Glitch: ouroboros scatters horizontal streaks in ring space
pub const SCATTER_PROBABILITY: f64 = 0.2;
pub const SCATTER_LINE_COUNT: Range<usize> = 3..8;
pub const SCATTER_LENGTH: Range<f32> = 20.0..100.0;
pub const SCATTER_THICKNESS: Range<f32> = 1.0..5.0;
pub const SCATTER_ALPHA: Range<f32> = 30.0..70.0;
pub const SCATTER_BLUR_PX: f32 = 3.0;

// Glitch: cave draws a single faint full-height line
pub const VERTICAL_PROBABILITY: f64 = 0.1;
pub const VERTICAL_THICKNESS: Range<f32> = 0.5..1.0;
pub const VERTICAL_ALPHA: f32 = 10.0;
pub const VERTICAL_BLUR_PX: f32 = 1.0;

// Audio levels and ramps (seconds)
pub const AMBIENT_LEVEL: f32 = 0.2;
pub const AMBIENT_PRESSED_LEVEL: f32 = 0.3;
pub const AMBIENT_RAMP_SEC: f64 = 0.5;
pub const BURST_LEVEL: Range<f32> = 0.05..0.1;
pub const BURST_ATTACK_SEC: f64 = 0.01;
pub const BURST_DECAY_SEC: f64 = 0.2;
pub const BURST_FILTER_HZ: f32 = 1000.0;
pub const NOISE_BUFFER_SEC: f32 = 2.0; // looped noise source length
