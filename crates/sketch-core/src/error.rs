use thiserror::Error;

/// Failures while building a scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("viewport must be positive and finite, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("unknown sketch `{0}` (expected `ouroboros` or `cave`)")]
    UnknownSketch(String),
}

/// A drawing call rejected by the rendering surface.
///
/// Only ever costs the current frame; the scene clock keeps running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("surface call failed: {0}")]
    Surface(String),
}
