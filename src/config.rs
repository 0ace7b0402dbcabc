use anyhow::Context;
use sketch_core::SketchKind;

// Canvas element and the data attributes read from it.
pub const CANVAS_ID: &str = "app-canvas";
pub const SKETCH_ATTR: &str = "data-sketch";
pub const SEED_ATTR: &str = "data-seed";

// Frame stats are logged once per this many frames.
pub const STATS_EVERY_FRAMES: u64 = 600;

/// Startup options taken from the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageConfig {
    pub sketch: SketchKind,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl PageConfig {
    /// Parse the raw attribute values. Missing or blank attributes fall back
    /// to defaults; present but malformed ones are errors.
    pub fn from_attributes(sketch: Option<&str>, seed: Option<&str>) -> anyhow::Result<Self> {
        let sketch = match non_blank(sketch) {
            Some(s) => s.parse::<SketchKind>()?,
            None => SketchKind::default(),
        };
        let seed = match non_blank(seed) {
            Some(s) => Some(
                s.parse::<u64>()
                    .with_context(|| format!("{SEED_ATTR}=\"{s}\" is not a u64"))?,
            ),
            None => None,
        };
        Ok(Self { sketch, seed })
    }
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}
