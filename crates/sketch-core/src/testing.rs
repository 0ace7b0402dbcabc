//! In-memory stand-ins for the rendering surface and audio backend, so the
//! frame model can run without a display or audio device.

use crate::audio::{AudioSink, GainEnvelope, NoiseChannel};
use crate::color::Hsba;
use crate::error::DrawError;
use crate::surface::Surface;
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    Blur(f32),
    Rect { x: f32, y: f32, w: f32, h: f32, color: Hsba },
    Ellipse { center: Vec2, w: f32, h: f32, color: Hsba },
    Line { from: Vec2, to: Vec2, color: Hsba, weight: f32 },
    Polyline { points: Vec<Vec2>, color: Hsba, weight: f32 },
}

/// Records every call. Optionally fails once a call budget is spent, or on
/// one specific call, to exercise the skip-frame path.
///
/// Also tracks the save depth and the accumulated translation, which
/// `begin_frame` resets. Rotation is recorded but not tracked.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    pub fail_after: Option<usize>,
    pub fail_at: Option<usize>,
    calls: usize,
    frames_begun: usize,
    offset: Vec2,
    saved: Vec<Vec2>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(calls: usize) -> Self {
        Self {
            fail_after: Some(calls),
            ..Self::default()
        }
    }

    /// Fail only the drawing call with zero-based index `call`; every other
    /// call succeeds.
    pub fn failing_once_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of `save` calls not yet matched by a `restore`.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Translation currently applied to drawing calls.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn frames_begun(&self) -> usize {
        self.frames_begun
    }

    pub fn ellipses(&self) -> impl Iterator<Item = (&Vec2, f32, &Hsba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Ellipse { center, w, color, .. } => Some((center, *w, color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn polylines(&self) -> impl Iterator<Item = &[Vec2]> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Polyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
    }

    fn push(&mut self, cmd: DrawCommand) -> Result<(), DrawError> {
        let call = self.calls;
        self.calls += 1;
        if let Some(limit) = self.fail_after {
            if self.commands.len() >= limit {
                return Err(DrawError::Surface("recording budget spent".into()));
            }
        }
        if self.fail_at == Some(call) {
            return Err(DrawError::Surface(format!("call {call} refused")));
        }
        self.commands.push(cmd);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn begin_frame(&mut self) -> Result<(), DrawError> {
        self.saved.clear();
        self.offset = Vec2::ZERO;
        self.frames_begun += 1;
        Ok(())
    }

    fn save(&mut self) -> Result<(), DrawError> {
        self.push(DrawCommand::Save)?;
        self.saved.push(self.offset);
        Ok(())
    }

    fn restore(&mut self) -> Result<(), DrawError> {
        self.push(DrawCommand::Restore)?;
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
        Ok(())
    }

    fn translate(&mut self, x: f32, y: f32) -> Result<(), DrawError> {
        let v = Vec2::new(x, y);
        self.push(DrawCommand::Translate(v))?;
        self.offset += v;
        Ok(())
    }

    fn rotate(&mut self, radians: f32) -> Result<(), DrawError> {
        self.push(DrawCommand::Rotate(radians))
    }

    fn set_blur(&mut self, px: f32) -> Result<(), DrawError> {
        self.push(DrawCommand::Blur(px))
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Hsba) -> Result<(), DrawError> {
        self.push(DrawCommand::Rect { x, y, w, h, color })
    }

    fn fill_ellipse(&mut self, center: Vec2, w: f32, h: f32, color: Hsba) -> Result<(), DrawError> {
        self.push(DrawCommand::Ellipse { center, w, h, color })
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Hsba, weight: f32) -> Result<(), DrawError> {
        self.push(DrawCommand::Line {
            from,
            to,
            color,
            weight,
        })
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Hsba, weight: f32) -> Result<(), DrawError> {
        self.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
            weight,
        })
    }
}

/// Audio sink with a hand-driven clock that keeps every scheduled envelope.
#[derive(Debug, Default)]
pub struct ManualAudio {
    pub now: f64,
    pub scheduled: Vec<(NoiseChannel, GainEnvelope)>,
}

impl ManualAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, channel: NoiseChannel) -> usize {
        self.scheduled.iter().filter(|(c, _)| *c == channel).count()
    }
}

impl AudioSink for ManualAudio {
    fn current_time(&self) -> f64 {
        self.now
    }

    fn schedule_gain(&mut self, channel: NoiseChannel, envelope: &GainEnvelope) {
        self.scheduled.push((channel, envelope.clone()));
    }
}
