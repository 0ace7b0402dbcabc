//! Noise-audio gain model.
//!
//! The reactor owns the gain envelopes of two noise channels and mirrors every
//! change to an [`AudioSink`], which schedules the same ramps on a real audio
//! graph. Envelopes follow Web Audio automation semantics: scheduling cancels
//! whatever is pending and holds the value reached at that instant.

use crate::constants::*;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseChannel {
    /// Continuous pink noise bed.
    Ambient,
    /// Band-passed white noise pulsed by glitches.
    Burst,
}

/// Target `value` reached at absolute audio time `at` by a linear ramp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainPoint {
    pub value: f32,
    pub at: f64,
}

/// Piecewise-linear gain automation starting from a held value.
#[derive(Clone, Debug, PartialEq)]
pub struct GainEnvelope {
    pub start: f64,
    pub hold: f32,
    pub points: SmallVec<[GainPoint; 2]>,
}

impl GainEnvelope {
    pub fn constant(value: f32) -> Self {
        Self {
            start: 0.0,
            hold: value,
            points: SmallVec::new(),
        }
    }

    pub fn value_at(&self, t: f64) -> f32 {
        let (mut t0, mut v0) = (self.start, self.hold);
        if t <= t0 {
            return v0;
        }
        for p in &self.points {
            if t < p.at {
                let span = p.at - t0;
                if span <= 0.0 {
                    return p.value;
                }
                let k = ((t - t0) / span) as f32;
                return v0 + (p.value - v0) * k;
            }
            t0 = p.at;
            v0 = p.value;
        }
        v0
    }

    /// Value the envelope settles on once all ramps complete.
    pub fn target(&self) -> f32 {
        self.points.last().map_or(self.hold, |p| p.value)
    }

    /// Time at which the last ramp completes.
    pub fn end(&self) -> f64 {
        self.points.last().map_or(self.start, |p| p.at)
    }

    /// Cancel pending ramps at `now`, hold the current value and ramp through
    /// `steps`, each given as `(value, seconds after the previous step)`.
    pub fn reschedule(&mut self, now: f64, steps: &[(f32, f64)]) {
        let hold = self.value_at(now);
        self.start = now;
        self.hold = hold;
        self.points.clear();
        let mut at = now;
        for &(value, secs) in steps {
            at += secs.max(0.0);
            self.points.push(GainPoint { value, at });
        }
    }
}

/// Backend playing the two noise channels.
pub trait AudioSink {
    /// Audio clock in seconds.
    fn current_time(&self) -> f64;
    /// Replace the automation of `channel` with `envelope`.
    fn schedule_gain(&mut self, channel: NoiseChannel, envelope: &GainEnvelope);
}

/// Ambient/burst gain state plus the sink that realises it.
pub struct AudioReactor<A: AudioSink> {
    sink: A,
    ambient: GainEnvelope,
    burst: GainEnvelope,
}

impl<A: AudioSink> AudioReactor<A> {
    /// Starts with the ambient bed at its resting level and the burst silent.
    pub fn new(mut sink: A) -> Self {
        let now = sink.current_time();
        let mut ambient = GainEnvelope::constant(AMBIENT_LEVEL);
        ambient.start = now;
        let mut burst = GainEnvelope::constant(0.0);
        burst.start = now;
        sink.schedule_gain(NoiseChannel::Ambient, &ambient);
        sink.schedule_gain(NoiseChannel::Burst, &burst);
        Self {
            sink,
            ambient,
            burst,
        }
    }

    pub fn set_ambient(&mut self, level: f32, ramp_sec: f64) {
        let now = self.sink.current_time();
        self.ambient.reschedule(now, &[(level.max(0.0), ramp_sec)]);
        self.sink
            .schedule_gain(NoiseChannel::Ambient, &self.ambient);
    }

    /// Pointer press: lift the ambient bed.
    pub fn press(&mut self) {
        self.set_ambient(AMBIENT_PRESSED_LEVEL, AMBIENT_RAMP_SEC);
    }

    /// Pointer release: settle back to the resting level.
    pub fn release(&mut self) {
        self.set_ambient(AMBIENT_LEVEL, AMBIENT_RAMP_SEC);
    }

    /// Swell the burst channel to `level` over `attack_sec`, then let it
    /// decay to silence over the fixed decay window.
    pub fn burst(&mut self, level: f32, attack_sec: f64) {
        let now = self.sink.current_time();
        self.burst
            .reschedule(now, &[(level.max(0.0), attack_sec), (0.0, BURST_DECAY_SEC)]);
        self.sink.schedule_gain(NoiseChannel::Burst, &self.burst);
    }

    /// Burst with a level drawn from the configured range.
    pub fn random_burst<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let level = rng.gen_range(BURST_LEVEL);
        self.burst(level, BURST_ATTACK_SEC);
    }

    pub fn ambient_gain(&self) -> f32 {
        self.ambient.value_at(self.sink.current_time())
    }

    pub fn burst_gain(&self) -> f32 {
        self.burst.value_at(self.sink.current_time())
    }

    pub fn ambient(&self) -> &GainEnvelope {
        &self.ambient
    }

    pub fn burst_envelope(&self) -> &GainEnvelope {
        &self.burst
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }
}

/// Fill `buf` with uniform white noise in `[-1, 1)`.
pub fn fill_white<R: Rng + ?Sized>(rng: &mut R, buf: &mut [f32]) {
    for s in buf.iter_mut() {
        *s = rng.gen_range(-1.0..1.0);
    }
}

/// Fill `buf` with pink noise (-3 dB/octave) using Paul Kellet's refined
/// filter over white noise.
pub fn fill_pink<R: Rng + ?Sized>(rng: &mut R, buf: &mut [f32]) {
    let mut b = [0.0_f32; 7];
    for s in buf.iter_mut() {
        let white: f32 = rng.gen_range(-1.0..1.0);
        b[0] = 0.99886 * b[0] + white * 0.0555179;
        b[1] = 0.99332 * b[1] + white * 0.0750759;
        b[2] = 0.96900 * b[2] + white * 0.1538520;
        b[3] = 0.86650 * b[3] + white * 0.3104856;
        b[4] = 0.55000 * b[4] + white * 0.5329522;
        b[5] = -0.7616 * b[5] - white * 0.0168980;
        let pink = b[0] + b[1] + b[2] + b[3] + b[4] + b[5] + b[6] + white * 0.5362;
        b[6] = white * 0.115926;
        *s = pink * 0.11; // roughly unity peak
    }
}
