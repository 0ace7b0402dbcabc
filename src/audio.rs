use rand::Rng;
use sketch_core::constants::{BURST_FILTER_HZ, NOISE_BUFFER_SEC};
use sketch_core::{fill_pink, fill_white, AudioSink, GainEnvelope, NoiseChannel};
use web_sys as web;

/// Web Audio graph for the two noise channels.
///
/// pink loop -> ambient gain -> destination
/// white loop -> burst gain -> band-pass -> destination
pub struct WebNoiseSink {
    ctx: web::AudioContext,
    ambient_gain: web::GainNode,
    burst_gain: web::GainNode,
    // Kept alive for the lifetime of the graph.
    _sources: [web::AudioBufferSourceNode; 2],
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx)
        .map_err(|e| anyhow::anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

fn create_noise_loop(
    audio_ctx: &web::AudioContext,
    samples: &mut [f32],
    label: &str,
) -> anyhow::Result<web::AudioBufferSourceNode> {
    let sr = audio_ctx.sample_rate();
    let buffer = audio_ctx
        .create_buffer(1, samples.len() as u32, sr)
        .map_err(|e| anyhow::anyhow!("{} buffer error: {:?}", label, e))?;
    buffer
        .copy_to_channel(samples, 0)
        .map_err(|e| anyhow::anyhow!("{} copy error: {:?}", label, e))?;
    let src = audio_ctx
        .create_buffer_source()
        .map_err(|e| anyhow::anyhow!("{} source error: {:?}", label, e))?;
    src.set_buffer(Some(&buffer));
    src.set_loop(true);
    Ok(src)
}

impl WebNoiseSink {
    /// Build the graph and start both loops. Gains start at zero; the
    /// reactor schedules the resting levels as soon as it takes the sink.
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext: {:?}", e))?;
        let len = (ctx.sample_rate() * NOISE_BUFFER_SEC).max(1.0) as usize;
        let mut samples = vec![0.0_f32; len];

        fill_pink(rng, &mut samples);
        let pink = create_noise_loop(&ctx, &mut samples, "pink")?;
        fill_white(rng, &mut samples);
        let white = create_noise_loop(&ctx, &mut samples, "white")?;

        let ambient_gain = create_gain(&ctx, 0.0, "ambient")?;
        let burst_gain = create_gain(&ctx, 0.0, "burst")?;
        let band = web::BiquadFilterNode::new(&ctx)
            .map_err(|e| anyhow::anyhow!("BiquadFilterNode error: {:?}", e))?;
        band.set_type(web::BiquadFilterType::Bandpass);
        band.frequency().set_value(BURST_FILTER_HZ);

        let dst = ctx.destination();
        _ = pink.connect_with_audio_node(&ambient_gain);
        _ = ambient_gain.connect_with_audio_node(&dst);
        _ = white.connect_with_audio_node(&burst_gain);
        _ = burst_gain.connect_with_audio_node(&band);
        _ = band.connect_with_audio_node(&dst);

        pink.start().map_err(|e| anyhow::anyhow!("pink start: {:?}", e))?;
        white.start().map_err(|e| anyhow::anyhow!("white start: {:?}", e))?;
        log::info!(
            "[audio] noise graph ready sr={} buffer={}s state={:?}",
            ctx.sample_rate(),
            NOISE_BUFFER_SEC,
            ctx.state()
        );
        Ok(Self {
            ctx,
            ambient_gain,
            burst_gain,
            _sources: [pink, white],
        })
    }

    /// Browsers keep a new context suspended until a user gesture.
    pub fn resume(&self) {
        if self.ctx.state() != web::AudioContextState::Running {
            _ = self.ctx.resume();
            log::info!("[audio] resume requested");
        }
    }
}

fn apply_envelope(param: &web::AudioParam, envelope: &GainEnvelope) -> Result<(), wasm_bindgen::JsValue> {
    param.cancel_scheduled_values(envelope.start)?;
    param.set_value_at_time(envelope.hold, envelope.start)?;
    for p in &envelope.points {
        param.linear_ramp_to_value_at_time(p.value, p.at)?;
    }
    Ok(())
}

impl AudioSink for WebNoiseSink {
    fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    fn schedule_gain(&mut self, channel: NoiseChannel, envelope: &GainEnvelope) {
        let gain = match channel {
            NoiseChannel::Ambient => self.ambient_gain.gain(),
            NoiseChannel::Burst => self.burst_gain.gain(),
        };
        let res = apply_envelope(&gain, envelope);
        if let Err(e) = res {
            log::warn!("[audio] {:?} automation rejected: {:?}", channel, e);
        }
    }
}
