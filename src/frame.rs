use crate::audio::WebNoiseSink;
use crate::config::STATS_EVERY_FRAMES;
use crate::dom;
use crate::render::CanvasSurface;
use instant::Instant;
use rand::rngs::StdRng;
use sketch_core::{AnyScene, AudioReactor, FrameStats};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedScene = Rc<RefCell<AnyScene<StdRng>>>;
pub type SharedAudio = Rc<RefCell<AudioReactor<WebNoiseSink>>>;

/// Running totals between two stats log lines.
#[derive(Default)]
struct FrameTally {
    frames: u64,
    glitched: u64,
    bursts: u64,
    failed: u64,
}

impl FrameTally {
    fn record(&mut self, stats: Option<&FrameStats>) {
        self.frames += 1;
        match stats {
            Some(s) => {
                self.glitched += s.glitched() as u64;
                self.bursts += s.bursts as u64;
            }
            None => self.failed += 1,
        }
    }
}

pub struct FrameContext {
    pub scene: SharedScene,
    pub audio: SharedAudio,
    pub canvas: web::HtmlCanvasElement,
    pub surface: CanvasSurface,
    size: (u32, u32),
    tally: FrameTally,
    window_start: Instant,
}

impl FrameContext {
    pub fn new(
        scene: SharedScene,
        audio: SharedAudio,
        canvas: web::HtmlCanvasElement,
        surface: CanvasSurface,
    ) -> Self {
        let size = (canvas.width(), canvas.height());
        Self {
            scene,
            audio,
            canvas,
            surface,
            size,
            tally: FrameTally::default(),
            window_start: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let size = (self.canvas.width(), self.canvas.height());
        if size != self.size {
            self.size = size;
            self.surface.reset();
            self.surface.set_pixel_ratio(dom::pixel_ratio());
        }

        let (Ok(mut scene), Ok(mut audio)) = (self.scene.try_borrow_mut(), self.audio.try_borrow_mut())
        else {
            return;
        };
        let result = scene.frame(&mut self.surface, &mut audio);
        match &result {
            Ok(_) => {}
            Err(e) => log::warn!("[frame] {} frame {} skipped: {}", scene.kind(), scene.frames(), e),
        }
        self.tally.record(result.as_ref().ok());

        if self.tally.frames >= STATS_EVERY_FRAMES {
            let secs = self.window_start.elapsed().as_secs_f32().max(1e-3);
            log::debug!(
                "[frame] {} t={:.2} fps={:.1} glitched={} bursts={} failed={}",
                scene.kind(),
                scene.t(),
                self.tally.frames as f32 / secs,
                self.tally.glitched,
                self.tally.bursts,
                self.tally.failed
            );
            self.tally = FrameTally::default();
            self.window_start = Instant::now();
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
