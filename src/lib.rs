#![cfg(target_arch = "wasm32")]
use rand::rngs::StdRng;
use rand::SeedableRng;
use sketch_core::{AnyScene, AudioReactor};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod config;
mod density;
mod dom;
mod events;
mod frame;
mod render;

use config::{PageConfig, SEED_ATTR, SKETCH_ATTR};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sketch-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn read_page_config(canvas: &web::HtmlCanvasElement) -> anyhow::Result<PageConfig> {
    let sketch = canvas.get_attribute(SKETCH_ATTR);
    let seed = canvas.get_attribute(SEED_ATTR);
    PageConfig::from_attributes(sketch.as_deref(), seed.as_deref())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::find_or_create_canvas(&document)?;
    dom::prepare_page(&document, &canvas);
    let size = dom::sync_canvas_to_viewport(&canvas);

    let cfg = read_page_config(&canvas)?;
    log::info!(
        "[config] sketch={} seed={} dpr={}",
        cfg.sketch,
        cfg.seed.map_or_else(|| "entropy".to_string(), |s| s.to_string()),
        size.pixel_ratio
    );
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // The noise buffers draw from the page RNG first so a fixed seed also
    // fixes the audio.
    let sink = audio::WebNoiseSink::build(&mut rng)?;
    let audio = Rc::new(RefCell::new(AudioReactor::new(sink)));

    let scene = AnyScene::new(cfg.sketch, size.css_width, size.css_height, rng)?;
    let scene = Rc::new(RefCell::new(scene));

    let mut surface = render::CanvasSurface::new(&canvas)?;
    surface.set_pixel_ratio(size.pixel_ratio);
    events::wire_pointer_handlers(&canvas, &audio);
    events::wire_window_resize(&canvas, &scene);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        scene, audio, canvas, surface,
    )));
    frame::start_loop(frame_ctx);
    Ok(())
}
