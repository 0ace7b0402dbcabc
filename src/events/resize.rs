use crate::dom;
use crate::frame::SharedScene;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keep the canvas backing store and the scene viewport at window size.
pub fn wire_window_resize(canvas: &web::HtmlCanvasElement, scene: &SharedScene) {
    let canvas = canvas.clone();
    let scene = scene.clone();
    let closure = Closure::wrap(Box::new(move || {
        let size = dom::sync_canvas_to_viewport(&canvas);
        if let Ok(mut scene) = scene.try_borrow_mut() {
            scene.resize(size.css_width, size.css_height);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
