use crate::frame::SharedAudio;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Press on the canvas swells the ambient bed; release anywhere restores it.
pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, audio: &SharedAudio) {
    wire_pointerdown(canvas, audio);
    if let Some(window) = web::window() {
        for name in ["pointerup", "pointercancel"] {
            wire_release(&window, name, audio);
        }
    }
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, audio: &SharedAudio) {
    let audio = audio.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let Ok(mut reactor) = audio.try_borrow_mut() else {
            return;
        };
        reactor.sink().resume();
        reactor.press();
        log::debug!("[pointer] press id={}", ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_release(window: &web::Window, name: &'static str, audio: &SharedAudio) {
    let audio = audio.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if let Ok(mut reactor) = audio.try_borrow_mut() {
            reactor.release();
            log::debug!("[pointer] {}", name);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    closure.forget();
}
