use crate::config::CANVAS_ID;
use crate::density::CanvasSize;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The sketch canvas, created full-page when the document has none.
pub fn find_or_create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(el) = document.get_element_by_id(CANVAS_ID) {
        return el
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("#{CANVAS_ID} is not a canvas: {:?}", e));
    }
    let el = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?;
    el.set_id(CANVAS_ID);
    let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
    body.append_child(&el)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    log::info!("[dom] created #{}", CANVAS_ID);
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Strip page margins and make the canvas a block so it can fill the viewport
/// without scrollbars.
pub fn prepare_page(document: &web::Document, canvas: &web::HtmlCanvasElement) {
    if let Some(body) = document.body() {
        _ = body.style().set_property("margin", "0");
    }
    _ = canvas.style().set_property("display", "block");
}

/// Device pixels per CSS pixel, 1 when the window can't say.
pub fn pixel_ratio() -> f64 {
    web::window().map_or(1.0, |w| w.device_pixel_ratio())
}

/// Size the canvas to the window: CSS size equals the inner size and the
/// backing store is scaled by the device pixel ratio.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement) -> CanvasSize {
    let Some(w) = web::window() else {
        return CanvasSize::new(canvas.width() as f64, canvas.height() as f64, 1.0);
    };
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    let size = CanvasSize::new(
        px(w.inner_width()),
        px(w.inner_height()),
        w.device_pixel_ratio(),
    );
    canvas.set_width(size.backing_width());
    canvas.set_height(size.backing_height());
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", size.css_width));
    _ = style.set_property("height", &format!("{}px", size.css_height));
    size
}
