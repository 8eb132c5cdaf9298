use viz_core::VizError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn container_by_id(id: &str) -> Result<web::HtmlElement, VizError> {
    web::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        .ok_or_else(|| VizError::MissingContainer(id.to_string()))
}

/// Append a canvas filling the container. The backing pixel size is synced
/// separately so it tracks CSS size times devicePixelRatio.
pub fn create_canvas(container: &web::HtmlElement) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = web::window()
        .and_then(|w| w.document())
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let style = canvas.style();
    style.set_property("width", "100%").ok();
    style.set_property("height", "100%").ok();
    style.set_property("display", "block").ok();
    style.set_property("touch-action", "none").ok();
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(canvas)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Keep the canvas backing size in step with window resizes. The render loop
/// picks the new size up on its next frame via `resize_if_needed`.
pub fn wire_resize(canvas: &web::HtmlCanvasElement) {
    let Some(window) = web::window() else {
        return;
    };
    let canvas_resize = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

/// Client (CSS pixel) coordinates to canvas backing-pixel coordinates.
pub fn canvas_point(canvas: &web::HtmlCanvasElement, client_x: f32, client_y: f32) -> glam::Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = client_x - rect.left() as f32;
    let y_css = client_y - rect.top() as f32;
    let sx = (x_css / (rect.width() as f32).max(1.0)) * canvas.width() as f32;
    let sy = (y_css / (rect.height() as f32).max(1.0)) * canvas.height() as f32;
    glam::Vec2::new(sx, sy)
}
