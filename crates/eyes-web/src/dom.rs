use crate::input;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const CANVAS_ID: &str = "app-canvas";
const VARIANT_ATTRIBUTE: &str = "data-variant";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Keep the canvas backing store at CSS size times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let (w_px, h_px) = input::backing_size(rect.width(), rect.height(), dpr);
    if canvas.width() != w_px || canvas.height() != h_px {
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

/// Viewport in CSS pixels, as used for pointer mapping and the layout
/// breakpoint.
pub fn css_viewport(canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let inner = web::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
            (width, height)
        })
        .unwrap_or((1.0, 1.0));
    input::viewport_size((rect.width(), rect.height()), inner)
}

#[inline]
pub fn variant_attribute(canvas: &web::HtmlCanvasElement) -> Option<String> {
    canvas.get_attribute(VARIANT_ATTRIBUTE)
}
