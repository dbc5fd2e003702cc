use glam::Vec2;
use web_sys as web;

/// Pointer position in CSS pixels relative to the canvas' top-left corner.
#[inline]
pub fn pointer_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    relative_to_rect(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
    )
}

#[inline]
pub fn relative_to_rect(client: Vec2, rect_origin: Vec2) -> Vec2 {
    client - rect_origin
}

/// Backing-store size for a CSS box at the given device pixel ratio.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let w = (css_width.max(0.0) * dpr) as u32;
    let h = (css_height.max(0.0) * dpr) as u32;
    (w.max(1), h.max(1))
}

/// Prefer the canvas box; fall back to the window when the canvas has not
/// been laid out yet.
#[inline]
pub fn viewport_size(canvas_css: (f64, f64), window_inner: (f64, f64)) -> Vec2 {
    let (w, h) = if canvas_css.0 > 0.0 && canvas_css.1 > 0.0 {
        canvas_css
    } else {
        window_inner
    };
    Vec2::new(w.max(1.0) as f32, h.max(1.0) as f32)
}

#[inline]
pub fn frames_per_second(frames: u32, elapsed_secs: f32) -> f32 {
    if elapsed_secs > 0.0 {
        frames as f32 / elapsed_secs
    } else {
        0.0
    }
}
