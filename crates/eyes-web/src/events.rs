use crate::dom;
use crate::input;
use eyes_core::driver::{Driver, Intent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn push(driver: &Rc<RefCell<Driver>>, intent: Intent) {
    match driver.try_borrow_mut() {
        Ok(mut d) => d.push(intent),
        Err(_) => log::warn!("[events] scene busy; dropped {:?}", intent),
    }
}

/// Pointer move and click are tracked on the whole window so the eyes keep
/// following outside the canvas box.
pub fn wire_pointer_events(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    driver: &Rc<RefCell<Driver>>,
) {
    {
        let driver = driver.clone();
        let canvas = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let pos = input::pointer_css(&ev, &canvas);
            push(&driver, Intent::PointerMove { x: pos.x, y: pos.y });
        }) as Box<dyn FnMut(_)>);
        window
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
    {
        let driver = driver.clone();
        let canvas = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let pos = input::pointer_css(&ev, &canvas);
            push(&driver, Intent::Click { x: pos.x, y: pos.y });
        }) as Box<dyn FnMut(_)>);
        window
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
}

pub fn wire_resize(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    driver: &Rc<RefCell<Driver>>,
) {
    let driver = driver.clone();
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
        let viewport = dom::css_viewport(&canvas);
        push(
            &driver,
            Intent::Resize {
                width: viewport.x,
                height: viewport.y,
            },
        );
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}
