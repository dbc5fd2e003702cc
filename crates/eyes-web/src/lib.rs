#![cfg(target_arch = "wasm32")]
mod assets;
mod dom;
mod events;
mod frame;
pub mod input;
mod schedule;

use eyes_core::config::{SceneConfig, Variant};
use eyes_core::driver::Driver;
use eyes_core::render::GpuRenderer;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("eyes-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, dom::CANVAS_ID)?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    let (width_px, height_px) = dom::sync_canvas_backing_size(&canvas);
    let viewport = dom::css_viewport(&canvas);

    let variant = Variant::from_name_or_default(dom::variant_attribute(&canvas).as_deref());
    log::info!("variant: {}", variant.name());
    let driver = Rc::new(RefCell::new(Driver::new(
        SceneConfig::for_variant(variant),
        viewport.x,
        viewport.y,
    )));

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let renderer = GpuRenderer::new(&instance, surface, width_px, height_px)
        .await
        .map_err(|e| anyhow::anyhow!("WebGPU init error: {}", e))?;
    let renderer = Rc::new(RefCell::new(renderer));

    let mut scheduler = schedule::WebIntervalScheduler::new(window.clone(), &driver);
    let mut rng = StdRng::from_entropy();
    driver.borrow_mut().start(&mut scheduler, &mut rng);

    events::wire_pointer_events(&window, &canvas, &driver);
    events::wire_resize(&window, &canvas, &driver);
    assets::spawn_scene_assets(renderer.clone(), driver.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        driver,
        scheduler,
        renderer,
        canvas,
        rng,
        last_log: Instant::now(),
        frames: 0,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
