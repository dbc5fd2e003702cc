use crate::input;
use crate::schedule::WebIntervalScheduler;
use eyes_core::driver::Driver;
use eyes_core::frame::Renderer;
use eyes_core::render::GpuRenderer;
use instant::Instant;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const FPS_LOG_INTERVAL_SECS: f32 = 5.0;

pub struct FrameContext {
    pub driver: Rc<RefCell<Driver>>,
    pub scheduler: WebIntervalScheduler,
    pub renderer: Rc<RefCell<GpuRenderer>>,
    pub canvas: web::HtmlCanvasElement,
    pub rng: StdRng,

    pub last_log: Instant,
    pub frames: u32,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let report = {
            let mut driver = self.driver.borrow_mut();
            driver.tick(&mut self.scheduler, &mut self.rng)
        };

        if let Some((w, h)) = report.resized {
            let mut renderer = self.renderer.borrow_mut();
            renderer.set_viewport_size(self.canvas.width(), self.canvas.height());
            log::debug!(
                "[frame] viewport {}x{} css, {}x{} backing",
                w,
                h,
                self.canvas.width(),
                self.canvas.height()
            );
        }
        if let Some(level) = report.pixel_level {
            log::info!("[frame] pixel level {} (+{} particles)", level, report.spawned);
        }

        {
            let driver = self.driver.borrow();
            let view = driver.frame_view();
            if let Err(e) = self.renderer.borrow_mut().render(&view) {
                log::error!("[frame] render error: {}", e);
            }
        }

        self.frames += 1;
        let elapsed = self.last_log.elapsed().as_secs_f32();
        if elapsed >= FPS_LOG_INTERVAL_SECS {
            let live = self.driver.borrow().state().particles.len();
            log::debug!(
                "[frame] {:.1} fps, {} particles",
                input::frames_per_second(self.frames, elapsed),
                live
            );
            self.frames = 0;
            self.last_log = Instant::now();
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
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
