//! `setInterval`-backed scheduler. Each firing is queued as an intent; the
//! scene reads it on its next tick.

use eyes_core::driver::{Driver, Intent};
use eyes_core::schedule::{IntervalScheduler, TimerId};
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Interval {
    handle: i32,
    // dropped only after clearInterval
    _closure: Closure<dyn FnMut()>,
}

pub struct WebIntervalScheduler {
    window: web::Window,
    driver: Weak<RefCell<Driver>>,
    next_id: u32,
    intervals: FnvHashMap<TimerId, Interval>,
}

impl WebIntervalScheduler {
    pub fn new(window: web::Window, driver: &Rc<RefCell<Driver>>) -> Self {
        Self {
            window,
            driver: Rc::downgrade(driver),
            next_id: 0,
            intervals: FnvHashMap::default(),
        }
    }
}

impl IntervalScheduler for WebIntervalScheduler {
    fn start_interval(&mut self, period_ms: u32) -> Option<TimerId> {
        self.next_id = self.next_id.wrapping_add(1);
        let id = TimerId(self.next_id);
        let driver = self.driver.clone();
        let closure = Closure::wrap(Box::new(move || {
            let Some(driver) = driver.upgrade() else {
                return;
            };
            match driver.try_borrow_mut() {
                Ok(mut d) => d.push(Intent::AutoTarget(id)),
                Err(_) => log::warn!("[timer] scene busy; dropped firing of {:?}", id),
            };
        }) as Box<dyn FnMut()>);
        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            ) {
            Ok(handle) => {
                self.intervals.insert(
                    id,
                    Interval {
                        handle,
                        _closure: closure,
                    },
                );
                Some(id)
            }
            Err(e) => {
                log::error!("[timer] setInterval failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(interval) = self.intervals.remove(&id) {
            self.window.clear_interval_with_handle(interval.handle);
        }
    }
}

impl Drop for WebIntervalScheduler {
    fn drop(&mut self) {
        for (_, interval) in self.intervals.drain() {
            self.window.clear_interval_with_handle(interval.handle);
        }
    }
}
