//! Per-frame driver.
//!
//! Input handlers never touch [`SceneState`] directly: they enqueue an
//! [`Intent`], and [`Driver::tick`] drains the queue before advancing the
//! animation, so a frame always sees input in arrival order.

use crate::camera::ndc_from_pixels;
use crate::config::SceneConfig;
use crate::constants::{PUPIL_SCALE, SPRITE_SIZE};
use crate::frame::{FrameView, SpriteInstance};
use crate::schedule::{IntervalScheduler, TimerId};
use crate::state::SceneState;
use glam::Vec2;
use rand::Rng;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    /// Pointer position in viewport pixels, origin top-left.
    PointerMove { x: f32, y: f32 },
    Click { x: f32, y: f32 },
    Resize { width: f32, height: f32 },
    AutoTarget(TimerId),
    ModelLoaded,
}

/// What happened during one tick; front-ends use it for logging and to
/// forward viewport changes to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub resized: Option<(u32, u32)>,
    pub pixel_level: Option<f32>,
    pub spawned: usize,
    pub expired: usize,
    pub turned: bool,
}

pub struct Driver {
    state: SceneState,
    queue: VecDeque<Intent>,
}

impl Driver {
    pub fn new(config: SceneConfig, width: f32, height: f32) -> Self {
        Self {
            state: SceneState::new(config, width, height),
            queue: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }

    #[inline]
    pub fn push(&mut self, intent: Intent) {
        self.queue.push_back(intent);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Apply the initial layout (starting the auto-target timer if the
    /// viewport is already narrow).
    pub fn start<S, R>(&mut self, scheduler: &mut S, rng: &mut R)
    where
        S: IntervalScheduler + ?Sized,
        R: Rng + ?Sized,
    {
        let viewport = self.state.viewport;
        self.apply_layout(viewport.x, viewport.y, scheduler, rng);
        log::info!(
            "[scene] started variant={} viewport={}x{} auto={}",
            self.state.config.variant.name(),
            viewport.x,
            viewport.y,
            self.state.auto_mode
        );
    }

    /// Cancel timers owned by the scene.
    pub fn shutdown<S: IntervalScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.state.auto_target.stop(scheduler);
        self.state.auto_mode = false;
    }

    /// Drain pending input, then advance the animation by one fixed step.
    pub fn tick<S, R>(&mut self, scheduler: &mut S, rng: &mut R) -> TickReport
    where
        S: IntervalScheduler + ?Sized,
        R: Rng + ?Sized,
    {
        let mut report = TickReport::default();
        while let Some(intent) = self.queue.pop_front() {
            self.handle(intent, scheduler, rng, &mut report);
        }

        report.expired = self.state.particles.update();

        let st = &mut self.state;
        let target = st.look_target();
        let origin = st.origin;
        if let Some(model) = st.model.as_mut() {
            if let Some(target) = target {
                report.turned = st.look.update(target, model);
            }
            st.follower.update(model.rotation, origin, &mut st.pupil);
        }

        if let Some(hover) = st.hover.as_mut() {
            st.background_scale = hover.update(st.hovered);
        }

        st.tick += 1;
        report
    }

    fn handle<S, R>(
        &mut self,
        intent: Intent,
        scheduler: &mut S,
        rng: &mut R,
        report: &mut TickReport,
    ) where
        S: IntervalScheduler + ?Sized,
        R: Rng + ?Sized,
    {
        match intent {
            Intent::PointerMove { x, y } => {
                let ndc = self.ndc(x, y);
                self.state.pointer.ndc = ndc;
                self.state.hovered = self.state.hit_clickable(ndc).is_some();
            }
            Intent::Click { x, y } => {
                let ndc = self.ndc(x, y);
                self.state.pointer.ndc = ndc;
                if let Some(hit) = self.state.hit_clickable(ndc) {
                    let st = &mut self.state;
                    let level = st.pixel.advance();
                    let center = st.background_center();
                    report.spawned += st.particles.burst(hit, center, level, rng);
                    report.pixel_level = Some(level);
                    log::debug!(
                        "[click] hit ({:.2},{:.2}) pixel={} live={}",
                        hit.x,
                        hit.y,
                        level,
                        st.particles.len()
                    );
                }
            }
            Intent::Resize { width, height } => {
                // minimised windows report 0x0
                if width < 1.0 || height < 1.0 {
                    log::debug!("[layout] ignoring {}x{} resize", width, height);
                    return;
                }
                self.apply_layout(width, height, scheduler, rng);
                report.resized = Some((width.max(1.0) as u32, height.max(1.0) as u32));
            }
            Intent::AutoTarget(id) => {
                if self.state.auto_mode {
                    let camera = self.state.camera.clone();
                    self.state.auto_target.fire(id, &camera, rng);
                }
            }
            Intent::ModelLoaded => {
                self.state.model_loaded();
                log::info!("[scene] model attached");
            }
        }
    }

    fn ndc(&self, x: f32, y: f32) -> Vec2 {
        ndc_from_pixels(x, y, self.state.viewport.x, self.state.viewport.y)
    }

    fn apply_layout<S, R>(&mut self, width: f32, height: f32, scheduler: &mut S, rng: &mut R)
    where
        S: IntervalScheduler + ?Sized,
        R: Rng + ?Sized,
    {
        let st = &mut self.state;
        st.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        st.camera.set_viewport(st.viewport.x, st.viewport.y);

        let origin = st.config.origin_for_width(width);
        if origin != st.origin {
            let shift = (origin - st.origin).extend(0.0);
            st.origin = origin;
            st.pupil += shift;
            if let Some(model) = st.model.as_mut() {
                model.position += shift;
            }
        }

        let narrow = st.config.auto_target && st.config.is_narrow(width);
        if narrow {
            if !st.auto_mode {
                let camera = st.camera.clone();
                st.auto_target.retarget(&camera, rng);
                log::info!("[layout] narrow viewport ({}px): auto-targeting", width);
            }
            // period is re-drawn on every layout change
            st.auto_target.restart(scheduler, rng);
        } else if st.auto_mode {
            st.auto_target.stop(scheduler);
            log::info!("[layout] wide viewport ({}px): following pointer", width);
        }
        st.auto_mode = narrow;

        // the disc moved under a still pointer
        st.hovered = st.hit_clickable(st.pointer.ndc).is_some();
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        let st = &self.state;
        FrameView {
            view_proj: st.camera.view_projection(),
            background: SpriteInstance {
                center: st.background_center(),
                size: SPRITE_SIZE * st.background_scale,
            },
            pupil: SpriteInstance {
                center: st.pupil,
                size: SPRITE_SIZE * PUPIL_SCALE,
            },
            model: st.model.map(|m| m.matrix()),
            particles: st.particles.particles(),
            pixel_level: st.pixel.level(),
            resolution: [st.viewport.x, st.viewport.y],
        }
    }
}
