//! Autonomous look target for narrow (touch-style) viewports.

use crate::camera::Camera;
use crate::constants::{AUTO_TARGET_DISTANCE, AUTO_TARGET_MAX_MS, AUTO_TARGET_MIN_MS};
use crate::schedule::{IntervalScheduler, ScheduledTask, TimerId};
use glam::{Vec2, Vec3};
use rand::Rng;

#[derive(Debug)]
pub struct AutoTargetGenerator {
    pub min_ms: u32,
    pub max_ms: u32,
    pub distance: f32,
    task: ScheduledTask,
    target: Option<Vec3>,
}

impl Default for AutoTargetGenerator {
    fn default() -> Self {
        Self {
            min_ms: AUTO_TARGET_MIN_MS,
            max_ms: AUTO_TARGET_MAX_MS,
            distance: AUTO_TARGET_DISTANCE,
            task: ScheduledTask::default(),
            target: None,
        }
    }
}

impl AutoTargetGenerator {
    #[inline]
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    #[inline]
    pub fn timer(&self) -> Option<TimerId> {
        self.task.id()
    }

    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.task.period_ms()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.task.id().is_some()
    }

    pub fn sample_period<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.max_ms > self.min_ms {
            rng.gen_range(self.min_ms..self.max_ms)
        } else {
            self.min_ms
        }
    }

    /// World point just in front of the camera along the ray through a random
    /// point on the NDC unit circle.
    pub fn sample_target<R: Rng + ?Sized>(&self, camera: &Camera, rng: &mut R) -> Vec3 {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let ndc = Vec2::new(angle.cos(), angle.sin());
        camera.ray_from_ndc(ndc).at(self.distance)
    }

    /// Cancel any running interval and start a fresh one with a newly drawn
    /// period.
    pub fn restart<S, R>(&mut self, scheduler: &mut S, rng: &mut R) -> Option<TimerId>
    where
        S: IntervalScheduler + ?Sized,
        R: Rng + ?Sized,
    {
        let period = self.sample_period(rng);
        let id = self.task.reschedule(scheduler, period);
        log::debug!("[auto-target] interval {:?} every {} ms", id, period);
        id
    }

    pub fn stop<S: IntervalScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.task.cancel(scheduler);
        self.target = None;
    }

    /// Publish a new target directly, e.g. on activation.
    pub fn retarget<R: Rng + ?Sized>(&mut self, camera: &Camera, rng: &mut R) -> Vec3 {
        let target = self.sample_target(camera, rng);
        self.target = Some(target);
        target
    }

    /// Handle a timer firing. Firings from cancelled intervals are ignored.
    pub fn fire<R: Rng + ?Sized>(
        &mut self,
        id: TimerId,
        camera: &Camera,
        rng: &mut R,
    ) -> Option<Vec3> {
        if !self.task.is_current(id) {
            log::debug!("[auto-target] ignoring stale timer {:?}", id);
            return None;
        }
        Some(self.retarget(camera, rng))
    }
}
