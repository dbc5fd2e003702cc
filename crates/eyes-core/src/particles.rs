//! Click bursts: spawn, integrate, expire.
//!
//! Integration is one explicit Euler step per tick with no time scaling, so
//! bursts move faster on high refresh-rate displays.

use crate::constants::{PARTICLE_REMOVAL_Y, PARTICLE_SIZE_PER_PIXEL, PARTICLE_Z};
use glam::{Vec2, Vec3};
use rand::Rng;

/// One random velocity component: `(r - bias) * scale + offset` for `r` in \[0, 1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub bias: f32,
    pub scale: f32,
    pub offset: f32,
}

impl AxisRange {
    pub const fn new(bias: f32, scale: f32, offset: f32) -> Self {
        Self {
            bias,
            scale,
            offset,
        }
    }

    #[inline]
    pub fn sample(&self, r: f32) -> f32 {
        (r - self.bias) * self.scale + self.offset
    }

    pub fn min(&self) -> f32 {
        self.sample(0.0).min(self.sample(1.0))
    }

    pub fn max(&self) -> f32 {
        self.sample(0.0).max(self.sample(1.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityRanges {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl VelocityRanges {
    /// Drifts left on average.
    pub const BIASED: Self = Self {
        x: AxisRange::new(0.3, 0.2, 0.0),
        y: AxisRange::new(0.0, 0.4, 0.1),
        z: AxisRange::new(0.5, 0.2, 0.0),
    };

    pub const SYMMETRIC: Self = Self {
        x: AxisRange::new(0.5, 0.2, 0.0),
        y: AxisRange::new(0.0, 0.3, 0.1),
        z: AxisRange::new(0.5, 0.2, 0.0),
    };

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            self.x.sample(rng.gen::<f32>()),
            self.y.sample(rng.gen::<f32>()),
            self.z.sample(rng.gen::<f32>()),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnPattern {
    /// Every particle starts at the hit point, pinned to the particle plane.
    AtHit { count: usize },
    /// Particles start evenly spaced on a circle around the clicked object.
    Ring { count: usize, radius: f32 },
}

impl SpawnPattern {
    pub fn count(&self) -> usize {
        match *self {
            SpawnPattern::AtHit { count } | SpawnPattern::Ring { count, .. } => count,
        }
    }

    fn start(&self, i: usize, hit: Vec3, object_center: Vec3) -> Vec3 {
        match *self {
            SpawnPattern::AtHit { .. } => Vec3::new(hit.x, hit.y, PARTICLE_Z),
            SpawnPattern::Ring { count, radius } => {
                let angle = (i as f32 / count.max(1) as f32) * std::f32::consts::TAU;
                let on_ring = Vec2::new(angle.cos(), angle.sin()) * radius;
                Vec3::new(
                    object_center.x + on_ring.x,
                    object_center.y + on_ring.y,
                    PARTICLE_Z,
                )
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub size: f32,
}

impl Particle {
    #[inline]
    pub fn step(&mut self, gravity: f32) {
        self.velocity.y -= gravity;
        self.position += self.velocity;
    }
}

#[derive(Clone, Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    pub gravity: f32,
    pub removal_y: f32,
    pub pattern: SpawnPattern,
    pub velocity: VelocityRanges,
}

impl ParticleSystem {
    pub fn new(gravity: f32, pattern: SpawnPattern, velocity: VelocityRanges) -> Self {
        Self {
            particles: Vec::with_capacity(pattern.count()),
            gravity,
            removal_y: PARTICLE_REMOVAL_Y,
            pattern,
            velocity,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Append one burst. Quad size follows the pixel level that is current
    /// after the click advanced it.
    pub fn burst<R: Rng + ?Sized>(
        &mut self,
        hit: Vec3,
        object_center: Vec3,
        pixel_level: f32,
        rng: &mut R,
    ) -> usize {
        let count = self.pattern.count();
        let size = pixel_level * PARTICLE_SIZE_PER_PIXEL;
        self.particles.reserve(count);
        for i in 0..count {
            self.particles.push(Particle {
                position: self.pattern.start(i, hit, object_center),
                velocity: self.velocity.sample(rng),
                size,
            });
        }
        count
    }

    /// Push a single particle; used by callers that build bursts by hand.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Integrate every live particle once and drop the ones that fell past
    /// the removal plane. Returns how many were removed.
    pub fn update(&mut self) -> usize {
        let before = self.particles.len();
        let gravity = self.gravity;
        let floor = self.removal_y;
        self.particles.retain_mut(|p| {
            p.step(gravity);
            p.position.y >= floor
        });
        before - self.particles.len()
    }
}
