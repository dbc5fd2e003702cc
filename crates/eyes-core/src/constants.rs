use glam::Vec3;

// Shared visual tuning constants used by both web and native frontends.

// Pixelation palette cycled on every successful click
pub const PIXEL_PALETTE: [f32; 2] = [0.5, 12.0];

// Sprite layout
pub const SPRITE_SIZE: f32 = 20.0; // edge length of both textured planes
pub const BACKGROUND_Z: f32 = -5.0; // clickable orange disc
pub const PUPIL_Z: f32 = -6.0;
pub const PUPIL_SCALE: f32 = 0.38;

// Sprite follower calibration
pub const SPRITE_MAX_ANGLE_DEG: f32 = 30.0;
pub const SPRITE_LERP: f32 = 0.1;

// Particles
pub const PARTICLE_Z: f32 = -7.0; // depth plane for bursts spawned at a hit point
pub const PARTICLE_REMOVAL_Y: f32 = -20.0;
pub const PARTICLE_SIZE_PER_PIXEL: f32 = 0.05; // quad edge per unit of pixel level

// Hover feedback
pub const HOVER_LERP: f32 = 0.1;

// Auto-targeting on narrow viewports
pub const NARROW_BREAKPOINT_PX: f32 = 1024.0;
pub const AUTO_TARGET_MIN_MS: u32 = 1500;
pub const AUTO_TARGET_MAX_MS: u32 = 5000;
pub const AUTO_TARGET_DISTANCE: f32 = 0.01; // along the camera ray

// Look-at construction
pub const LOOK_AT_EPSILON: f32 = 1e-6;
pub const LOOK_AT_PARALLEL_NUDGE: f32 = 1e-4;

// Colours (sRGB 0..1)
pub const INK_SRGB: [f32; 3] = [0.349, 0.094, 0.043]; // #59180B
pub const CLEAR_SRGB: [f32; 3] = [1.0, 1.0, 1.0];

// Asset names resolved relative to the page / working directory
pub const BACKGROUND_TEXTURE_PATH: &str = "palla_arancione.png";
pub const PUPIL_TEXTURE_PATH: &str = "pallina.png";
pub const MODEL_PATH: &str = "occhi.gltf";

#[inline]
pub fn model_origin() -> Vec3 {
    Vec3::ZERO
}
