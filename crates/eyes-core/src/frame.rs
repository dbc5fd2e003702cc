use crate::assets::{MeshData, TextureData};
use crate::error::SceneError;
use crate::particles::Particle;
use glam::{Mat4, Vec3};

/// A camera-facing textured square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    pub center: Vec3,
    pub size: f32,
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug)]
pub struct FrameView<'a> {
    pub view_proj: Mat4,
    pub background: SpriteInstance,
    pub pupil: SpriteInstance,
    /// Model matrix, absent until the model has loaded.
    pub model: Option<Mat4>,
    pub particles: &'a [Particle],
    /// Postprocess block size in pixels.
    pub pixel_level: f32,
    pub resolution: [f32; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Background,
    Pupil,
}

impl TextureSlot {
    pub fn label(self) -> &'static str {
        match self {
            TextureSlot::Background => "background",
            TextureSlot::Pupil => "pupil",
        }
    }
}

/// Drawing backend. Assets may arrive at any time; a renderer simply skips
/// what it has not been given yet.
pub trait Renderer {
    fn set_viewport_size(&mut self, width: u32, height: u32);
    fn upload_texture(&mut self, slot: TextureSlot, texture: &TextureData)
        -> Result<(), SceneError>;
    fn upload_model(&mut self, mesh: &MeshData) -> Result<(), SceneError>;
    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), SceneError>;
}
