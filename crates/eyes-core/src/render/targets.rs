use super::helpers;
use wgpu;

/// Offscreen targets for the scene pass.
///
/// The scene is drawn into `color_*` (linear Rgba8) with a matching depth
/// buffer; the pixelation pass then samples `color_view` with nearest
/// filtering.
pub(crate) struct RenderTargets {
    pub(crate) color_tex: wgpu::Texture,
    pub(crate) color_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

pub(crate) const SCENE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (color_tex, color_view) = helpers::create_texture(
            device,
            "scene_color",
            width,
            height,
            SCENE_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let (depth_tex, depth_view) = helpers::create_texture(
            device,
            "scene_depth",
            width,
            height,
            helpers::DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        Self {
            color_tex,
            color_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        let s = self.color_tex.size();
        let d = self.depth_tex.size();
        debug_assert_eq!((s.width, s.height), (d.width, d.height));
        (s.width, s.height)
    }
}
