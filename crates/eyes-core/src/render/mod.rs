//! wgpu implementation of [`Renderer`](crate::frame::Renderer).
//!
//! Two passes per frame: the scene (sprites, model, particles) into an
//! offscreen Rgba8 target with depth, then the pixelation pass onto the
//! surface. The surface is configured with a non-sRGB format because the
//! post shader applies its own gamma curve.

mod helpers;
mod post;
mod targets;

use crate::assets::{MeshData, TextureData};
use crate::constants::{CLEAR_SRGB, INK_SRGB};
use crate::error::SceneError;
use crate::frame::{FrameView, Renderer, SpriteInstance, TextureSlot};
use glam::Mat4;
use helpers::srgb_to_linear;
use post::{PostResources, PostUniforms};
use targets::{RenderTargets, SCENE_FORMAT};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    ink: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct SpriteRaw {
    center: [f32; 3],
    size: f32,
    color: [f32; 4],
}

impl SpriteRaw {
    fn new(sprite: &SpriteInstance, color: [f32; 4]) -> Self {
        Self {
            center: sprite.center.to_array(),
            size: sprite.size,
            color,
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

pub struct GpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    width: u32,
    height: u32,

    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    sprite_pipeline: wgpu::RenderPipeline,
    mesh_pipeline: wgpu::RenderPipeline,
    texture_bgl: wgpu::BindGroupLayout,
    sprite_sampler: wgpu::Sampler,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    // Keep textures alive alongside the bind groups that view them
    white: (wgpu::Texture, wgpu::BindGroup),
    background: Option<(wgpu::Texture, wgpu::BindGroup)>,
    pupil: Option<(wgpu::Texture, wgpu::BindGroup)>,
    model: Option<GpuMesh>,

    targets: RenderTargets,
    post: PostResources,
    post_bind_group: wgpu::BindGroup,
    clear_color: wgpu::Color,
    ink: [f32; 4],
}

impl GpuRenderer {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, SceneError> {
        let width = width.max(1);
        let height = height.max(1);
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| SceneError::Gpu("no compatible adapter".into()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| SceneError::Gpu(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| SceneError::Gpu("surface reports no formats".into()))?;
        if format.is_srgb() {
            log::warn!("[gpu] only sRGB surface formats available; output will be brighter");
        }
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {:?} {}x{}", format, width, height);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::POST_WGSL.into()),
        });

        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });
        let texture_bgl = helpers::texture_bind_group_layout(&device, "sprite_tex_bgl");
        let sprite_sampler = helpers::nearest_sampler(&device, "sprite_nearest");

        let depth_stencil = Some(wgpu::DepthStencilState {
            format: helpers::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let sprite_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite_pl"),
            bind_group_layouts: &[&scene_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let sprite_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprite_pipeline"),
            layout: Some(&sprite_pl),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_sprite"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: (2 * std::mem::size_of::<f32>()) as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 0,
                            shader_location: 0,
                        }],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<SpriteRaw>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &[
                            wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32x3,
                                offset: 0,
                                shader_location: 1,
                            },
                            wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32,
                                offset: 12,
                                shader_location: 2,
                            },
                            wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32x4,
                                offset: 16,
                                shader_location: 3,
                            },
                        ],
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // quads are double sided
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: depth_stencil.clone(),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_sprite"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: SCENE_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let mesh_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&mesh_pl),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_mesh"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (3 * std::mem::size_of::<f32>()) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    }],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_mesh"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: SCENE_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        // Unit quad, two triangles, corners in [-0.5, 0.5]
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_capacity = 256;
        let instance_vb = Self::create_instance_buffer(&device, instance_capacity);

        let (white_tex, white_view) =
            helpers::upload_rgba(&device, &queue, "white_tex", 1, 1, &[255, 255, 255, 255]);
        let white_bg = helpers::texture_bind_group(
            &device,
            "bg_white",
            &texture_bgl,
            &white_view,
            &sprite_sampler,
        );

        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_bind_group = post::create_post_bind_group(&device, &post, &targets.color_view);

        let clear_color = wgpu::Color {
            r: srgb_to_linear(CLEAR_SRGB[0]) as f64,
            g: srgb_to_linear(CLEAR_SRGB[1]) as f64,
            b: srgb_to_linear(CLEAR_SRGB[2]) as f64,
            a: 1.0,
        };
        let ink = [
            srgb_to_linear(INK_SRGB[0]),
            srgb_to_linear(INK_SRGB[1]),
            srgb_to_linear(INK_SRGB[2]),
            1.0,
        ];

        Ok(Self {
            surface,
            device,
            queue,
            config,
            width,
            height,
            scene_uniform_buffer,
            scene_bind_group,
            sprite_pipeline,
            mesh_pipeline,
            texture_bgl,
            sprite_sampler,
            quad_vb,
            instance_vb,
            instance_capacity,
            white: (white_tex, white_bg),
            background: None,
            pupil: None,
            model: None,
            targets,
            post,
            post_bind_group,
            clear_color,
            ink,
        })
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<SpriteRaw>() * capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn ensure_instance_capacity(&mut self, needed: usize) {
        if needed > self.instance_capacity {
            self.instance_capacity = needed.next_power_of_two();
            self.instance_vb = Self::create_instance_buffer(&self.device, self.instance_capacity);
            log::debug!("[gpu] instance buffer grown to {}", self.instance_capacity);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), SceneError> {
        let surface_frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; reconfiguring");
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(SceneError::Gpu(format!("surface error: {:?}", e))),
        };
        let view = surface_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms = SceneUniforms {
            view_proj: frame.view_proj.to_cols_array_2d(),
            model: frame.model.unwrap_or(Mat4::IDENTITY).to_cols_array_2d(),
            ink: self.ink,
        };
        self.queue
            .write_buffer(&self.scene_uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        // instance 0: pupil, 1: background, 2..: particles
        let mut instances: Vec<SpriteRaw> = Vec::with_capacity(2 + frame.particles.len());
        instances.push(SpriteRaw::new(&frame.pupil, [1.0; 4]));
        instances.push(SpriteRaw::new(&frame.background, [1.0; 4]));
        instances.extend(frame.particles.iter().map(|p| SpriteRaw {
            center: p.position.to_array(),
            size: p.size,
            color: self.ink,
        }));
        self.ensure_instance_capacity(instances.len());
        self.queue
            .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&instances));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.sprite_pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            if let Some((_, bg)) = &self.pupil {
                rpass.set_bind_group(1, bg, &[]);
                rpass.draw(0..6, 0..1);
            }
            if let Some((_, bg)) = &self.background {
                rpass.set_bind_group(1, bg, &[]);
                rpass.draw(0..6, 1..2);
            }
            if instances.len() > 2 {
                rpass.set_bind_group(1, &self.white.1, &[]);
                rpass.draw(0..6, 2..instances.len() as u32);
            }
            if let (Some(mesh), Some(_)) = (&self.model, frame.model) {
                rpass.set_pipeline(&self.mesh_pipeline);
                rpass.set_bind_group(0, &self.scene_bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        let post = PostUniforms {
            resolution: frame.resolution,
            pixel_size: frame.pixel_level,
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.post.uniform_buffer, 0, bytemuck::bytes_of(&post));
        post::blit(
            &mut encoder,
            "pixelate",
            &view,
            self.clear_color,
            &self.post.pixelate_pipeline,
            &self.post_bind_group,
        );

        self.queue.submit(Some(encoder.finish()));
        surface_frame.present();
        Ok(())
    }
}

impl Renderer for GpuRenderer {
    fn set_viewport_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
        // Recreate offscreen targets and the bind group that samples them
        self.targets.recreate(&self.device, width, height);
        self.post_bind_group =
            post::create_post_bind_group(&self.device, &self.post, &self.targets.color_view);
        log::debug!("[gpu] resized to {:?}", self.targets.size());
    }

    fn upload_texture(
        &mut self,
        slot: TextureSlot,
        texture: &TextureData,
    ) -> Result<(), SceneError> {
        let expected = texture.width as usize * texture.height as usize * 4;
        if texture.width == 0 || texture.height == 0 || texture.rgba.len() != expected {
            return Err(SceneError::Gpu(format!(
                "{} texture has inconsistent size {}x{} ({} bytes)",
                slot.label(),
                texture.width,
                texture.height,
                texture.rgba.len()
            )));
        }
        let (tex, view) = helpers::upload_rgba(
            &self.device,
            &self.queue,
            slot.label(),
            texture.width,
            texture.height,
            &texture.rgba,
        );
        let bg = helpers::texture_bind_group(
            &self.device,
            slot.label(),
            &self.texture_bgl,
            &view,
            &self.sprite_sampler,
        );
        match slot {
            TextureSlot::Background => self.background = Some((tex, bg)),
            TextureSlot::Pupil => self.pupil = Some((tex, bg)),
        }
        Ok(())
    }

    fn upload_model(&mut self, mesh: &MeshData) -> Result<(), SceneError> {
        if mesh.indices.is_empty() {
            return Err(SceneError::EmptyMesh);
        }
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("model_vb"),
                contents: bytemuck::cast_slice(&mesh.positions),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("model_ib"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        self.model = Some(GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        });
        Ok(())
    }

    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), SceneError> {
        self.draw(frame)
    }
}
