mod assets;
mod cli;

use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use eyes_core::constants::{BACKGROUND_TEXTURE_PATH, MODEL_PATH, PUPIL_TEXTURE_PATH};
use eyes_core::{Driver, GpuRenderer, Intent, PolledIntervals, Renderer, SceneConfig, TextureSlot};

fn load_assets(renderer: &mut GpuRenderer, driver: &mut Driver, dir: &std::path::Path) {
    for (slot, name) in [
        (TextureSlot::Background, BACKGROUND_TEXTURE_PATH),
        (TextureSlot::Pupil, PUPIL_TEXTURE_PATH),
    ] {
        let path = dir.join(name);
        match assets::load_texture(&path).and_then(|t| renderer.upload_texture(slot, &t)) {
            Ok(()) => log::info!("[assets] {} texture from {}", slot.label(), path.display()),
            Err(e) => log::error!("[assets] {}", e),
        }
    }
    let path = dir.join(MODEL_PATH);
    match assets::load_model(&path) {
        Ok(mesh) => match renderer.upload_model(&mesh) {
            Ok(()) => {
                driver.push(Intent::ModelLoaded);
                log::info!(
                    "[assets] model {} ({} triangles)",
                    path.display(),
                    mesh.triangle_count()
                );
            }
            Err(e) => log::error!("[assets] {}", e),
        },
        Err(e) => log::error!("[assets] {}", e),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = cli::Args::parse();
    let variant = args.variant();
    log::info!("variant: {}", variant.name());

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Pixel eyes (native)")
            .with_inner_size(LogicalSize::new(1280.0, 800.0))
            .build(&event_loop)?,
    );

    let size = window.inner_size();
    let scale = window.scale_factor();
    let logical: LogicalSize<f32> = size.to_logical(scale);

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone())?;
    let mut renderer = pollster::block_on(GpuRenderer::new(
        &instance,
        surface,
        size.width,
        size.height,
    ))?;

    let mut driver = Driver::new(
        SceneConfig::for_variant(variant),
        logical.width,
        logical.height,
    );
    let mut scheduler = PolledIntervals::new();
    let mut rng = rand::thread_rng();
    driver.start(&mut scheduler, &mut rng);
    load_assets(&mut renderer, &mut driver, &args.asset_dir);

    let start = Instant::now();
    let mut cursor = LogicalPosition::new(0.0_f32, 0.0_f32);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                driver.shutdown(&mut scheduler);
                elwt.exit();
            }
            WindowEvent::Resized(size) => {
                renderer.set_viewport_size(size.width, size.height);
                let logical: LogicalSize<f32> = size.to_logical(window.scale_factor());
                driver.push(Intent::Resize {
                    width: logical.width,
                    height: logical.height,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                cursor = position.to_logical(window.scale_factor());
                driver.push(Intent::PointerMove {
                    x: cursor.x,
                    y: cursor.y,
                });
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => driver.push(Intent::Click {
                x: cursor.x,
                y: cursor.y,
            }),
            _ => {}
        },
        Event::AboutToWait => {
            let now_ms = start.elapsed().as_millis() as u64;
            for id in scheduler.poll(now_ms) {
                driver.push(Intent::AutoTarget(id));
            }
            let report = driver.tick(&mut scheduler, &mut rng);
            if let Some(level) = report.pixel_level {
                log::info!("pixel level {} (+{} particles)", level, report.spawned);
            }
            match renderer.render(&driver.frame_view()) {
                Ok(()) => window.request_redraw(),
                Err(e) => {
                    log::error!("render error: {}", e);
                    elwt.exit();
                }
            }
        }
        _ => {}
    })?;
    Ok(())
}
