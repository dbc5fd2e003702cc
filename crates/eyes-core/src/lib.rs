pub mod assets;
pub mod autotarget;
pub mod camera;
pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod frame;
pub mod hover;
pub mod look;
pub mod particles;
pub mod picking;
pub mod pixel;
#[cfg(feature = "gpu")]
pub mod render;
pub mod schedule;
pub mod sprite;
pub mod state;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use autotarget::AutoTargetGenerator;
pub use camera::{Camera, Projection, Ray};
pub use config::{SceneConfig, Variant};
pub use driver::{Driver, Intent, TickReport};
pub use error::SceneError;
pub use frame::{FrameView, Renderer, TextureSlot};
pub use schedule::{IntervalScheduler, PolledIntervals, TimerId};
pub use state::SceneState;

#[cfg(feature = "gpu")]
pub use render::GpuRenderer;
