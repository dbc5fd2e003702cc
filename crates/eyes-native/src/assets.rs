//! File-based asset loading for the desktop build.

use eyes_core::assets::{decode_model, decode_texture, MeshData, TextureData};
use eyes_core::error::SceneError;
use std::path::Path;

fn read(path: &Path) -> Result<Vec<u8>, SceneError> {
    std::fs::read(path).map_err(|e| SceneError::asset(path.display().to_string(), e))
}

pub fn load_texture(path: &Path) -> Result<TextureData, SceneError> {
    decode_texture(&read(path)?)
}

/// Load a `.gltf` or `.glb`; external buffers are resolved next to the file.
pub fn load_model(path: &Path) -> Result<MeshData, SceneError> {
    let bytes = read(path)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    decode_model(&bytes, |uri| read(&dir.join(uri)))
}
