use thiserror::Error;

/// Failures surfaced by asset decoding and the renderer.
///
/// None of these are fatal to the scene: callers log them and keep drawing
/// whatever did load.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to load asset `{path}`: {reason}")]
    Asset { path: String, reason: String },
    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),
    #[error("invalid glTF document: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("glTF buffer {index} is unavailable ({uri})")]
    MissingBuffer { index: usize, uri: String },
    #[error("model contains no triangle geometry")]
    EmptyMesh,
    #[error("gpu: {0}")]
    Gpu(String),
}

impl SceneError {
    pub fn asset(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Asset {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
