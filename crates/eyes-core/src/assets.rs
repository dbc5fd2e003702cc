//! Decoding of the scene's textures and glTF model.
//!
//! Fetching bytes is the front-end's job (HTTP on the web, files on native);
//! everything here works on in-memory buffers.

use crate::error::SceneError;
use base64::Engine;
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};

#[derive(Clone, Debug)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, sRGB encoded.
    pub rgba: Vec<u8>,
}

pub fn decode_texture(bytes: &[u8]) -> Result<TextureData, SceneError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(TextureData {
        width,
        height,
        rgba: img.into_raw(),
    })
}

/// Flattened, world-space triangle soup.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.positions.iter().map(|p| Vec3::from(*p));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

pub fn parse_gltf(bytes: &[u8]) -> Result<gltf::Gltf, SceneError> {
    Ok(gltf::Gltf::from_slice(bytes)?)
}

/// Buffers that live in separate files and must be fetched by the caller,
/// as `(buffer index, relative uri)`.
pub fn external_buffer_uris(gltf: &gltf::Gltf) -> Vec<(usize, String)> {
    gltf.buffers()
        .filter_map(|b| match b.source() {
            gltf::buffer::Source::Uri(uri) if !uri.starts_with("data:") => {
                Some((b.index(), uri.to_string()))
            }
            _ => None,
        })
        .collect()
}

fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let (_, payload) = uri.split_once(";base64,")?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()
}

/// Resolve every buffer of the document: the GLB blob, embedded data URIs,
/// or bytes the caller fetched for external URIs.
pub fn resolve_buffers(
    gltf: &gltf::Gltf,
    external: &FnvHashMap<usize, Vec<u8>>,
) -> Result<Vec<Vec<u8>>, SceneError> {
    gltf.buffers()
        .map(|b| {
            let data = match b.source() {
                gltf::buffer::Source::Bin => gltf.blob.clone(),
                gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => decode_data_uri(uri),
                gltf::buffer::Source::Uri(_) => external.get(&b.index()).cloned(),
            };
            data.ok_or_else(|| SceneError::MissingBuffer {
                index: b.index(),
                uri: match b.source() {
                    gltf::buffer::Source::Uri(uri) => uri.chars().take(48).collect(),
                    gltf::buffer::Source::Bin => "<glb>".to_string(),
                },
            })
        })
        .collect()
}

/// Collect every triangle primitive reachable from the default scene with
/// node transforms applied.
pub fn mesh_from_gltf(
    document: &gltf::Document,
    buffers: &[Vec<u8>],
) -> Result<MeshData, SceneError> {
    let mut mesh = MeshData::default();
    let roots: Vec<gltf::Node> = match document.default_scene().or_else(|| document.scenes().next())
    {
        Some(scene) => scene.nodes().collect(),
        None => document.nodes().collect(),
    };
    for node in roots {
        append_node(&node, Mat4::IDENTITY, buffers, &mut mesh);
    }
    if mesh.indices.is_empty() {
        return Err(SceneError::EmptyMesh);
    }
    Ok(mesh)
}

fn append_node(node: &gltf::Node, parent: Mat4, buffers: &[Vec<u8>], out: &mut MeshData) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(m) = node.mesh() {
        for prim in m.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("[assets] skipping non-triangle primitive in mesh {}", m.index());
                continue;
            }
            let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let base = out.positions.len() as u32;
            let before = out.positions.len();
            out.positions.extend(
                positions.map(|p| world.transform_point3(Vec3::from(p)).to_array()),
            );
            let added = (out.positions.len() - before) as u32;
            match reader.read_indices() {
                Some(indices) => out.indices.extend(indices.into_u32().map(|i| base + i)),
                None => out.indices.extend(base..base + added),
            }
        }
    }
    for child in node.children() {
        append_node(&child, world, buffers, out);
    }
}

/// Decode a model, pulling each external buffer through `fetch` by its URI.
pub fn decode_model<F>(bytes: &[u8], mut fetch: F) -> Result<MeshData, SceneError>
where
    F: FnMut(&str) -> Result<Vec<u8>, SceneError>,
{
    let gltf = parse_gltf(bytes)?;
    let mut external = FnvHashMap::default();
    for (index, uri) in external_buffer_uris(&gltf) {
        external.insert(index, fetch(&uri)?);
    }
    let buffers = resolve_buffers(&gltf, &external)?;
    mesh_from_gltf(&gltf.document, &buffers)
}
