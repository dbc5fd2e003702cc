// Texture and glTF decoding from in-memory bytes.

use base64::Engine;
use eyes_core::assets::{
    decode_model, decode_texture, external_buffer_uris, parse_gltf, resolve_buffers,
};
use eyes_core::error::SceneError;
use fnv::FnvHashMap;
use glam::Vec3;

fn triangle_bytes() -> Vec<u8> {
    let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    bytemuck::cast_slice(&positions).to_vec()
}

fn gltf_json(uri: &str) -> String {
    format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0] }}],
  "nodes": [{{ "mesh": 0, "translation": [1.0, 0.0, 0.0] }}],
  "meshes": [{{ "primitives": [{{ "attributes": {{ "POSITION": 0 }} }}] }}],
  "accessors": [{{
    "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
    "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
  }}],
  "bufferViews": [{{ "buffer": 0, "byteLength": 36 }}],
  "buffers": [{{ "byteLength": 36, "uri": "{uri}" }}]
}}"#
    )
}

#[test]
fn embedded_buffer_model_decodes_with_node_transform() {
    let encoded = base64::engine::general_purpose::STANDARD.encode(triangle_bytes());
    let json = gltf_json(&format!("data:application/octet-stream;base64,{encoded}"));
    let mesh = decode_model(json.as_bytes(), |uri| panic!("unexpected fetch of {uri}")).unwrap();
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    let (lo, hi) = mesh.bounds().unwrap();
    assert!(lo.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-6));
    assert!(hi.abs_diff_eq(Vec3::new(2.0, 1.0, 0.0), 1e-6));
}

#[test]
fn external_buffers_are_reported_and_required() {
    let json = gltf_json("occhi.bin");
    let gltf = parse_gltf(json.as_bytes()).unwrap();
    assert_eq!(external_buffer_uris(&gltf), vec![(0, "occhi.bin".to_string())]);

    let missing = resolve_buffers(&gltf, &FnvHashMap::default());
    assert!(matches!(missing, Err(SceneError::MissingBuffer { index: 0, .. })));

    let mut requested = Vec::new();
    let mesh = decode_model(json.as_bytes(), |uri| {
        requested.push(uri.to_string());
        Ok(triangle_bytes())
    })
    .unwrap();
    assert_eq!(requested, vec!["occhi.bin".to_string()]);
    assert_eq!(mesh.positions.len(), 3);

    let failed = decode_model(json.as_bytes(), |uri| {
        Err(SceneError::MissingBuffer {
            index: 0,
            uri: uri.to_string(),
        })
    });
    assert!(matches!(failed, Err(SceneError::MissingBuffer { index: 0, .. })));
}

#[test]
fn garbage_model_is_an_error() {
    let result = decode_model(b"not gltf", |_| Ok(Vec::new()));
    assert!(matches!(result, Err(SceneError::Gltf(_))));
}

#[test]
fn png_texture_decodes_to_rgba() {
    let img = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    let tex = decode_texture(&bytes).unwrap();
    assert_eq!((tex.width, tex.height), (2, 1));
    assert_eq!(tex.rgba, vec![255, 0, 0, 255, 0, 0, 255, 128]);
}

#[test]
fn corrupt_texture_is_a_decode_error() {
    let err = decode_texture(&[0x89, b'P', b'N', b'G', 0, 1, 2]).unwrap_err();
    assert!(matches!(err, SceneError::Decode(_)));
    assert!(err.to_string().starts_with("failed to decode texture"));
}
