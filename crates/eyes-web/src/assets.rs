//! Fetch-based asset loading. Every asset loads independently; a failure is
//! logged and that part of the scene simply stays hidden.

use eyes_core::assets::{
    decode_texture, external_buffer_uris, mesh_from_gltf, parse_gltf, resolve_buffers,
};
use eyes_core::constants::{BACKGROUND_TEXTURE_PATH, MODEL_PATH, PUPIL_TEXTURE_PATH};
use eyes_core::driver::{Driver, Intent};
use eyes_core::error::SceneError;
use eyes_core::frame::{Renderer, TextureSlot};
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, SceneError> {
    let window = web::window().ok_or_else(|| SceneError::asset(url, "no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| SceneError::asset(url, format!("{:?}", e)))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| SceneError::asset(url, format!("{:?}", e)))?;
    if !resp.ok() {
        return Err(SceneError::asset(url, format!("HTTP {}", resp.status())));
    }
    let buf = resp
        .array_buffer()
        .map_err(|e| SceneError::asset(url, format!("{:?}", e)))?;
    let buf = JsFuture::from(buf)
        .await
        .map_err(|e| SceneError::asset(url, format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Resolve a buffer uri relative to the model's location.
fn sibling_url(base: &str, relative: &str) -> String {
    match base.rfind('/') {
        Some(i) => format!("{}{}", &base[..=i], relative),
        None => relative.to_string(),
    }
}

async fn load_texture<R: Renderer>(
    renderer: &Rc<RefCell<R>>,
    slot: TextureSlot,
    url: &str,
) -> Result<(), SceneError> {
    let bytes = fetch_bytes(url).await?;
    let texture = decode_texture(&bytes)?;
    renderer.borrow_mut().upload_texture(slot, &texture)?;
    log::info!(
        "[assets] {} texture {}x{} from {}",
        slot.label(),
        texture.width,
        texture.height,
        url
    );
    Ok(())
}

async fn load_model<R: Renderer>(
    renderer: &Rc<RefCell<R>>,
    driver: &Rc<RefCell<Driver>>,
    url: &str,
) -> Result<(), SceneError> {
    let bytes = fetch_bytes(url).await?;
    let gltf = parse_gltf(&bytes)?;
    let mut external = FnvHashMap::default();
    for (index, uri) in external_buffer_uris(&gltf) {
        let data = fetch_bytes(&sibling_url(url, &uri)).await?;
        external.insert(index, data);
    }
    let buffers = resolve_buffers(&gltf, &external)?;
    let mesh = mesh_from_gltf(&gltf.document, &buffers)?;
    renderer.borrow_mut().upload_model(&mesh)?;
    driver.borrow_mut().push(Intent::ModelLoaded);
    log::info!(
        "[assets] model {} ({} triangles)",
        url,
        mesh.triangle_count()
    );
    Ok(())
}

/// Kick off all three loads concurrently.
pub fn spawn_scene_assets<R: Renderer + 'static>(
    renderer: Rc<RefCell<R>>,
    driver: Rc<RefCell<Driver>>,
) {
    for (slot, url) in [
        (TextureSlot::Background, BACKGROUND_TEXTURE_PATH),
        (TextureSlot::Pupil, PUPIL_TEXTURE_PATH),
    ] {
        let renderer = renderer.clone();
        spawn_local(async move {
            if let Err(e) = load_texture(&renderer, slot, url).await {
                log::error!("[assets] {}", e);
            }
        });
    }
    spawn_local(async move {
        if let Err(e) = load_model(&renderer, &driver, MODEL_PATH).await {
            log::error!("[assets] {}", e);
        }
    });
}
