/**
 * This module contains all logic for loading meshes from external files.
 */
pub mod mesh;

use crate::{config::AssetNames, data_structures::mesh::Mesh, error::SceneError};

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    use anyhow::Context;

    let window = web_sys::window().context("no browser window")?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| anyhow::anyhow!("page origin is not readable"))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.error_for_status()?.text().await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        std::fs::read_to_string(path)?
    };

    Ok(txt)
}

/// Fetch and parse one OBJ resource.
pub async fn load_mesh(file_name: &str) -> Result<Mesh, SceneError> {
    let obj_text = load_string(file_name)
        .await
        .map_err(|e| SceneError::Asset {
            name: file_name.to_string(),
            reason: format!("{e:#}"),
        })?;
    let mesh = mesh::parse_obj(file_name, &obj_text)?;
    log::info!("Loaded {} ({} vertices)", file_name, mesh.vertex_count());
    Ok(mesh)
}

/// The three solid meshes of the scene.
#[derive(Clone, Debug)]
pub struct SceneMeshes {
    pub boat: Mesh,
    pub man: Mesh,
    pub diamond: Mesh,
}

/// Load boat, man and diamond one after another. The first failure aborts.
pub async fn load_scene_meshes(assets: &AssetNames) -> Result<SceneMeshes, SceneError> {
    let boat = load_mesh(&assets.boat).await?;
    let man = load_mesh(&assets.man).await?;
    let diamond = load_mesh(&assets.diamond).await?;
    Ok(SceneMeshes { boat, man, diamond })
}
