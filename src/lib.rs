//! boat-scene
//!
//! A small cross-platform scene that runs natively and in the browser through
//! WebGL2. A boat turns on the spot, its passenger jumps on request and a
//! diamond orbits the passenger's head above a green line grid. The camera
//! always looks at the origin and switches between an orthographic and a
//! perspective projection.
//!
//! High-level modules
//! - `camera`: camera position, projection modes and the view uniform
//! - `config`: tunables for animation speeds, placements and projection
//! - `context`: window surface, device and queue
//! - `controls`: UI commands and their keyboard/DOM bindings
//! - `data_structures`: meshes, derived colors, the grid and the packed buffer
//! - `error`: startup error taxonomy
//! - `flow`: startup sequence and the frame loop
//! - `pipelines`: the triangle and line pipelines and their uniforms
//! - `render`: per-frame draw calls
//! - `resources`: OBJ loading
//! - `scene`: transform and animation state
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod controls;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

pub use config::SceneConfig;
pub use error::SceneError;
pub use flow::{StopHandle, run, run_with};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Browser entry point.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    run(SceneConfig::default()).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}
