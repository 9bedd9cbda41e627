//! Render pipelines and their uniform bindings.
//!
//! - `basic` builds the triangle and line pipelines from one shader
//! - `uniforms` owns the view and per-object uniform buffers

pub mod basic;
pub mod uniforms;
