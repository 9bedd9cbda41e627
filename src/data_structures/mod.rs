//! Scene data structures: geometry, derived attributes and the packed GPU buffer.
//!
//! - `mesh` holds immutable position arrays and their color attributes
//! - `attributes` derives triangle shading and synthesizes the ground grid
//! - `buffer` packs everything into the one static vertex buffer
//! - `texture` holds the depth buffer

pub mod attributes;
pub mod buffer;
pub mod mesh;
pub mod texture;
