//! Error taxonomy for scene startup.
//!
//! Every failure listed here aborts startup before the render loop begins.
//! Nothing is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to acquire a rendering context: {0}")]
    Context(String),

    #[error("failed to load asset {name}: {reason}")]
    Asset { name: String, reason: String },

    #[error("failed to parse OBJ mesh {name}")]
    Parse {
        name: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("OBJ mesh {name} contains no triangles")]
    EmptyMesh { name: String },

    #[error("OBJ mesh {name} references vertex {index} but only {available} exist")]
    FaceIndex {
        name: String,
        index: u32,
        available: usize,
    },

    #[error(
        "invalid grid spacing ({row}, {column}): spacing must be positive, finite and yield at most {max_lines} lines per axis"
    )]
    GridSpacing { row: f32, column: f32, max_lines: u32 },

    #[error("{object} has {vertices} vertices, not a whole number of {per_primitive}-vertex primitives")]
    IncompletePrimitive {
        object: String,
        vertices: usize,
        per_primitive: usize,
    },

    #[error("{object} has {colors} color vertices but {positions} position vertices")]
    LayoutMismatch {
        object: String,
        positions: usize,
        colors: usize,
    },

    #[error("cannot allocate a vertex buffer of {size} bytes (device limit {limit} bytes)")]
    BufferAllocation { size: u64, limit: u64 },
}
