//! CPU-side geometry: flat position arrays and their per-vertex colors.

/// How consecutive vertices of a [`Mesh`] are assembled into primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Every three vertices form one triangle.
    Triangles,
    /// Every two vertices form one line segment.
    Lines,
}

impl Topology {
    pub fn vertices_per_primitive(self) -> usize {
        match self {
            Topology::Triangles => 3,
            Topology::Lines => 2,
        }
    }

    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Topology::Lines => wgpu::PrimitiveTopology::LineList,
        }
    }
}

/// An immutable, non-indexed sequence of vertex positions (`x, y, z` triples).
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    name: String,
    positions: Vec<f32>,
    topology: Topology,
}

impl Mesh {
    pub fn new(name: impl Into<String>, positions: Vec<f32>, topology: Topology) -> Self {
        Self {
            name: name.into(),
            positions,
            topology,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// RGB colors, one triple per vertex, aligned positionally with a [`Mesh`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorAttribute(Vec<f32>);

impl ColorAttribute {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    pub fn vertex_count(&self) -> usize {
        self.0.len() / 3
    }

    pub fn triples(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.0.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }
}
