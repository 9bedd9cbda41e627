//! The single static vertex buffer shared by every scene object.
//!
//! Layout: all meshes back to back, followed by all color attributes in the
//! same order. Positions start at byte 0 and colors start right after the
//! last position. Both streams are tightly packed `vec3<f32>`.
//!
//! The draw ranges recorded here are the only thing tying a scene object to
//! its vertices on the GPU, so they are derived from the very slice order
//! that gets uploaded.

use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::{
    data_structures::mesh::{ColorAttribute, Mesh, Topology},
    error::SceneError,
};

pub const FLOAT_SIZE: wgpu::BufferAddress = std::mem::size_of::<f32>() as wgpu::BufferAddress;
pub const VEC3_SIZE: wgpu::BufferAddress = 3 * FLOAT_SIZE;

/// The vertex sub-range of one object inside the packed buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawRange {
    pub first: u32,
    pub count: u32,
    pub topology: Topology,
}

impl DrawRange {
    pub fn vertices(&self) -> Range<u32> {
        self.first..self.first + self.count
    }
}

/// Where an attribute stream lives in the buffer. A stride of [`VEC3_SIZE`]
/// means tightly packed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeBinding {
    pub offset: wgpu::BufferAddress,
    pub stride: wgpu::BufferAddress,
}

/// Packed vertex data ready for upload.
#[derive(Clone, Debug)]
pub struct PackedVertices {
    pub data: Vec<f32>,
    pub ranges: Vec<DrawRange>,
    pub position: AttributeBinding,
    pub color: AttributeBinding,
}

impl PackedVertices {
    pub fn vertex_count(&self) -> u32 {
        self.ranges.iter().map(|r| r.count).sum()
    }

    pub fn size_in_bytes(&self) -> wgpu::BufferAddress {
        self.data.len() as wgpu::BufferAddress * FLOAT_SIZE
    }
}

/// Concatenate every mesh, then every color attribute, in the given order.
///
/// Fails if any object's color count differs from its vertex count, since a
/// mismatch would silently shift every later object's colors. A trailing
/// partial primitive is rejected as well.
pub fn pack(objects: &[(&Mesh, &ColorAttribute)]) -> Result<PackedVertices, SceneError> {
    let mut ranges = Vec::with_capacity(objects.len());
    let mut first = 0u32;
    for (mesh, colors) in objects {
        let per_primitive = mesh.topology().vertices_per_primitive();
        if mesh.vertex_count() % per_primitive != 0 {
            return Err(SceneError::IncompletePrimitive {
                object: mesh.name().to_string(),
                vertices: mesh.vertex_count(),
                per_primitive,
            });
        }
        if mesh.vertex_count() != colors.vertex_count() {
            return Err(SceneError::LayoutMismatch {
                object: mesh.name().to_string(),
                positions: mesh.vertex_count(),
                colors: colors.vertex_count(),
            });
        }
        let count = mesh.vertex_count() as u32;
        ranges.push(DrawRange {
            first,
            count,
            topology: mesh.topology(),
        });
        first += count;
    }

    let total_floats: usize = objects
        .iter()
        .map(|(mesh, colors)| mesh.positions().len() + colors.values().len())
        .sum();
    let mut data = Vec::with_capacity(total_floats);
    objects
        .iter()
        .for_each(|(mesh, _)| data.extend_from_slice(mesh.positions()));
    let position_floats = data.len() as wgpu::BufferAddress;
    objects
        .iter()
        .for_each(|(_, colors)| data.extend_from_slice(colors.values()));

    Ok(PackedVertices {
        data,
        ranges,
        position: AttributeBinding {
            offset: 0,
            stride: VEC3_SIZE,
        },
        color: AttributeBinding {
            offset: position_floats * FLOAT_SIZE,
            stride: VEC3_SIZE,
        },
    })
}

/// Refuse buffers the device cannot hold, and empty ones.
pub fn check_allocation(
    size: wgpu::BufferAddress,
    limit: wgpu::BufferAddress,
) -> Result<(), SceneError> {
    if size == 0 || size > limit {
        return Err(SceneError::BufferAllocation { size, limit });
    }
    Ok(())
}

/// The GPU-resident, never modified vertex buffer.
#[derive(Debug)]
pub struct VertexBuffer {
    pub buffer: wgpu::Buffer,
    pub ranges: Vec<DrawRange>,
    pub position: AttributeBinding,
    pub color: AttributeBinding,
}

impl VertexBuffer {
    pub fn upload(device: &wgpu::Device, packed: PackedVertices) -> Result<Self, SceneError> {
        check_allocation(packed.size_in_bytes(), device.limits().max_buffer_size)?;
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Vertex Buffer"),
            contents: bytemuck::cast_slice(&packed.data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        log::info!(
            "Uploaded {} vertices ({} bytes)",
            packed.vertex_count(),
            packed.size_in_bytes()
        );
        Ok(Self {
            buffer,
            ranges: packed.ranges,
            position: packed.position,
            color: packed.color,
        })
    }

    pub fn positions(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(self.position.offset..self.color.offset)
    }

    pub fn colors(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(self.color.offset..)
    }
}

/// Describes how a vertex stream is laid out for the pipeline.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Position stream, shader location 0.
pub struct PositionStream;

impl PositionStream {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
}

impl Vertex for PositionStream {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: VEC3_SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Color stream, shader location 1.
pub struct ColorStream;

impl ColorStream {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
}

impl Vertex for ColorStream {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: VEC3_SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}
