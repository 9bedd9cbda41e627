use wgpu::util::DeviceExt;

use crate::{
    camera::{Camera, ViewUniform},
    scene::{ObjectDraw, SceneObject},
};

/// Model and world matrix of one object. One slot per [`SceneObject`].
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    model: [[f32; 4]; 4],
    world: [[f32; 4]; 4],
}

impl From<&ObjectDraw> for ObjectUniform {
    fn from(draw: &ObjectDraw) -> Self {
        Self {
            model: draw.model.into(),
            world: draw.world.into(),
        }
    }
}

pub const OBJECT_UNIFORM_SIZE: wgpu::BufferAddress =
    std::mem::size_of::<ObjectUniform>() as wgpu::BufferAddress;

/// Distance between two object slots: the uniform size rounded up to the
/// device's dynamic offset alignment.
pub fn object_slot_stride(alignment: u32) -> wgpu::BufferAddress {
    let alignment = alignment.max(1) as wgpu::BufferAddress;
    OBJECT_UNIFORM_SIZE.div_ceil(alignment) * alignment
}

fn uniform_layout_entry(
    has_dynamic_offset: bool,
    size: wgpu::BufferAddress,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset,
            min_binding_size: wgpu::BufferSize::new(size),
        },
        count: None,
    }
}

pub fn mk_view_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[uniform_layout_entry(
            false,
            std::mem::size_of::<ViewUniform>() as wgpu::BufferAddress,
        )],
        label: Some("view_bind_group_layout"),
    })
}

pub fn mk_object_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[uniform_layout_entry(true, OBJECT_UNIFORM_SIZE)],
        label: Some("object_bind_group_layout"),
    })
}

/// Uniform buffers for camera/projection (group 0) and per-object
/// model/world pairs (group 1, dynamic offset).
#[derive(Debug)]
pub struct UniformResources {
    pub view_buffer: wgpu::Buffer,
    pub view_bind_group: wgpu::BindGroup,
    pub view_bind_group_layout: wgpu::BindGroupLayout,
    pub object_buffer: wgpu::Buffer,
    pub object_bind_group: wgpu::BindGroup,
    pub object_bind_group_layout: wgpu::BindGroupLayout,
    pub object_stride: wgpu::BufferAddress,
}

impl UniformResources {
    pub fn new(device: &wgpu::Device, camera: &Camera) -> Self {
        let view_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("View Buffer"),
            contents: bytemuck::cast_slice(&[ViewUniform::new(camera)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let view_bind_group_layout = mk_view_bind_group_layout(device);
        let view_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &view_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_buffer.as_entire_binding(),
            }],
            label: Some("view_bind_group"),
        });

        let object_stride = object_slot_stride(device.limits().min_uniform_buffer_offset_alignment);
        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Buffer"),
            size: object_stride * SceneObject::ALL.len() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let object_bind_group_layout = mk_object_bind_group_layout(device);
        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &object_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(OBJECT_UNIFORM_SIZE),
                }),
            }],
            label: Some("object_bind_group"),
        });

        Self {
            view_buffer,
            view_bind_group,
            view_bind_group_layout,
            object_buffer,
            object_bind_group,
            object_bind_group_layout,
            object_stride,
        }
    }

    pub fn object_offset(&self, object: SceneObject) -> wgpu::BufferAddress {
        self.object_stride * object.slot() as wgpu::BufferAddress
    }

    /// Queue this frame's camera and object matrices.
    pub fn write(&self, queue: &wgpu::Queue, camera: &Camera, draws: &[ObjectDraw]) {
        queue.write_buffer(
            &self.view_buffer,
            0,
            bytemuck::cast_slice(&[ViewUniform::new(camera)]),
        );
        for draw in draws {
            queue.write_buffer(
                &self.object_buffer,
                self.object_offset(draw.object),
                bytemuck::cast_slice(&[ObjectUniform::from(draw)]),
            );
        }
    }
}
