use crate::{
    data_structures::{
        buffer::{ColorStream, PositionStream, Vertex},
        mesh::Topology,
        texture::DepthBuffer,
    },
    pipelines::uniforms::UniformResources,
};

/// One pipeline per topology; both share the scene shader.
#[derive(Debug)]
pub struct ScenePipelines {
    pub triangles: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
}

impl ScenePipelines {
    pub fn for_topology(&self, topology: Topology) -> &wgpu::RenderPipeline {
        match topology {
            Topology::Triangles => &self.triangles,
            Topology::Lines => &self.lines,
        }
    }
}

pub fn mk_scene_pipelines(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    uniforms: &UniformResources,
) -> ScenePipelines {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Scene Pipeline Layout"),
        bind_group_layouts: &[
            &uniforms.view_bind_group_layout,
            &uniforms.object_bind_group_layout,
        ],
        push_constant_ranges: &[],
    });
    let shader = || wgpu::ShaderModuleDescriptor {
        label: Some("Scene Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
    };
    let vertex_layouts = [PositionStream::desc(), ColorStream::desc()];

    // Solids cull back faces. Lines have none.
    let triangles = mk_render_pipeline(
        device,
        &layout,
        config.format,
        Topology::Triangles,
        Some(wgpu::Face::Back),
        Some(DepthBuffer::FORMAT),
        &vertex_layouts,
        shader(),
    );
    let lines = mk_render_pipeline(
        device,
        &layout,
        config.format,
        Topology::Lines,
        None,
        Some(DepthBuffer::FORMAT),
        &vertex_layouts,
        shader(),
    );

    ScenePipelines { triangles, lines }
}

#[allow(clippy::too_many_arguments)]
pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    topology: Topology,
    cull_mode: Option<wgpu::Face>,
    depth_format: Option<wgpu::TextureFormat>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: wgpu::ShaderModuleDescriptor,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(shader);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Scene Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: topology.to_wgpu(),
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
