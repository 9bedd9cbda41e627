//! Per-frame drawing of the scene objects.
//!
//! [`Renderer`] owns the static vertex buffer, both pipelines and the uniform
//! buffers. Each frame it uploads the camera and one model/world pair per
//! object, then issues one draw per object over that object's vertex range.
//! It never mutates the scene.

use std::iter;

use crate::{
    context::Context,
    data_structures::buffer::{DrawRange, VertexBuffer},
    pipelines::{
        basic::{ScenePipelines, mk_scene_pipelines},
        uniforms::UniformResources,
    },
    scene::{ObjectDraw, Scene},
};

/// Everything needed to issue one draw: where the uniforms live and which
/// vertices to read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub draw: ObjectDraw,
    pub range: DrawRange,
    pub uniform_offset: wgpu::DynamicOffset,
}

/// Pair each object with its vertex range and uniform slot.
///
/// Objects without a recorded range are skipped with a warning.
pub fn draw_calls(
    draws: &[ObjectDraw],
    ranges: &[DrawRange],
    slot_stride: wgpu::BufferAddress,
) -> Vec<DrawCall> {
    draws
        .iter()
        .filter_map(|draw| {
            let slot = draw.object.slot();
            let Some(range) = ranges.get(slot) else {
                log::warn!("no vertex range recorded for {:?}", draw.object);
                return None;
            };
            Some(DrawCall {
                draw: *draw,
                range: *range,
                uniform_offset: (slot_stride * slot as wgpu::BufferAddress) as wgpu::DynamicOffset,
            })
        })
        .collect()
}

#[derive(Debug)]
pub struct Renderer {
    pipelines: ScenePipelines,
    uniforms: UniformResources,
    vertices: VertexBuffer,
}

impl Renderer {
    pub fn new(ctx: &Context, scene: &Scene, vertices: VertexBuffer) -> Self {
        let uniforms = UniformResources::new(&ctx.device, &scene.camera);
        let pipelines = mk_scene_pipelines(&ctx.device, &ctx.config, &uniforms);
        Self {
            pipelines,
            uniforms,
            vertices,
        }
    }

    pub fn render(&self, ctx: &Context, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let draws = scene.draws();
        self.uniforms.write(&ctx.queue, &scene.camera, &draws);
        let calls = draw_calls(&draws, &self.vertices.ranges, self.uniforms.object_stride);

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_buffer.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.uniforms.view_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertices.positions());
            render_pass.set_vertex_buffer(1, self.vertices.colors());

            for call in calls {
                if call.range.count == 0 {
                    continue;
                }
                render_pass.set_pipeline(self.pipelines.for_topology(call.range.topology));
                render_pass.set_bind_group(
                    1,
                    &self.uniforms.object_bind_group,
                    &[call.uniform_offset],
                );
                render_pass.draw(call.range.vertices(), 0..1);
            }
        }

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
