use std::sync::Arc;

use wgpu::{
    DepthBiasState, Device, MultisampleState, PipelineCompilationOptions, RenderPassDescriptor,
    ShaderSource, StencilState,
};

use crate::{
    camera::Viewport,
    rendering::{
        draw_list::{PathDraw, PathUniform},
        dynamic_uniform::DynamicUniformBuffer,
        orbit_paths::{OrbitPathBuffer, ORBIT_PATH_VBL},
        passes::pass::{Pass, SceneTextureViews},
        render_common::RenderCommon,
        shader_loader::{PipelineCache, PipelineCacheBuilder, PipelineId, ShaderDefinition},
        texture::DepthTexture,
    },
};

const FLAT_COLOR_SHADER: ShaderDefinition = ShaderDefinition {
    name: "Flat Color Shader",
    path: "flat_color.wgsl",
};

const MAX_PATHS: usize = 2;

/// Draws the orbit rings as line strips over the lit scene.
pub struct OrbitPathPass {
    pipeline_id: PipelineId,
    path_uniforms: DynamicUniformBuffer<PathUniform>,
}

pub struct OrbitPathDrawData<'a> {
    pub queue: &'a wgpu::Queue,
    pub paths: &'a OrbitPathBuffer,
    pub draws: &'a [PathDraw],
    pub view_projection: glam::Mat4,
    pub viewport: Viewport,
    pub color: [f32; 4],
}

impl Pass for OrbitPathPass {
    type TextureViews = SceneTextureViews;
    type DrawData<'a> = OrbitPathDrawData<'a>;

    fn create(
        device: &wgpu::Device,
        common: Arc<RenderCommon>,
        cache_builder: &mut PipelineCacheBuilder,
    ) -> anyhow::Result<Self> {
        let path_uniforms = DynamicUniformBuffer::<PathUniform>::new(
            device,
            "Orbit path uniform buffer",
            MAX_PATHS,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Orbit Path Pipeline Layout"),
            bind_group_layouts: &[&path_uniforms.bind_group_layout],
            push_constant_ranges: &[],
        });
        let format = common.surface_format();

        let pipeline_id = cache_builder.add_shader(
            FLAT_COLOR_SHADER,
            Box::new(
                move |device: &Device, shader_def: &ShaderDefinition, source: &str| {
                    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                        label: Some(shader_def.name),
                        source: ShaderSource::Wgsl(source.into()),
                    });

                    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                        label: Some("Orbit path render pipeline"),
                        layout: Some(&pipeline_layout),
                        vertex: wgpu::VertexState {
                            module: &shader,
                            entry_point: Some("vs_main"),
                            buffers: &[ORBIT_PATH_VBL],
                            compilation_options: PipelineCompilationOptions::default(),
                        },
                        fragment: Some(wgpu::FragmentState {
                            module: &shader,
                            entry_point: Some("fs_main"),
                            targets: &[Some(wgpu::ColorTargetState {
                                format,
                                blend: Some(wgpu::BlendState::REPLACE),
                                write_mask: wgpu::ColorWrites::ALL,
                            })],
                            compilation_options: PipelineCompilationOptions::default(),
                        }),
                        primitive: wgpu::PrimitiveState {
                            topology: wgpu::PrimitiveTopology::LineStrip,
                            strip_index_format: None,
                            front_face: wgpu::FrontFace::Ccw,
                            cull_mode: None,
                            polygon_mode: wgpu::PolygonMode::Fill,
                            unclipped_depth: false,
                            conservative: false,
                        },
                        depth_stencil: Some(wgpu::DepthStencilState {
                            format: DepthTexture::DEPTH_FORMAT,
                            depth_write_enabled: false,
                            depth_compare: wgpu::CompareFunction::Less,
                            stencil: StencilState::default(),
                            bias: DepthBiasState::default(),
                        }),
                        multisample: MultisampleState::default(),
                        multiview: None,
                        cache: None,
                    });

                    Ok(pipeline)
                },
            ),
        );

        Ok(Self {
            pipeline_id,
            path_uniforms,
        })
    }

    fn render(
        &self,
        texture_views: &Self::TextureViews,
        encoder: &mut wgpu::CommandEncoder,
        pipeline_cache: &PipelineCache,
        draw_data: OrbitPathDrawData<'_>,
    ) {
        let uniforms = draw_data
            .draws
            .iter()
            .map(|draw| draw.uniform(draw_data.view_projection, draw_data.color))
            .collect::<Vec<_>>();
        self.path_uniforms.write(draw_data.queue, &uniforms);

        let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Orbit Path Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &texture_views.color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &texture_views.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let viewport = draw_data.viewport;
        render_pass.set_viewport(viewport.x, viewport.y, viewport.width, viewport.height, 0.0, 1.0);
        render_pass.set_pipeline(pipeline_cache.get(self.pipeline_id));
        render_pass.set_vertex_buffer(0, draw_data.paths.vertex_buffer.slice(..));

        for (slot, draw) in draw_data.draws.iter().enumerate() {
            let offset = self.path_uniforms.offset(slot);
            render_pass.set_bind_group(0, &self.path_uniforms.bind_group, &[offset]);
            render_pass.draw(draw.vertices.clone(), 0..1);
        }
    }
}
