use std::sync::Arc;

use wgpu::{
    DepthBiasState, Device, MultisampleState, PipelineCompilationOptions, RenderPassDescriptor,
    ShaderSource, StencilState,
};

use crate::{
    camera::Viewport,
    rendering::{
        draw_list::{ObjectDraw, ObjectUniform},
        dynamic_uniform::DynamicUniformBuffer,
        passes::pass::{Pass, SceneTextureViews},
        render_common::RenderCommon,
        render_model::{RenderModels, RENDER_MODEL_VBL},
        shader_loader::{
            PipelineCache, PipelineCacheBuilder, PipelineFactory, PipelineId, ShaderDefinition,
        },
        texture::DepthTexture,
    },
};

const PHONG_SHADER: ShaderDefinition = ShaderDefinition {
    name: "Phong Shader",
    path: "phong.wgsl",
};

/// Maximum number of lit objects per frame.
pub const MAX_OBJECTS: usize = 8;

pub struct PhongPass {
    fill_pipeline_id: PipelineId,
    wireframe_pipeline_id: Option<PipelineId>,
    common: Arc<RenderCommon>,
    object_uniforms: DynamicUniformBuffer<ObjectUniform>,
}

pub struct PhongDrawData<'a> {
    pub queue: &'a wgpu::Queue,
    pub models: &'a RenderModels,
    pub draws: &'a [ObjectDraw],
    pub view_projection: glam::Mat4,
    pub viewport: Viewport,
    pub clear_color: wgpu::Color,
    pub wireframe: bool,
}

impl Pass for PhongPass {
    type TextureViews = SceneTextureViews;
    type DrawData<'a> = PhongDrawData<'a>;

    fn create(
        device: &wgpu::Device,
        common: Arc<RenderCommon>,
        cache_builder: &mut PipelineCacheBuilder,
    ) -> anyhow::Result<Self> {
        let object_uniforms = DynamicUniformBuffer::<ObjectUniform>::new(
            device,
            "Object uniform buffer",
            MAX_OBJECTS,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Phong Pipeline Layout"),
                bind_group_layouts: &[
                    &common.frame_uniform.bind_group_layout,
                    &object_uniforms.bind_group_layout,
                ],
                push_constant_ranges: &[],
            });

        let fill_pipeline_id = cache_builder.add_shader(
            PHONG_SHADER,
            phong_pipeline_factory(
                render_pipeline_layout.clone(),
                common.surface_format(),
                wgpu::PolygonMode::Fill,
            ),
        );

        let wireframe_pipeline_id = if device
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE)
        {
            Some(cache_builder.add_shader(
                PHONG_SHADER,
                phong_pipeline_factory(
                    render_pipeline_layout,
                    common.surface_format(),
                    wgpu::PolygonMode::Line,
                ),
            ))
        } else {
            log::warn!("POLYGON_MODE_LINE is not supported, wireframe toggle will be ignored");
            None
        };

        Ok(PhongPass {
            fill_pipeline_id,
            wireframe_pipeline_id,
            common,
            object_uniforms,
        })
    }

    fn render(
        &self,
        texture_views: &Self::TextureViews,
        encoder: &mut wgpu::CommandEncoder,
        pipeline_cache: &PipelineCache,
        draw_data: PhongDrawData<'_>,
    ) {
        let uniforms = draw_data
            .draws
            .iter()
            .map(|draw| draw.uniform(draw_data.view_projection))
            .collect::<Vec<_>>();
        self.object_uniforms.write(draw_data.queue, &uniforms);

        let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Phong Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &texture_views.color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(draw_data.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &texture_views.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let pipeline_id = match self.wireframe_pipeline_id {
            Some(id) if draw_data.wireframe => id,
            _ => self.fill_pipeline_id,
        };

        let viewport = draw_data.viewport;
        render_pass.set_viewport(viewport.x, viewport.y, viewport.width, viewport.height, 0.0, 1.0);
        render_pass.set_pipeline(pipeline_cache.get(pipeline_id));
        render_pass.set_bind_group(0, &self.common.frame_uniform.bind_group, &[]);

        for (slot, draw) in draw_data.draws.iter().enumerate() {
            let offset = self.object_uniforms.offset(slot);
            render_pass.set_bind_group(1, &self.object_uniforms.bind_group, &[offset]);
            draw_data.models.get(draw.model).draw(&mut render_pass);
        }
    }
}

fn phong_pipeline_factory(
    layout: wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    polygon_mode: wgpu::PolygonMode,
) -> PipelineFactory {
    Box::new(
        move |device: &Device, shader_def: &ShaderDefinition, source: &str| {
            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(shader_def.name),
                source: ShaderSource::Wgsl(source.into()),
            });

            let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Phong render pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[RENDER_MODEL_VBL],
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
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthTexture::DEPTH_FORMAT,
                    depth_write_enabled: true,
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
    )
}
