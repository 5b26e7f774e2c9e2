use std::sync::Arc;

use crate::rendering::{
    render_common::RenderCommon,
    shader_loader::{PipelineCache, PipelineCacheBuilder},
};

pub(crate) trait Pass {
    type TextureViews;
    type DrawData<'a>;

    fn create(
        device: &wgpu::Device,
        common: Arc<RenderCommon>,
        cache_builder: &mut PipelineCacheBuilder,
    ) -> anyhow::Result<Self>
    where
        Self: Sized;

    fn render(
        &self,
        texture_views: &Self::TextureViews,
        encoder: &mut wgpu::CommandEncoder,
        pipeline_cache: &PipelineCache,
        draw_data: Self::DrawData<'_>,
    );
}

pub struct SceneTextureViews {
    pub color: wgpu::TextureView,
    pub depth: wgpu::TextureView,
}
