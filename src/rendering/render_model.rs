use std::{mem::offset_of, path::Path};

use wgpu::util::DeviceExt;

use crate::{
    material::ModelType,
    model::{Model, Vertex},
};

pub struct RenderModel {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl RenderModel {
    pub fn from_model(device: &wgpu::Device, model: &Model) -> Self {
        let vertex_buffer_name = format!("Vertex buffer ({})", model.name);
        let index_buffer_name = format!("Index buffer ({})", model.name);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&vertex_buffer_name),
            contents: bytemuck::cast_slice(&model.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&index_buffer_name),
            contents: bytemuck::cast_slice(&model.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: model.num_indices(),
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.num_indices, 0, 0..1);
    }
}

/// GPU meshes for every `ModelType`, indexed by the enum.
pub struct RenderModels {
    models: Vec<RenderModel>,
}

impl RenderModels {
    pub fn load(device: &wgpu::Device, model_folder: &Path) -> anyhow::Result<Self> {
        let mut models = Vec::with_capacity(ModelType::ALL.len());

        for model_type in ModelType::ALL {
            let path = model_folder.join(model_type.file_name());
            let model = Model::from_obj_file(model_type.name(), &path)?;
            log::info!(
                "Loaded model {} with {} vertices and {} triangles",
                model.name,
                model.vertices.len(),
                model.num_indices() / 3
            );
            models.push(RenderModel::from_model(device, &model));
        }

        Ok(Self { models })
    }

    pub fn get(&self, model_type: ModelType) -> &RenderModel {
        &self.models[model_type.index()]
    }
}

pub const RENDER_MODEL_VBL: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[
        wgpu::VertexAttribute {
            offset: offset_of!(Vertex, position) as wgpu::BufferAddress,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: offset_of!(Vertex, normal) as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
    ],
};
