use std::{marker::PhantomData, num::NonZeroU64};

use bytemuck::Pod;

/// A uniform buffer holding one `T` per draw, each at an aligned slot and
/// selected with a dynamic offset.
pub struct DynamicUniformBuffer<T> {
    buffer: wgpu::Buffer,
    stride: u64,
    capacity: usize,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    _marker: PhantomData<T>,
}

impl<T: Pod> DynamicUniformBuffer<T> {
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        visibility: wgpu::ShaderStages,
    ) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = slot_stride(size_of::<T>() as u64, alignment);
        let binding_size = NonZeroU64::new(size_of::<T>() as u64);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: binding_size,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: binding_size,
                }),
            }],
        });

        Self {
            buffer,
            stride,
            capacity,
            bind_group,
            bind_group_layout,
            _marker: PhantomData,
        }
    }

    pub fn offset(&self, slot: usize) -> u32 {
        (self.stride * slot as u64) as u32
    }

    /// Writes `items` into consecutive slots starting at slot 0.
    pub fn write(&self, queue: &wgpu::Queue, items: &[T]) {
        assert!(
            items.len() <= self.capacity,
            "{} uniforms written to a buffer with {} slots",
            items.len(),
            self.capacity
        );

        let bytes = pack_slots(items, self.stride as usize);
        queue.write_buffer(&self.buffer, 0, &bytes);
    }
}

fn slot_stride(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

fn pack_slots<T: Pod>(items: &[T], stride: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; stride * items.len()];
    for (slot, item) in bytes.chunks_exact_mut(stride).zip(items) {
        let item = bytemuck::bytes_of(item);
        slot[..item.len()].copy_from_slice(item);
    }
    bytes
}
