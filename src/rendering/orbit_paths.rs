use std::{f32::consts::TAU, ops::Range};

use glam::Vec3;
use wgpu::util::DeviceExt;

/// Vertex sub-ranges of the shared orbit ring buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPathRanges {
    pub object1: Range<u32>,
    pub object2: Range<u32>,
}

pub struct OrbitPathGeometry {
    pub vertices: Vec<Vec3>,
    pub ranges: OrbitPathRanges,
}

impl OrbitPathGeometry {
    /// One ring per orbiter in the XZ plane, packed back to back.
    pub fn new(radii: [f32; 2], slices: u32) -> Self {
        let mut vertices = Vec::new();

        let mut push_ring = |radius: f32| {
            let start = vertices.len() as u32;
            vertices.extend(generate_ring(radius, slices));
            start..vertices.len() as u32
        };

        let object1 = push_ring(radii[0]);
        let object2 = push_ring(radii[1]);

        Self {
            vertices,
            ranges: OrbitPathRanges { object1, object2 },
        }
    }
}

/// `slices + 1` points; the last repeats the first so a line strip closes.
pub fn generate_ring(radius: f32, slices: u32) -> Vec<Vec3> {
    let slice_angle = TAU / slices as f32;

    (0..=slices)
        .map(|i| {
            let angle = if i == slices { 0.0 } else { i as f32 * slice_angle };
            Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
        })
        .collect()
}

pub struct OrbitPathBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub ranges: OrbitPathRanges,
}

impl OrbitPathBuffer {
    pub fn new(device: &wgpu::Device, geometry: &OrbitPathGeometry) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Orbit path vertex buffer"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            ranges: geometry.ranges.clone(),
        }
    }
}

pub const ORBIT_PATH_VBL: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: size_of::<Vec3>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    }],
};

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn ring_is_closed_and_flat() {
        let ring = generate_ring(5.0, 32);

        assert_eq!(ring.len(), 33);
        assert_eq!(ring.first(), ring.last());
        for point in &ring {
            assert_abs_diff_eq!(point.length(), 5.0, epsilon = 1e-5);
            assert_eq!(point.y, 0.0);
        }
    }

    #[test]
    fn rings_are_packed_back_to_back() {
        let geometry = OrbitPathGeometry::new([5.0, 3.0], 16);

        assert_eq!(geometry.ranges.object1, 0..17);
        assert_eq!(geometry.ranges.object2, 17..34);
        assert_eq!(geometry.vertices.len(), 34);

        let inner = &geometry.vertices[geometry.ranges.object2.start as usize];
        assert_abs_diff_eq!(inner.length(), 3.0, epsilon = 1e-5);
    }
}
