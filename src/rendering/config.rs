#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub clear_color: wgpu::Color,
    pub orbit_path_color: [f32; 4],
    /// Line segments per orbit ring.
    pub orbit_path_slices: u32,
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color {
                r: 0.2,
                g: 0.2,
                b: 0.2,
                a: 1.0,
            },
            orbit_path_color: [0.6, 0.6, 0.6, 1.0],
            orbit_path_slices: 64,
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}
