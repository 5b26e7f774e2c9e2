use winit::dpi::PhysicalSize;

use crate::{
    camera::{Camera, CameraPreset, Projection, Viewport},
    config::DemoConfig,
    frame_stats::FrameStats,
    light::DirectionalLight,
    material::{MaterialType, ModelType, ObjectSelection},
    rendering::config::RenderConfig,
    scene_graph::Scene,
};

/// Everything the update step writes and the render step reads.
pub struct DemoState {
    pub camera: Camera,
    pub projection: Projection,
    pub viewport: Viewport,
    pub scene: Scene,
    pub light: DirectionalLight,
    /// The static body at the centre of the system.
    pub center: ObjectSelection,
    pub selections: [ObjectSelection; 2],
    pub wireframe: bool,
    pub frame_stats: FrameStats,
}

impl DemoState {
    pub fn new(config: &DemoConfig, render_config: &RenderConfig) -> Self {
        let size = PhysicalSize::new(config.window_width, config.window_height);

        Self {
            camera: Camera::default(),
            projection: Projection::new(size, render_config),
            viewport: Viewport::for_window(size),
            scene: Scene::new(&config.scene),
            light: DirectionalLight::default(),
            center: ObjectSelection {
                model: ModelType::Sphere,
                material: MaterialType::Brass,
            },
            selections: [
                ObjectSelection {
                    model: ModelType::Torus,
                    material: MaterialType::Jade,
                },
                ObjectSelection {
                    model: ModelType::Cube,
                    material: MaterialType::Pearl,
                },
            ],
            wireframe: false,
            frame_stats: FrameStats::new(),
        }
    }

    pub fn set_camera_preset(&mut self, preset: CameraPreset) {
        log::debug!("Camera preset: {:?}", preset);
        self.camera = Camera::from_preset(preset);
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width > 0 && size.height > 0 {
            self.projection.resize(size);
            self.viewport = Viewport::for_window(size);
        }
    }
}
