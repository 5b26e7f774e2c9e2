use glam::Vec3;

/// Parameters of one orbiting body at startup.
#[derive(Debug, Clone, Copy)]
pub struct OrbiterConfig {
    pub distance: f32,
    pub scale: f32,
    pub orbit_speed: f32,
    pub rotation_speed: f32,
}

#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub center: Vec3,
    pub orbiters: [OrbiterConfig; 2],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            orbiters: [
                OrbiterConfig {
                    distance: 5.0,
                    scale: 0.7,
                    orbit_speed: 0.5,
                    rotation_speed: 1.0,
                },
                OrbiterConfig {
                    distance: 3.0,
                    scale: 0.4,
                    orbit_speed: 0.5,
                    rotation_speed: 1.0,
                },
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: &'static str,
    pub window_width: u32,
    pub window_height: u32,
    pub model_folder: &'static str,
    pub shader_folder: &'static str,
    pub scene: SceneConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Orrery",
            window_width: 800,
            window_height: 600,
            model_folder: "assets/models",
            shader_folder: "assets/shaders",
            scene: SceneConfig::default(),
        }
    }
}
