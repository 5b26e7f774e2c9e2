use glam::Vec3;

/// Phong reflectance terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialType {
    Pearl,
    Jade,
    Brass,
}

impl MaterialType {
    pub const ALL: [MaterialType; 3] = [MaterialType::Pearl, MaterialType::Jade, MaterialType::Brass];

    pub fn name(self) -> &'static str {
        match self {
            MaterialType::Pearl => "Pearl",
            MaterialType::Jade => "Jade",
            MaterialType::Brass => "Brass",
        }
    }

    pub fn material(self) -> Material {
        match self {
            MaterialType::Pearl => Material {
                ambient: Vec3::new(0.25, 0.21, 0.21),
                diffuse: Vec3::new(1.0, 0.83, 0.83),
                specular: Vec3::new(0.3, 0.3, 0.3),
                shininess: 11.3,
            },
            MaterialType::Jade => Material {
                ambient: Vec3::new(0.14, 0.22, 0.16),
                diffuse: Vec3::new(0.53, 0.89, 0.63),
                specular: Vec3::new(0.3, 0.3, 0.3),
                shininess: 12.8,
            },
            MaterialType::Brass => Material {
                ambient: Vec3::new(0.33, 0.22, 0.03),
                diffuse: Vec3::new(0.78, 0.57, 0.11),
                specular: Vec3::new(0.99, 0.94, 0.8),
                shininess: 27.9,
            },
        }
    }
}

/// Meshes available to the scene. Each variant maps to one OBJ file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelType {
    Sphere,
    Cube,
    Torus,
}

impl ModelType {
    pub const ALL: [ModelType; 3] = [ModelType::Sphere, ModelType::Cube, ModelType::Torus];

    pub fn name(self) -> &'static str {
        match self {
            ModelType::Sphere => "Sphere",
            ModelType::Cube => "Cube",
            ModelType::Torus => "Torus",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ModelType::Sphere => "sphere.obj",
            ModelType::Cube => "cube.obj",
            ModelType::Torus => "torus.obj",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// What an orbiting slot currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectSelection {
    pub model: ModelType,
    pub material: MaterialType,
}
