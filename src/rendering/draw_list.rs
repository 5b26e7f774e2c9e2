use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec4};

use crate::{
    demo::DemoState,
    material::{Material, ModelType},
    rendering::orbit_paths::OrbitPathRanges,
    scene_graph::NodeId,
};

/// Everything needed to draw one lit object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectDraw {
    pub model: ModelType,
    pub material: Material,
    pub model_matrix: Mat4,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model_view_projection: Mat4,
    pub model: Mat4,
    // mat3x3 columns are padded to vec4 in uniform memory
    pub normal_matrix: [Vec4; 3],
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
    _padding: [f32; 3],
}

impl ObjectDraw {
    pub fn uniform(&self, view_projection: Mat4) -> ObjectUniform {
        let normal_matrix = normal_matrix(self.model_matrix);

        ObjectUniform {
            model_view_projection: view_projection * self.model_matrix,
            model: self.model_matrix,
            normal_matrix: [
                normal_matrix.x_axis.extend(0.0),
                normal_matrix.y_axis.extend(0.0),
                normal_matrix.z_axis.extend(0.0),
            ],
            ambient: self.material.ambient.extend(1.0),
            diffuse: self.material.diffuse.extend(1.0),
            specular: self.material.specular.extend(1.0),
            shininess: self.material.shininess,
            _padding: [0.0; 3],
        }
    }
}

pub fn normal_matrix(model_matrix: Mat4) -> Mat3 {
    Mat3::from_mat4(model_matrix).inverse().transpose()
}

/// The centre body followed by the two orbiting slots.
pub fn object_draws(state: &DemoState) -> [ObjectDraw; 3] {
    let slots = [
        (state.center, NodeId::Sphere),
        (state.selections[0], NodeId::OrbitObj1),
        (state.selections[1], NodeId::OrbitObj2),
    ];

    slots.map(|(selection, node)| ObjectDraw {
        model: selection.model,
        material: selection.material.material(),
        model_matrix: state.scene.matrix(node),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathDraw {
    pub vertices: Range<u32>,
    pub model_matrix: Mat4,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PathUniform {
    pub model_view_projection: Mat4,
    pub color: [f32; 4],
}

impl PathDraw {
    pub fn uniform(&self, view_projection: Mat4, color: [f32; 4]) -> PathUniform {
        PathUniform {
            model_view_projection: view_projection * self.model_matrix,
            color,
        }
    }
}

/// Object 1's ring sits on the centre; object 2's ring follows object 1.
pub fn path_draws(state: &DemoState, ranges: &OrbitPathRanges) -> [PathDraw; 2] {
    [
        PathDraw {
            vertices: ranges.object1.clone(),
            model_matrix: state.scene.matrix(NodeId::Sphere),
        },
        PathDraw {
            vertices: ranges.object2.clone(),
            model_matrix: state.scene.matrix(NodeId::OrbitPath2),
        },
    ]
}

pub fn view_projection(state: &DemoState) -> Mat4 {
    state.viewport.clip_crop() * state.projection.matrix() * state.camera.view_matrix()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        config::DemoConfig,
        material::MaterialType,
        rendering::{config::RenderConfig, orbit_paths::OrbitPathGeometry},
    };

    fn state() -> DemoState {
        DemoState::new(&DemoConfig::default(), &RenderConfig::default())
    }

    #[test]
    fn uniform_layout_matches_wgsl() {
        assert_eq!(size_of::<ObjectUniform>(), 240);
        assert_eq!(size_of::<PathUniform>(), 80);
    }

    #[test]
    fn rendering_twice_without_update_is_bit_identical() {
        let mut state = state();
        state.scene.update(0.37);

        let first = object_draws(&state).map(|draw| draw.uniform(view_projection(&state)));
        let second = object_draws(&state).map(|draw| draw.uniform(view_projection(&state)));

        assert_eq!(
            bytemuck::cast_slice::<_, u8>(&first),
            bytemuck::cast_slice::<_, u8>(&second)
        );
    }

    #[test]
    fn draws_follow_current_selection() {
        let mut state = state();
        state.selections[1].model = ModelType::Sphere;
        state.selections[1].material = MaterialType::Brass;

        let draws = object_draws(&state);

        assert_eq!(draws[0].model, ModelType::Sphere);
        assert_eq!(draws[1].model, ModelType::Torus);
        assert_eq!(draws[1].material, MaterialType::Jade.material());
        assert_eq!(draws[2].model, ModelType::Sphere);
        assert_eq!(draws[2].material, MaterialType::Brass.material());
    }

    #[test]
    fn draws_use_node_matrices() {
        let mut state = state();
        state.scene.update(1.0);

        let draws = object_draws(&state);

        assert_eq!(draws[0].model_matrix, state.scene.matrix(NodeId::Sphere));
        assert_eq!(draws[1].model_matrix, state.scene.matrix(NodeId::OrbitObj1));
        assert_eq!(draws[2].model_matrix, state.scene.matrix(NodeId::OrbitObj2));
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let normal = normal_matrix(model);

        assert!(normal
            .mul_vec3(Vec3::X)
            .abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn mvp_is_projection_view_model() {
        let mut state = state();
        state.scene.update(0.5);
        let draw = object_draws(&state)[1];

        let expected = state.viewport.clip_crop()
            * state.projection.matrix()
            * state.camera.view_matrix()
            * state.scene.matrix(NodeId::OrbitObj1);
        let uniform = draw.uniform(view_projection(&state));

        assert!(uniform.model_view_projection.abs_diff_eq(expected, 1e-5));
        assert_eq!(uniform.shininess, MaterialType::Jade.material().shininess);
    }

    #[test]
    fn path_draws_use_named_ranges() {
        let state = state();
        let geometry = OrbitPathGeometry::new([5.0, 3.0], 8);
        let draws = path_draws(&state, &geometry.ranges);

        assert_eq!(draws[0].vertices, 0..9);
        assert_eq!(draws[1].vertices, 9..18);
        assert_eq!(draws[1].model_matrix, state.scene.matrix(NodeId::OrbitPath2));
    }
}
