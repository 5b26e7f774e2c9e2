use glam::{Mat4, Vec3};

use crate::config::SceneConfig;
use crate::scene_graph::node::{NodeId, NodeMatrices};
use crate::scene_graph::orbit::Orbiter;

/// Fixed three-level hierarchy: a static centre, a body orbiting it, and a
/// second body orbiting the first.
pub struct Scene {
    pub center: Vec3,
    pub orbiters: [Orbiter; 2],
    matrices: NodeMatrices,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Self {
        let orbiters = config.orbiters.map(|orbiter| {
            Orbiter::new(
                orbiter.distance,
                orbiter.scale,
                orbiter.orbit_speed,
                orbiter.rotation_speed,
            )
        });

        Self {
            center: config.center,
            orbiters,
            matrices: NodeMatrices::identity(),
        }
    }

    /// Advances every orbiter by `frame_time` seconds and rebuilds all node
    /// matrices from scratch.
    pub fn update(&mut self, frame_time: f32) {
        for orbiter in &mut self.orbiters {
            orbiter.advance(frame_time);
        }

        self.update_transforms();
    }

    fn update_transforms(&mut self) {
        let [first, second] = &self.orbiters;

        let sphere = Mat4::from_translation(self.center);
        let orbit_obj1 = sphere * first.local_matrix();
        let orbit_obj2 = orbit_obj1 * second.local_matrix();

        // Follows object 1's position only. The scale keeps the ring radius in
        // the same units as object 2's orbit.
        let orbit_path2 = Mat4::from_translation(orbit_obj1.w_axis.truncate())
            * Mat4::from_scale(Vec3::splat(first.scale));

        self.matrices.set(NodeId::Sphere, sphere);
        self.matrices.set(NodeId::OrbitObj1, orbit_obj1);
        self.matrices.set(NodeId::OrbitObj2, orbit_obj2);
        self.matrices.set(NodeId::OrbitPath2, orbit_path2);
    }

    pub fn matrix(&self, node: NodeId) -> Mat4 {
        self.matrices.get(node)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn origin(matrix: Mat4) -> Vec3 {
        matrix.transform_point3(Vec3::ZERO)
    }

    #[test]
    fn nodes_start_as_identity() {
        let scene = Scene::new(&SceneConfig::default());
        for node in NodeId::ALL {
            assert_eq!(scene.matrix(node), Mat4::IDENTITY);
        }
    }

    #[test]
    fn sixty_frames_at_half_speed_reach_half_radian() {
        let mut scene = Scene::new(&SceneConfig::default());
        for orbiter in &mut scene.orbiters {
            orbiter.orbit_speed = 0.5;
        }

        for _ in 0..60 {
            scene.update(1.0 / 60.0);
        }

        assert_abs_diff_eq!(scene.orbiters[0].orbit_angle, 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(scene.orbiters[1].orbit_angle, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn first_orbiter_stays_at_its_distance_from_the_centre() {
        let mut scene = Scene::new(&SceneConfig::default());
        scene.orbiters[0].orbit_speed = 1.7;
        scene.orbiters[0].rotation_speed = -4.0;

        for _ in 0..500 {
            scene.update(1.0 / 30.0);
            let offset = origin(scene.matrix(NodeId::OrbitObj1))
                - origin(scene.matrix(NodeId::Sphere));
            assert_abs_diff_eq!(offset.length(), scene.orbiters[0].distance, epsilon = 1e-4);
        }
    }

    #[test]
    fn second_orbiter_circles_the_first_in_its_scaled_space() {
        let mut scene = Scene::new(&SceneConfig::default());

        for _ in 0..120 {
            scene.update(1.0 / 60.0);
            let offset = origin(scene.matrix(NodeId::OrbitObj2))
                - origin(scene.matrix(NodeId::OrbitObj1));
            let expected = scene.orbiters[1].distance * scene.orbiters[0].scale;
            assert_abs_diff_eq!(offset.length(), expected, epsilon = 1e-4);
        }
    }

    #[test]
    fn path_ring_is_centred_on_first_orbiter_without_rotation() {
        let mut scene = Scene::new(&SceneConfig::default());
        scene.update(0.8);

        let path = scene.matrix(NodeId::OrbitPath2);
        let obj1 = scene.matrix(NodeId::OrbitObj1);

        assert!(origin(path).abs_diff_eq(origin(obj1), 1e-6));

        let scale = scene.orbiters[0].scale;
        assert!(path
            .transform_vector3(Vec3::X)
            .abs_diff_eq(Vec3::X * scale, 1e-6));
        assert!(path
            .transform_vector3(Vec3::Z)
            .abs_diff_eq(Vec3::Z * scale, 1e-6));
    }

    #[test]
    fn matrices_are_rebuilt_from_angles_each_frame() {
        let mut stepped = Scene::new(&SceneConfig::default());
        let mut single = Scene::new(&SceneConfig::default());

        for _ in 0..4 {
            stepped.update(0.25);
        }
        single.update(1.0);

        for node in NodeId::ALL {
            assert!(stepped
                .matrix(node)
                .abs_diff_eq(single.matrix(node), 1e-5));
        }
    }

    #[test]
    fn centre_follows_configured_translation() {
        let config = SceneConfig {
            center: Vec3::new(1.0, 2.0, 3.0),
            ..SceneConfig::default()
        };
        let mut scene = Scene::new(&config);
        scene.update(0.1);

        assert_eq!(origin(scene.matrix(NodeId::Sphere)), Vec3::new(1.0, 2.0, 3.0));
    }

    fn revolve(orbit: f32, distance: f32, spin: f32, scale: f32) -> Mat4 {
        Mat4::from_rotation_y(orbit)
            * Mat4::from_translation(Vec3::new(distance, 0.0, 0.0))
            * Mat4::from_rotation_y(spin)
            * Mat4::from_scale(Vec3::splat(scale))
    }

    #[test]
    fn equal_speeds_cancel_spin_for_both_orbiters() {
        let mut scene = Scene::new(&SceneConfig::default());
        scene.orbiters[0].orbit_speed = 0.5;
        scene.orbiters[0].rotation_speed = 0.5;
        scene.orbiters[1].orbit_speed = 1.25;
        scene.orbiters[1].rotation_speed = 1.25;

        for _ in 0..90 {
            scene.update(1.0 / 60.0);
        }

        let [first, second] = &scene.orbiters;
        let obj1 = Mat4::from_rotation_y(first.orbit_angle)
            * Mat4::from_translation(Vec3::new(first.distance, 0.0, 0.0))
            * Mat4::from_scale(Vec3::splat(first.scale));
        let obj2 = obj1
            * Mat4::from_rotation_y(second.orbit_angle)
            * Mat4::from_translation(Vec3::new(second.distance, 0.0, 0.0))
            * Mat4::from_scale(Vec3::splat(second.scale));

        assert!(scene.matrix(NodeId::OrbitObj1).abs_diff_eq(obj1, 1e-5));
        assert!(scene.matrix(NodeId::OrbitObj2).abs_diff_eq(obj2, 1e-5));
    }

    #[test]
    fn unequal_speeds_spin_by_rotation_minus_orbit() {
        let mut scene = Scene::new(&SceneConfig::default());
        scene.orbiters[0].orbit_speed = 0.5;
        scene.orbiters[0].rotation_speed = 2.0;
        scene.orbiters[1].orbit_speed = -0.75;
        scene.orbiters[1].rotation_speed = 3.0;

        scene.update(0.8);

        let [first, second] = &scene.orbiters;
        assert_abs_diff_eq!(first.orbit_angle, 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(first.rotation_angle, 1.6, epsilon = 1e-6);
        assert_abs_diff_eq!(second.orbit_angle, -0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(second.rotation_angle, 2.4, epsilon = 1e-6);

        let obj1 = revolve(0.4, first.distance, 1.6 - 0.4, first.scale);
        let obj2 = obj1 * revolve(-0.6, second.distance, 2.4 + 0.6, second.scale);

        assert!(scene.matrix(NodeId::OrbitObj1).abs_diff_eq(obj1, 1e-5));
        assert!(scene.matrix(NodeId::OrbitObj2).abs_diff_eq(obj2, 1e-5));

        // Without the subtraction the bodies would face a different way.
        let uncancelled = revolve(0.4, first.distance, 1.6, first.scale);
        assert!(!scene.matrix(NodeId::OrbitObj1).abs_diff_eq(uncancelled, 1e-3));
    }
}
