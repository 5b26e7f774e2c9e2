use glam::{Mat4, Vec3};

/// A body revolving around its parent node while spinning about its own Y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Orbiter {
    /// Radians per second around the parent.
    pub orbit_speed: f32,
    /// Radians per second around the body's own axis.
    pub rotation_speed: f32,
    pub distance: f32,
    pub scale: f32,

    pub orbit_angle: f32,
    pub rotation_angle: f32,
}

impl Orbiter {
    pub fn new(distance: f32, scale: f32, orbit_speed: f32, rotation_speed: f32) -> Self {
        Self {
            orbit_speed,
            rotation_speed,
            distance,
            scale,
            orbit_angle: 0.0,
            rotation_angle: 0.0,
        }
    }

    /// Accumulates both angles. The accumulators are never wrapped or reset.
    pub fn advance(&mut self, frame_time: f32) {
        self.orbit_angle += self.orbit_speed * frame_time;
        self.rotation_angle += self.rotation_speed * frame_time;
    }

    /// Own-axis spin with the revolution removed, so the orbit does not leak
    /// into the body's facing.
    pub fn spin_angle(&self) -> f32 {
        self.rotation_angle - self.orbit_angle
    }

    /// Revolve, push out to the orbit radius, spin, then scale.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.orbit_angle)
            * Mat4::from_translation(Vec3::new(self.distance, 0.0, 0.0))
            * Mat4::from_rotation_y(self.spin_angle())
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn many_small_steps_match_one_large_step() {
        let mut stepped = Orbiter::new(5.0, 1.0, 0.5, 1.5);
        let mut single = stepped.clone();

        let dt = 0.125;
        for _ in 0..8 {
            stepped.advance(dt);
        }
        single.advance(8.0 * dt);

        assert_abs_diff_eq!(stepped.orbit_angle, single.orbit_angle, epsilon = 1e-6);
        assert_abs_diff_eq!(
            stepped.rotation_angle,
            single.rotation_angle,
            epsilon = 1e-6
        );
    }

    #[test]
    fn zero_frame_time_does_not_move() {
        let mut orbiter = Orbiter::new(5.0, 1.0, 3.0, -2.0);
        orbiter.advance(0.0);
        assert_eq!(orbiter.orbit_angle, 0.0);
        assert_eq!(orbiter.rotation_angle, 0.0);
    }

    #[test]
    fn negative_speed_reverses_direction() {
        let mut orbiter = Orbiter::new(5.0, 1.0, -1.0, 0.0);
        orbiter.advance(0.5);
        assert_abs_diff_eq!(orbiter.orbit_angle, -0.5);
    }

    #[test]
    fn equal_speeds_keep_spin_fixed() {
        let mut orbiter = Orbiter::new(5.0, 1.0, 0.75, 0.75);
        for _ in 0..1000 {
            orbiter.advance(1.0 / 60.0);
            assert_eq!(orbiter.spin_angle(), 0.0);
        }
    }

    #[test]
    fn origin_stays_on_orbit_radius() {
        let mut orbiter = Orbiter::new(5.0, 0.7, 0.9, 2.3);
        for _ in 0..240 {
            orbiter.advance(1.0 / 60.0);
            let origin = orbiter.local_matrix().transform_point3(Vec3::ZERO);
            assert_abs_diff_eq!(origin.length(), 5.0, epsilon = 1e-4);
            assert_abs_diff_eq!(origin.y, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn nan_speed_propagates_without_panicking() {
        let mut orbiter = Orbiter::new(5.0, 1.0, f32::NAN, 1.0);
        orbiter.advance(1.0 / 60.0);
        assert!(orbiter.orbit_angle.is_nan());
        assert!(orbiter.local_matrix().is_nan());
    }
}
