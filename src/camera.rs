use glam::{Mat4, Vec3, Vec4};
use winit::{dpi::PhysicalSize, keyboard::KeyCode};

use crate::rendering::config::RenderConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub fn from_preset(preset: CameraPreset) -> Self {
        match preset {
            CameraPreset::Isometric => Camera {
                eye: Vec3::new(1.0, 5.0, 15.0),
                target: Vec3::ZERO,
                up: Vec3::Y,
            },
            CameraPreset::Front => Camera {
                eye: Vec3::new(0.0, 0.0, 15.0),
                target: Vec3::ZERO,
                up: Vec3::Y,
            },
            // Looking straight down, so +Y can't be the up vector.
            CameraPreset::Top => Camera {
                eye: Vec3::new(0.0, 15.0, 0.0),
                target: Vec3::ZERO,
                up: Vec3::NEG_Z,
            },
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_preset(CameraPreset::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPreset {
    #[default]
    Isometric,
    Front,
    Top,
}

impl CameraPreset {
    pub fn from_key_code(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Digit1 | KeyCode::Numpad1 => Some(CameraPreset::Isometric),
            KeyCode::Digit2 | KeyCode::Numpad2 => Some(CameraPreset::Front),
            KeyCode::Digit3 | KeyCode::Numpad3 => Some(CameraPreset::Top),
            _ => None,
        }
    }
}

/// Perspective projection that follows the window's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Projection {
    pub fn new(size: PhysicalSize<u32>, config: &RenderConfig) -> Self {
        Self {
            fov_y: config.fov_y_degrees.to_radians(),
            aspect: aspect_ratio(size),
            z_near: config.z_near,
            z_far: config.z_far,
        }
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.aspect = aspect_ratio(size);
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }
}

fn aspect_ratio(size: PhysicalSize<u32>) -> f32 {
    size.width as f32 / size.height.max(1) as f32
}

/// Region of the surface the scene is drawn into. The left sixth of the
/// window is kept clear for the debug panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn for_window(size: PhysicalSize<u32>) -> Self {
        let x = size.width as f32 / 6.0;
        Self {
            x,
            y: 0.0,
            width: size.width as f32 - x,
            height: size.height as f32,
        }
    }

    /// Clip-space crop that shows the left part of a full-window image inside
    /// this viewport, so the projection's width/height aspect is preserved.
    pub fn clip_crop(&self) -> Mat4 {
        let full_width = self.x + self.width;
        if self.width <= 0.0 || full_width <= 0.0 {
            return Mat4::IDENTITY;
        }

        let scale = full_width / self.width;
        Mat4::from_cols(
            Vec4::new(scale, 0.0, 0.0, 0.0),
            Vec4::Y,
            Vec4::Z,
            Vec4::new(scale - 1.0, 0.0, 0.0, 1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn front_key_sets_exact_front_view_from_any_state() {
        let mut camera = Camera::from_preset(CameraPreset::Top);
        camera.eye = Vec3::new(-3.0, 8.0, 1.0);

        let preset = CameraPreset::from_key_code(KeyCode::Digit2).unwrap();
        camera = Camera::from_preset(preset);

        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 15.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.up, Vec3::Y);
    }

    #[test]
    fn first_key_restores_default_view() {
        let preset = CameraPreset::from_key_code(KeyCode::Digit1).unwrap();
        let camera = Camera::from_preset(preset);

        assert_eq!(camera, Camera::default());
        assert_eq!(camera.eye, Vec3::new(1.0, 5.0, 15.0));
        assert_eq!(camera.view_matrix(), Camera::default().view_matrix());
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        assert_eq!(CameraPreset::from_key_code(KeyCode::KeyW), None);
        assert_eq!(CameraPreset::from_key_code(KeyCode::Digit4), None);
    }

    #[test]
    fn top_view_is_not_degenerate() {
        let view = Camera::from_preset(CameraPreset::Top).view_matrix();
        assert!(view.is_finite());
        let eye_in_view = view.transform_point3(Vec3::new(0.0, 15.0, 0.0));
        assert!(eye_in_view.abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn resize_updates_aspect_and_viewport() {
        let config = RenderConfig::default();
        let mut projection = Projection::new(PhysicalSize::new(800, 600), &config);

        let size = PhysicalSize::new(1000, 800);
        projection.resize(size);
        let viewport = Viewport::for_window(size);

        assert_eq!(projection.aspect, 1000.0 / 800.0);
        let matrix = projection.matrix();
        assert_abs_diff_eq!(matrix.y_axis.y / matrix.x_axis.x, 1000.0 / 800.0, epsilon = 1e-5);

        assert_eq!(viewport.x, 1000.0 / 6.0);
        assert_eq!(viewport.y, 0.0);
        assert_abs_diff_eq!(viewport.x + viewport.width, 1000.0);
        assert_eq!(viewport.height, 800.0);
    }

    fn to_pixels(clip: Vec4, viewport: Viewport) -> (f32, f32) {
        let ndc = clip / clip.w;
        (
            viewport.x + (ndc.x + 1.0) * 0.5 * viewport.width,
            viewport.y + (1.0 - ndc.y) * 0.5 * viewport.height,
        )
    }

    #[test]
    fn circle_projects_round_inside_viewport() {
        let size = PhysicalSize::new(1000, 800);
        let projection = Projection::new(size, &RenderConfig::default());
        let viewport = Viewport::for_window(size);
        let camera = Camera::from_preset(CameraPreset::Front);
        let view_projection = viewport.clip_crop() * projection.matrix() * camera.view_matrix();

        let project = |point: Vec3| to_pixels(view_projection * point.extend(1.0), viewport);
        let (left, _) = project(Vec3::new(-1.0, 0.0, 0.0));
        let (right, _) = project(Vec3::new(1.0, 0.0, 0.0));
        let (_, top) = project(Vec3::new(0.0, 1.0, 0.0));
        let (_, bottom) = project(Vec3::new(0.0, -1.0, 0.0));

        assert_abs_diff_eq!(right - left, bottom - top, epsilon = 1e-2);
    }

    #[test]
    fn crop_matches_full_window_image_shifted_by_panel() {
        let size = PhysicalSize::new(1200, 600);
        let viewport = Viewport::for_window(size);
        let crop = viewport.clip_crop();

        // Full-window image laid out from the viewport's left edge.
        for ndc_x in [-1.0, -0.25, 0.5] {
            let expected = viewport.x + (ndc_x + 1.0) * 0.5 * size.width as f32;
            let (actual, _) = to_pixels(crop * Vec4::new(ndc_x, 0.0, 0.5, 1.0), viewport);
            assert_abs_diff_eq!(actual, expected, epsilon = 1e-3);
        }

        let (centre, _) = to_pixels(crop * Vec4::new(0.0, 0.0, 0.5, 1.0), viewport);
        assert_abs_diff_eq!(centre, 1200.0 / 6.0 + 600.0, epsilon = 1e-3);
    }
}
