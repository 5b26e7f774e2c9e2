use std::borrow::Cow;

use glam::Vec3;
use imgui::{Condition, TreeNodeFlags, Ui};

use crate::{
    demo::DemoState,
    light::DirectionalLight,
    material::{MaterialType, ModelType},
};

const SPEED_RANGE: f32 = 10.0;

pub fn draw_panel(ui: &Ui, state: &mut DemoState) {
    ui.window("User Interface")
        .size([250.0, 450.0], Condition::FirstUseEver)
        .position([0.0, 0.0], Condition::FirstUseEver)
        .build(|| {
            if ui.collapsing_header("Frame Stats", TreeNodeFlags::DEFAULT_OPEN) {
                ui.text(format!("Frame Rate: {:.2}", state.frame_stats.frame_rate));
                ui.text(format!("Frame Time: {:.4}", state.frame_stats.frame_time));
            }

            if ui.collapsing_header("Controls", TreeNodeFlags::DEFAULT_OPEN) {
                ui.checkbox("Wireframe", &mut state.wireframe);
            }

            if ui.collapsing_header("Light", TreeNodeFlags::DEFAULT_OPEN) {
                light_controls(ui, &mut state.light);
            }

            let slots = state
                .selections
                .iter_mut()
                .zip(state.scene.orbiters.iter_mut());

            for (index, (selection, orbiter)) in slots.enumerate() {
                let n = index + 1;
                if !ui.collapsing_header(format!("Orbit Object {n}"), TreeNodeFlags::DEFAULT_OPEN)
                {
                    continue;
                }

                enum_combo(
                    ui,
                    &format!("Model {n}"),
                    &mut selection.model,
                    &ModelType::ALL,
                    ModelType::name,
                );
                enum_combo(
                    ui,
                    &format!("Material {n}"),
                    &mut selection.material,
                    &MaterialType::ALL,
                    MaterialType::name,
                );
                ui.slider_config(format!("Orbit speed {n}"), -SPEED_RANGE, SPEED_RANGE)
                    .display_format("%.2f")
                    .build(&mut orbiter.orbit_speed);
                ui.slider_config(format!("Rotation speed {n}"), -SPEED_RANGE, SPEED_RANGE)
                    .display_format("%.2f")
                    .build(&mut orbiter.rotation_speed);
            }
        });
}

fn light_controls(ui: &Ui, light: &mut DirectionalLight) {
    let mut direction = light.direction.to_array();
    if ui
        .slider_config("Direction", -1.0, 1.0)
        .display_format("%.2f")
        .build_array(&mut direction)
    {
        light.direction = Vec3::from_array(direction);
    }

    color_edit(ui, "La", &mut light.ambient);
    color_edit(ui, "Ld", &mut light.diffuse);
    color_edit(ui, "Ls", &mut light.specular);
}

fn color_edit(ui: &Ui, label: &str, color: &mut Vec3) {
    let mut rgb = color.to_array();
    if ui.color_edit3(label, &mut rgb) {
        *color = Vec3::from_array(rgb);
    }
}

fn enum_combo<T: Copy + PartialEq>(
    ui: &Ui,
    label: &str,
    value: &mut T,
    options: &[T],
    name: fn(T) -> &'static str,
) -> bool {
    let mut index = options
        .iter()
        .position(|option| option == value)
        .unwrap_or(0);

    let changed = ui.combo(label, &mut index, options, |option| {
        Cow::Borrowed(name(*option))
    });

    if changed {
        *value = options[index];
    }

    changed
}
