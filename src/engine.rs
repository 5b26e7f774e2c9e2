use std::time::Duration;

use crate::demo::DemoState;

pub fn update(state: &mut DemoState, frame_time: Duration, ui: &mut imgui::Ui) {
    state.frame_stats.record_frame(frame_time);
    state.scene.update(frame_time.as_secs_f32());

    crate::ui::draw_panel(ui, state);
}
