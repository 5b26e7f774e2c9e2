pub mod config;
pub mod draw_list;
pub mod dynamic_uniform;
pub mod frame_uniform;
pub mod imgui_renderer;
pub mod orbit_paths;
pub mod passes;
pub mod render_common;
pub mod render_model;
pub mod renderer;
pub mod shader_loader;
pub mod texture;
