use anyhow::Result;

mod camera;
mod config;
mod demo;
mod engine;
mod frame_stats;
mod light;
mod material;
mod model;
mod rendering;
mod scene_graph;
mod ui;
mod window;

fn main() -> Result<()> {
    pretty_env_logger::init();

    pollster::block_on(window::run())?;

    Ok(())
}
