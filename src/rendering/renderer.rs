use std::{path::Path, sync::Arc};

use anyhow::Context;
use wgpu::CommandEncoderDescriptor;
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    config::DemoConfig,
    demo::DemoState,
    rendering::{
        config::RenderConfig,
        draw_list::{object_draws, path_draws, view_projection},
        frame_uniform::FrameUniformState,
        imgui_renderer::ImguiRendererState,
        orbit_paths::{OrbitPathBuffer, OrbitPathGeometry},
        passes::{
            orbit_path_pass::{OrbitPathDrawData, OrbitPathPass},
            pass::{Pass, SceneTextureViews},
            phong_pass::{PhongDrawData, PhongPass},
        },
        render_common::RenderCommon,
        render_model::RenderModels,
        shader_loader::{PipelineCacheBuilder, ShaderLoader},
        texture::DepthTexture,
    },
};

pub struct Renderer {
    pub window: Arc<Window>,
    pub size: PhysicalSize<u32>,

    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,

    common: Arc<RenderCommon>,
    depth_texture: DepthTexture,
    render_models: RenderModels,
    orbit_paths: OrbitPathBuffer,

    shader_loader: ShaderLoader,

    phong_pass: PhongPass,
    orbit_path_pass: OrbitPathPass,
    imgui_renderer: ImguiRendererState,

    config: RenderConfig,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        demo_config: &DemoConfig,
        config: RenderConfig,
        imgui_context: &mut imgui::Context,
    ) -> anyhow::Result<Renderer> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No compatible graphics adapter")?;

        let adapter_info = adapter.get_info();
        log::info!("Using {} ({:?})", adapter_info.name, adapter_info.backend);

        // Wireframe needs line polygon mode, which is optional.
        let required_features = adapter.features() & wgpu::Features::POLYGON_MODE_LINE;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features,
                required_limits: wgpu::Limits::default(),
                label: Some("Orrery device"),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to create graphics device")?;

        let common = Arc::new(RenderCommon::new(&device, &adapter, &surface, size));
        let depth_texture = DepthTexture::new(&device, size, "Depth Texture");

        let mut cache_builder = PipelineCacheBuilder::new();

        let phong_pass = PhongPass::create(&device, common.clone(), &mut cache_builder)?;
        let orbit_path_pass = OrbitPathPass::create(&device, common.clone(), &mut cache_builder)?;

        let shader_loader = ShaderLoader::new(
            device.clone(),
            Path::new(demo_config.shader_folder),
            cache_builder,
        )?;

        let render_models = RenderModels::load(&device, Path::new(demo_config.model_folder))?;

        let radii = demo_config.scene.orbiters.map(|orbiter| orbiter.distance);
        let orbit_paths = OrbitPathBuffer::new(
            &device,
            &OrbitPathGeometry::new(radii, config.orbit_path_slices),
        );

        let imgui_renderer =
            ImguiRendererState::new(&device, &queue, common.surface_format(), imgui_context);

        Ok(Self {
            window,
            size,
            surface,
            device,
            queue,
            common,
            depth_texture,
            render_models,
            orbit_paths,
            shader_loader,
            phong_pass,
            orbit_path_pass,
            imgui_renderer,
            config,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        let mut config = self
            .common
            .output_surface_config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        self.size = new_size;
        config.width = new_size.width;
        config.height = new_size.height;
        self.surface.configure(&self.device, &config);
        self.depth_texture.resize(&self.device, new_size);
    }

    pub fn render(
        &mut self,
        state: &DemoState,
        imgui_context: &mut imgui::Context,
    ) -> Result<(), wgpu::SurfaceError> {
        self.shader_loader.load_pending_shaders();

        self.common.frame_uniform.update(
            &self.queue,
            FrameUniformState::new(&state.light, state.camera.eye),
        );

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(e) => {
                // Close the UI frame so the next one can start.
                imgui_context.render();
                return Err(e);
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let texture_views = SceneTextureViews {
            color: view.clone(),
            depth: self.depth_texture.view().clone(),
        };
        let pipeline_cache = &self.shader_loader.cache;
        let view_projection = view_projection(state);
        let viewport = state.viewport;

        let object_draws = object_draws(state);
        self.phong_pass.render(
            &texture_views,
            &mut encoder,
            pipeline_cache,
            PhongDrawData {
                queue: &self.queue,
                models: &self.render_models,
                draws: &object_draws,
                view_projection,
                viewport,
                clear_color: self.config.clear_color,
                wireframe: state.wireframe,
            },
        );

        let path_draws = path_draws(state, &self.orbit_paths.ranges);
        self.orbit_path_pass.render(
            &texture_views,
            &mut encoder,
            pipeline_cache,
            OrbitPathDrawData {
                queue: &self.queue,
                paths: &self.orbit_paths,
                draws: &path_draws,
                view_projection,
                viewport,
                color: self.config.orbit_path_color,
            },
        );

        if let Err(e) = self.imgui_renderer.render(
            &view,
            imgui_context,
            &self.device,
            &self.queue,
            &mut encoder,
        ) {
            log::error!("{:?}", e);
        }

        self.queue.submit([encoder.finish()]);
        output.present();

        Ok(())
    }
}
