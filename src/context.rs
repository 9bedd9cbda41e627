//! GPU and window context.
//!
//! Owns the surface, device and queue. Acquiring any of them is the only
//! place a context-acquisition error can come from.

use std::sync::Arc;

use winit::window::Window;

use crate::{data_structures::texture::DepthBuffer, error::SceneError};

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_buffer: DepthBuffer,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub clear_colour: wgpu::Color,
}

fn acquisition<E: std::fmt::Display>(stage: &'static str) -> impl FnOnce(E) -> SceneError {
    move |e| SceneError::Context(format!("{stage}: {e}"))
}

impl Context {
    pub async fn new(window: Arc<Window>, clear_colour: wgpu::Color) -> Result<Self, SceneError> {
        let size = window.inner_size();

        // The browser only gets WebGL2 through the GL backend.
        log::debug!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(acquisition("surface"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(acquisition("adapter"))?;
        log::debug!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(acquisition("device"))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| SceneError::Context("surface reports no formats".to_string()))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let depth_buffer = DepthBuffer::new(&device, config.width, config.height);
        log::info!("Rendering context acquired ({:?})", surface_format);

        Ok(Self {
            window,
            depth_buffer,
            surface,
            device,
            queue,
            config,
            clear_colour,
        })
    }

    /// Reconfigure the surface and rebuild the depth texture. Returns `false`
    /// for zero sized surfaces, which cannot be configured.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_buffer = DepthBuffer::new(&self.device, width, height);
        true
    }
}
