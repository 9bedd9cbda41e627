//! Startup and the frame loop.
//!
//! Startup runs once, in order: acquire the rendering context, load the boat,
//! man and diamond meshes one after another, pack and upload the vertex
//! buffer, build the pipelines. Any failure is logged and the render loop is
//! never entered.
//!
//! # Frame loop
//!
//! Every redraw:
//! 1. Measure the milliseconds since the previous frame ([`FrameClock`])
//! 2. Advance the scene ([`Scene::tick`])
//! 3. Draw it ([`Renderer::render`])
//! 4. Ask the host for the next frame
//!
//! The host paces frames (the browser's animation frame on the web, the
//! compositor natively). The loop runs until a [`StopHandle`] fires or the
//! window closes.

use std::sync::Arc;

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::Window,
};

use crate::{
    config::SceneConfig,
    context::Context,
    controls::{SceneCommand, command_for_key},
    data_structures::buffer::VertexBuffer,
    error::SceneError,
    render::Renderer,
    resources::load_scene_meshes,
    scene::{Scene, pack_geometry},
};

/// Tracks the timestamp of the previous frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last_frame: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self { last_frame: now }
    }

    /// Milliseconds since the previous call, measured against the wall clock.
    pub fn advance(&mut self) -> f32 {
        self.advance_to(Instant::now())
    }

    /// Milliseconds between the previous frame and `now`. A `now` earlier than
    /// the previous frame counts as zero elapsed time.
    pub fn advance_to(&mut self, now: Instant) -> f32 {
        let elapsed = if now > self.last_frame {
            now - self.last_frame
        } else {
            Duration::from_millis(0)
        };
        self.last_frame = now;
        elapsed.as_secs_f32() * 1000.0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything that exists once startup succeeded.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    scene: Scene,
    renderer: Renderer,
    is_surface_configured: bool,
}

impl AppState {
    fn resize(&mut self, width: u32, height: u32) {
        self.is_surface_configured = self.ctx.resize(width, height);
    }

    fn frame(&mut self, delta_ms: f32) {
        self.scene.tick(delta_ms);

        if !self.is_surface_configured {
            return;
        }
        match self.renderer.render(&self.ctx, &self.scene) {
            Ok(_) => (),
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.ctx.window.inner_size();
                self.resize(size.width, size.height);
            }
            Err(e) => {
                log::error!("Unable to render {}", e);
            }
        }
    }

    fn apply(&mut self, command: SceneCommand) {
        self.scene.apply(command);
        #[cfg(target_arch = "wasm32")]
        crate::controls::web::sync_labels(&self.scene.camera);
    }
}

async fn start(window: Arc<Window>, config: SceneConfig) -> Result<AppState, SceneError> {
    let ctx = Context::new(window, config.clear_colour).await?;
    let meshes = load_scene_meshes(&config.assets).await?;
    let packed = pack_geometry(&meshes, &config)?;
    let vertices = VertexBuffer::upload(&ctx.device, packed)?;
    let scene = Scene::new(config);
    let renderer = Renderer::new(&ctx, &scene, vertices);
    Ok(AppState {
        ctx,
        scene,
        renderer,
        is_surface_configured: false,
    })
}

#[derive(Debug)]
pub enum SceneEvent {
    /// Startup finished on the web, where it cannot block the event loop.
    #[allow(dead_code)]
    Initialized(Box<AppState>),
    Command(SceneCommand),
    Exit,
}

/// Ends the frame loop from anywhere that can reach the event loop.
#[derive(Clone, Debug)]
pub struct StopHandle(EventLoopProxy<SceneEvent>);

impl StopHandle {
    pub fn stop(&self) {
        if self.0.send_event(SceneEvent::Exit).is_err() {
            log::debug!("frame loop already stopped");
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    proxy: EventLoopProxy<SceneEvent>,
    stop: StopHandle,
    // Taken on the first `resumed`.
    config: Option<SceneConfig>,
    state: Option<AppState>,
    clock: FrameClock,
}

impl App {
    fn new(event_loop: &EventLoop<SceneEvent>, config: SceneConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            stop: StopHandle(proxy.clone()),
            proxy,
            config: Some(config),
            state: None,
            clock: FrameClock::new(),
        })
    }

    fn started(&mut self, mut state: AppState) {
        let size = state.ctx.window.inner_size();
        state.resize(size.width, size.height);
        #[cfg(target_arch = "wasm32")]
        crate::controls::web::sync_labels(&state.scene.camera);
        state.ctx.window.request_redraw();
        self.clock = FrameClock::new();
        self.state = Some(state);
    }

    fn handle_command(&mut self, command: SceneCommand) {
        if command == SceneCommand::Stop {
            self.stop.stop();
            return;
        }
        match &mut self.state {
            Some(state) => state.apply(command),
            None => log::warn!("scene not started yet, dropping {:?}", command),
        }
    }
}

impl ApplicationHandler<SceneEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.config.take() else {
            return;
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes()
            .with_title("Boat Scene")
            .with_inner_size(winit::dpi::LogicalSize::new(800.0, 800.0));

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let canvas = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(CANVAS_ID))
                .and_then(|c| c.dyn_into::<web_sys::HtmlCanvasElement>().ok());
            match canvas {
                Some(canvas) => window_attributes = window_attributes.with_canvas(Some(canvas)),
                None => {
                    log::error!("{}", SceneError::Context(format!("no <canvas id=\"{CANVAS_ID}\">")));
                    return;
                }
            }
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("{}", SceneError::Context(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(start(window, config)) {
                Ok(state) => self.started(state),
                Err(e) => {
                    log::error!("Startup aborted: {}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match start(window, config).await {
                    Ok(state) => {
                        if proxy
                            .send_event(SceneEvent::Initialized(Box::new(state)))
                            .is_err()
                        {
                            log::error!("event loop closed before startup finished");
                        }
                    }
                    Err(e) => log::error!("Startup aborted: {}", e),
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: SceneEvent) {
        match event {
            SceneEvent::Initialized(state) => self.started(*state),
            SceneEvent::Command(command) => self.handle_command(command),
            SceneEvent::Exit => event_loop.exit(),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key,
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } = &event
        {
            let nudge = match &self.state {
                Some(state) => state.scene.config.camera_nudge,
                None => SceneConfig::default().camera_nudge,
            };
            if let Some(command) = command_for_key(*physical_key, nudge) {
                self.handle_command(command);
            }
            return;
        }

        let state = match &mut self.state {
            Some(state) => state,
            None => {
                if let WindowEvent::CloseRequested = event {
                    event_loop.exit();
                }
                return;
            }
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let delta_ms = self.clock.advance();
                state.frame(delta_ms);
                state.ctx.window.request_redraw();
            }
            _ => {}
        }
    }
}

fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let env = env_logger::Env::default().default_filter_or("info");
        if let Err(e) = env_logger::Builder::from_env(env).try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::warn!("logger was already initialised");
        }
    }
}

/// Run the scene until stopped.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    run_with(config, |_| ())
}

/// Run the scene, handing `on_ready` a [`StopHandle`] before the loop starts.
pub fn run_with(config: SceneConfig, on_ready: impl FnOnce(StopHandle)) -> anyhow::Result<()> {
    init_logging();

    let event_loop: EventLoop<SceneEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;
    on_ready(app.stop.clone());

    #[cfg(target_arch = "wasm32")]
    crate::controls::web::bind(&app.proxy)
        .map_err(|e| anyhow::anyhow!("could not bind page controls: {:?}", e))?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
