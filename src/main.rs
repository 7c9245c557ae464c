//! Topoterrain - a scrolling topographic terrain viewer
//!
//! A heightmap drives a tiled mesh shaded with glowing contour lines and
//! hypsometric bands. Drag to orbit, scroll to zoom, drop an image onto the
//! window to swap the heightmap.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use topoterrain::camera::{cursor_to_ndc, CameraSystem};
use topoterrain::cli::Args;
use topoterrain::heightmap::{HeightSource, HeightmapLoader, DOME_SIZE};
use topoterrain::input::{wheel_delta, zoom, KeyAction, OrbitController};
use topoterrain::params::{RenderConfig, TopoConfig};
use topoterrain::rendering::{CameraUniforms, RenderSystem};
use topoterrain::terrain::TerrainTopo;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Terrain and view
    topo: TerrainTopo,
    camera: CameraSystem,
    orbit: OrbitController,
    loader: HeightmapLoader,

    // Configuration
    launch_config: TopoConfig,
    render_config: RenderConfig,

    // Time tracking
    last_frame: Instant,
}

impl App {
    fn new(args: &Args) -> Self {
        let config = args.build_config();
        let render_config = args.render_config();

        // Dome until the requested heightmap arrives
        let topo = TerrainTopo::new(config.clone(), Arc::new(HeightSource::dome(DOME_SIZE)));
        let camera = CameraSystem::new(&config, &render_config);

        let loader = HeightmapLoader::new();
        loader.request(args.heightmap.clone());

        Self {
            window: None,
            render_system: None,
            topo,
            camera,
            orbit: OrbitController::new(),
            loader,
            launch_config: config,
            render_config,
            last_frame: Instant::now(),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, action: KeyAction) {
        match action.apply(self.topo.config(), &self.launch_config) {
            Some(next) => {
                let change = self.topo.set_config(next);
                info!("{:?}: {:?}", action, change);
            }
            None => event_loop.exit(),
        }
    }

    fn cursor_moved(&mut self, x: f64, y: f64) {
        let mut next = self.topo.config().clone();
        if self.orbit.cursor_moved(x, y, &mut next.camera) {
            self.topo.set_config(next);
            self.camera.update(self.topo.config(), &self.render_config);
        }

        // Hover only while not orbiting; a miss keeps the previous center
        if self.orbit.is_dragging() {
            return;
        }
        let Some(ndc) = cursor_to_ndc(
            x,
            y,
            self.render_config.window_width,
            self.render_config.window_height,
        ) else {
            return;
        };
        if let Some(point) = self.camera.ground_point(ndc) {
            self.topo.set_hover_center(point);
        }
    }

    fn resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.render_config.window_width = width;
        self.render_config.window_height = height;
        if let Some(render_system) = self.render_system.as_mut() {
            render_system.resize(width, height);
        }
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(source) = self.loader.poll() {
            self.topo.set_height_source(Arc::new(source));
        }

        let now = Instant::now();
        let dt = self
            .render_config
            .frame_dt((now - self.last_frame).as_secs_f32());
        self.last_frame = now;

        self.topo.advance(dt);
        self.camera.update(self.topo.config(), &self.render_config);

        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        render_system.sync_heightmap(self.topo.height_source(), self.topo.height_revision());
        render_system.sync_lattice(self.topo.lattice());
        render_system.update_shading(self.topo.uniforms());
        render_system.update_camera(&CameraUniforms::new(
            self.camera.view_proj(),
            self.camera.eye(),
        ));

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Topoterrain")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system =
            match pollster::block_on(RenderSystem::new(Arc::clone(&window), &self.render_config)) {
                Ok(render_system) => render_system,
                Err(e) => {
                    error!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

        let (width, height) = render_system.size();
        self.render_config.window_width = width;
        self.render_config.window_height = height;
        self.loader
            .set_max_dimension(render_system.max_texture_dimension());

        info!("Topoterrain is running (drag to orbit, wheel to zoom, Esc to quit)");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.resized(size.width, size.height),
            WindowEvent::DroppedFile(path) => {
                if self.loader.request(path.clone()) {
                    info!("Loading dropped heightmap '{}'", path.display());
                }
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(position.x, position.y),
            WindowEvent::CursorLeft { .. } => self.orbit.cursor_left(),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.orbit.set_dragging(state == ElementState::Pressed),
            WindowEvent::MouseWheel { delta, .. } => {
                let mut next = self.topo.config().clone();
                zoom(&mut next.camera, wheel_delta(delta));
                self.topo.set_config(next);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(action) = KeyAction::from_key(code) {
                    self.handle_key(event_loop, action);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut render_system) = self.render_system.take() {
            render_system.teardown();
        }
        self.topo.dispose();
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let mut app = App::new(&args);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Event loop error: {}", e);
    }
}
