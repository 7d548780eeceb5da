//! Native window host.
//!
//! [`WindowHost`] adapts a winit window to [`Host`]: listener registrations
//! gate which window events reach the layer, frame requests map onto
//! `request_redraw`, and the drawing context exists only if a [`Presenter`]
//! could be created for the window.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use glam::UVec2;
use tracing::{debug, info, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::SimulationError;
use crate::gpu::Presenter;
use crate::host::{FrameRequest, Host, ListenerId, ListenerKind};
use crate::input::HostEvent;
use crate::layer::{MountedLayer, ParticleLayer};
use crate::surface::PixelSurface;

/// A winit window acting as the layer's host.
pub struct WindowHost {
    window: Arc<Window>,
    presenter: Option<Presenter>,
    listeners: HashMap<ListenerId, ListenerKind>,
    next_listener: u64,
    pending_frame: Option<FrameRequest>,
    next_frame: u64,
}

impl WindowHost {
    pub fn new(window: Arc<Window>, presenter: Option<Presenter>) -> Self {
        Self {
            window,
            presenter,
            listeners: HashMap::new(),
            next_listener: 0,
            pending_frame: None,
            next_frame: 0,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn take_frame(&mut self) -> Option<FrameRequest> {
        self.pending_frame.take()
    }

    /// Show `raster` in the window. Returns `false` if the GPU is out of memory.
    fn present(&mut self, raster: &PixelSurface) -> bool {
        let Some(presenter) = &mut self.presenter else {
            return true;
        };
        match presenter.render(raster) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                presenter.reconfigure();
                true
            }
            Err(wgpu::SurfaceError::OutOfMemory) => false,
            Err(e) => {
                warn!("render error: {e:?}");
                true
            }
        }
    }
}

impl Host for WindowHost {
    type Context = PixelSurface;

    fn acquire_context(&mut self) -> Option<PixelSurface> {
        self.presenter.as_ref()?;
        let size = self.window.inner_size();
        Some(PixelSurface::new(size.width, size.height))
    }

    fn container_size(&self) -> UVec2 {
        let size = self.window.inner_size();
        UVec2::new(size.width, size.height)
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.values().any(|&k| k == kind)
    }

    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_frame);
        self.next_frame += 1;
        self.pending_frame = Some(request);
        self.window.request_redraw();
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending_frame == Some(request) {
            self.pending_frame = None;
        }
    }
}

/// Window application running one particle layer.
pub struct App {
    config: FieldConfig,
    initial_size: (u32, u32),
    host: Option<WindowHost>,
    layer: Option<MountedLayer<PixelSurface>>,
}

impl App {
    pub fn new(config: FieldConfig, width: u32, height: u32) -> Self {
        Self {
            config,
            initial_size: (width, height),
            host: None,
            layer: None,
        }
    }

    fn unmount(&mut self) {
        if let (Some(layer), Some(host)) = (self.layer.take(), self.host.as_mut()) {
            layer.unmount(host);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(host), Some(layer)) = (self.host.as_mut(), self.layer.as_mut()) else {
            return;
        };
        let Some(request) = host.take_frame() else {
            return;
        };

        if !layer.on_frame(host, request, Instant::now()) {
            return;
        }
        if !host.present(layer.context()) {
            warn!("GPU out of memory, closing");
            self.unmount();
            event_loop.exit();
            return;
        }

        let time = layer.time();
        if time.frame() % 30 == 0 {
            host.window()
                .set_title(&format!("motes - {:.0} fps", time.fps()));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }

        let (width, height) = self.initial_size;
        let window_attrs = Window::default_attributes()
            .with_title("motes")
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                warn!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let presenter = match pollster::block_on(Presenter::new(
            window.clone(),
            self.config.background,
            self.config.opacity,
        )) {
            Ok(presenter) => Some(presenter),
            Err(e) => {
                debug!("window presentation unavailable: {e}");
                None
            }
        };

        let mut host = WindowHost::new(window, presenter);
        self.layer = ParticleLayer::new(self.config.clone()).mount(&mut host, Instant::now());
        self.host = Some(host);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.unmount();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            event => {
                let Some(host) = self.host.as_mut() else {
                    return;
                };

                // The swapchain follows the window immediately; the layer's
                // raster catches up after its debounce.
                if let WindowEvent::Resized(size) = &event {
                    if let Some(presenter) = &mut host.presenter {
                        presenter.resize(size.width, size.height);
                    }
                }

                if let (Some(host_event), Some(layer)) =
                    (HostEvent::from_window_event(&event), self.layer.as_mut())
                {
                    if host.is_listening(host_event.listener_kind()) {
                        layer.handle_event(&*host, host_event, Instant::now());
                    }
                }
            }
        }
    }
}

/// Open a window and run the field until it is closed.
pub fn run(config: FieldConfig, width: u32, height: u32) -> Result<(), SimulationError> {
    info!(particles = config.particle_count, "starting motes window");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, width, height);
    event_loop.run_app(&mut app)?;
    Ok(())
}
