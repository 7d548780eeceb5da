//! Offscreen host driven by a synthetic clock.
//!
//! Useful for rendering stills, for benchmarks, and for exercising the full
//! mount / event / frame / unmount cycle without a window.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use glam::{UVec2, Vec2};
use tracing::info;

use crate::config::FieldConfig;
use crate::host::{FrameRequest, Host, ListenerId, ListenerKind};
use crate::input::HostEvent;
use crate::layer::{MountedLayer, ParticleLayer};
use crate::surface::PixelSurface;

/// An in-memory [`Host`] backed by [`PixelSurface`].
#[derive(Debug)]
pub struct HeadlessHost {
    size: UVec2,
    origin: Vec2,
    context_available: bool,
    listeners: HashMap<ListenerId, ListenerKind>,
    next_listener: u64,
    pending_frame: Option<FrameRequest>,
    next_frame: u64,
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: UVec2::new(width, height),
            origin: Vec2::ZERO,
            context_available: true,
            listeners: HashMap::new(),
            next_listener: 0,
            pending_frame: None,
            next_frame: 0,
        }
    }

    /// A host that refuses to hand out a drawing context.
    pub fn without_context(width: u32, height: u32) -> Self {
        Self {
            context_available: false,
            ..Self::new(width, height)
        }
    }

    /// Offset the surface within client coordinates.
    pub fn with_surface_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Change the container size. Does not notify anyone; deliver a
    /// [`HostEvent::Resized`] to do that.
    pub fn set_container_size(&mut self, width: u32, height: u32) {
        self.size = UVec2::new(width, height);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// The scheduled frame request, if any, without servicing it.
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending_frame
    }

    /// Take the scheduled frame request, as the display refresh would.
    pub fn take_frame(&mut self) -> Option<FrameRequest> {
        self.pending_frame.take()
    }

    /// Deliver `event` to `layer` if a matching listener is attached.
    /// Returns whether it was delivered.
    pub fn dispatch(
        &self,
        layer: &mut MountedLayer<PixelSurface>,
        event: HostEvent,
        now: Instant,
    ) -> bool {
        if !self.is_listening(event.listener_kind()) {
            return false;
        }
        layer.handle_event(self, event, now);
        true
    }

    /// Service the scheduled frame, if any. Returns whether a frame was drawn.
    pub fn pump_frame(&mut self, layer: &mut MountedLayer<PixelSurface>, now: Instant) -> bool {
        match self.take_frame() {
            Some(request) => layer.on_frame(self, request, now),
            None => false,
        }
    }
}

impl Host for HeadlessHost {
    type Context = PixelSurface;

    fn acquire_context(&mut self) -> Option<PixelSurface> {
        self.context_available
            .then(|| PixelSurface::new(self.size.x, self.size.y))
    }

    fn container_size(&self) -> UVec2 {
        self.size
    }

    fn surface_origin(&self) -> Vec2 {
        self.origin
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
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending_frame == Some(request) {
            self.pending_frame = None;
        }
    }
}

/// Settings for [`render_headless`].
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub width: u32,
    pub height: u32,
    /// Frames to simulate after the initial mount frame.
    pub frames: u32,
    /// Surface-local pointer position held for the whole run.
    pub pointer: Option<Vec2>,
    /// Synthetic refresh rate.
    pub frame_rate: f32,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            frames: 120,
            pointer: None,
            frame_rate: 60.0,
        }
    }
}

/// Mount a layer offscreen, run it for `options.frames` frames and return
/// the final raster.
///
/// Returns `None` only if the layer could not be mounted, which cannot
/// happen with [`HeadlessHost`] but keeps the contract honest.
pub fn render_headless(config: FieldConfig, options: &HeadlessOptions) -> Option<PixelSurface> {
    let mut host = HeadlessHost::new(options.width, options.height);
    let start = Instant::now();
    let frame_time = Duration::from_secs_f32(1.0 / options.frame_rate.max(1.0));

    let mut layer = ParticleLayer::new(config).mount(&mut host, start)?;
    if let Some(pointer) = options.pointer {
        host.dispatch(&mut layer, HostEvent::PointerMoved { client: pointer }, start);
    }

    let mut now = start;
    for _ in 0..options.frames {
        now += frame_time;
        host.pump_frame(&mut layer, now);
    }

    info!(
        frames = layer.time().frame(),
        particles = layer.field().len(),
        "headless render finished"
    );
    Some(layer.unmount(&mut host))
}
