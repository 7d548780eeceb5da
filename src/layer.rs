//! Mounting a particle field into a host.
//!
//! [`ParticleLayer::mount`] acquires a drawing context, sizes it to the
//! container, attaches the pointer and resize listeners, steps and draws the
//! first frame and requests the next one. Everything it attaches is released by
//! [`MountedLayer::unmount`].
//!
//! ```ignore
//! let Some(mut layer) = ParticleLayer::new(config).mount(&mut host, Instant::now()) else {
//!     return; // no drawing context; nothing to show
//! };
//!
//! // host event loop:
//! layer.handle_event(&host, event, now);
//! layer.on_frame(&mut host, request, now);
//!
//! let surface = layer.unmount(&mut host);
//! ```

use std::time::Instant;

use tracing::{debug, trace};

use crate::config::FieldConfig;
use crate::debounce::Debouncer;
use crate::field::ParticleField;
use crate::host::{FrameRequest, Host, ListenerId, ListenerKind};
use crate::input::{HostEvent, Pointer};
use crate::surface::DrawContext;
use crate::time::Time;

/// An unmounted particle layer: just its configuration.
#[derive(Debug, Clone, Default)]
pub struct ParticleLayer {
    config: FieldConfig,
}

impl ParticleLayer {
    pub fn new(config: FieldConfig) -> Self {
        Self { config }
    }

    /// Mount into `host`.
    ///
    /// Returns `None` without attaching anything if the host has no drawing
    /// context. This is not an error: the layer is decorative and simply
    /// renders nothing.
    pub fn mount<H: Host>(self, host: &mut H, now: Instant) -> Option<MountedLayer<H::Context>> {
        let Some(mut context) = host.acquire_context() else {
            debug!("no drawing context available, particle layer disabled");
            return None;
        };

        let size = host.container_size();
        context.set_size(size.x, size.y);

        let listeners = ListenerKind::ALL
            .iter()
            .map(|&kind| host.add_listener(kind))
            .collect();

        let field = ParticleField::new(self.config.clone(), size.x, size.y);
        debug!(
            particles = field.len(),
            width = size.x,
            height = size.y,
            "particle layer mounted"
        );

        let mut layer = MountedLayer {
            resize_debounce: Debouncer::new(self.config.resize_debounce()),
            time: Time::starting_at(now),
            config: self.config,
            field,
            context,
            listeners,
            pending_frame: None,
        };

        layer.field.step();
        layer.field.render(&mut layer.context);
        layer.pending_frame = Some(host.request_frame());
        Some(layer)
    }
}

/// A particle layer attached to a host.
///
/// Must be driven from the host's single event thread. `&mut self` on every
/// entry point keeps event handlers and frame callbacks from overlapping.
#[must_use = "a mounted layer must be unmounted to release its listeners"]
#[derive(Debug)]
pub struct MountedLayer<C: DrawContext> {
    config: FieldConfig,
    field: ParticleField,
    context: C,
    time: Time,
    resize_debounce: Debouncer,
    listeners: Vec<ListenerId>,
    pending_frame: Option<FrameRequest>,
}

impl<C: DrawContext> MountedLayer<C> {
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    /// The frame request this layer is waiting on.
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending_frame
    }

    /// Whether a debounced resize is waiting for its quiet period to end.
    pub fn resize_pending(&self) -> bool {
        self.resize_debounce.is_pending()
    }

    /// Handle one input event from the host.
    pub fn handle_event<H: Host>(&mut self, host: &H, event: HostEvent, now: Instant) {
        match event {
            HostEvent::PointerMoved { client } => {
                self.field
                    .set_pointer_state(Pointer::from_client(client, host.surface_origin()));
            }
            HostEvent::PointerLeft => self.field.clear_pointer(),
            HostEvent::Resized => self.resize_debounce.trigger(now),
        }
    }

    /// Service a frame callback.
    ///
    /// Steps and redraws only when `request` is the one this layer is
    /// waiting on; stale or cancelled requests are ignored. Returns whether a
    /// frame was drawn.
    pub fn on_frame<H: Host<Context = C>>(
        &mut self,
        host: &mut H,
        request: FrameRequest,
        now: Instant,
    ) -> bool {
        if self.pending_frame != Some(request) {
            trace!(?request, "ignoring stale frame request");
            return false;
        }
        self.pending_frame = None;

        if self.resize_debounce.poll(now) {
            self.apply_resize(host);
        }

        let delta = self.time.update_at(now);
        self.field.advance(self.config.timing.ticks_for(delta));
        self.field.render(&mut self.context);

        self.pending_frame = Some(host.request_frame());
        true
    }

    /// Detach every listener, cancel the resize timer and the outstanding
    /// frame request, and hand the drawing context back.
    pub fn unmount<H: Host<Context = C>>(mut self, host: &mut H) -> C {
        for id in self.listeners.drain(..) {
            host.remove_listener(id);
        }
        self.resize_debounce.cancel();
        if let Some(request) = self.pending_frame.take() {
            host.cancel_frame(request);
        }
        debug!("particle layer unmounted");
        self.context
    }

    fn apply_resize<H: Host>(&mut self, host: &H) {
        let size = host.container_size();
        if self.field.resize(size.x, size.y) {
            self.context.set_size(size.x, size.y);
            debug!(width = size.x, height = size.y, "particle surface resized");
        }
    }
}
