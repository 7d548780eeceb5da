//! Pointer state and host input events.
//!
//! Hosts report raw events as [`HostEvent`]s. The mounted layer turns them
//! into a [`Pointer`] (surface-local, or absent) and resize requests.
//!
//! Native window events convert directly:
//!
//! ```ignore
//! if let Some(event) = HostEvent::from_window_event(&window_event) {
//!     layer.handle_event(&host, event, Instant::now());
//! }
//! ```

use glam::Vec2;
use winit::event::WindowEvent;

use crate::host::ListenerKind;

/// Where the pointer is, relative to the field's surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Pointer {
    /// Outside the surface, or never seen.
    #[default]
    Absent,
    /// Surface-local position in pixels. May lie outside the surface bounds.
    At(Vec2),
}

impl Pointer {
    /// Build a surface-local pointer from a client-space position.
    pub fn from_client(client: Vec2, surface_origin: Vec2) -> Self {
        Pointer::At(client - surface_origin)
    }

    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        match *self {
            Pointer::At(p) => Some(p),
            Pointer::Absent => None,
        }
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Pointer::Absent)
    }
}

/// Input delivered by a host to a mounted layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer moved, in client (host-wide) coordinates.
    PointerMoved { client: Vec2 },
    /// Pointer left the surface.
    PointerLeft,
    /// The host was resized. The new size is read from the host when the
    /// debounced resize fires, not carried here.
    Resized,
}

impl HostEvent {
    /// The listener that must be attached for this event to be delivered.
    pub fn listener_kind(&self) -> ListenerKind {
        match self {
            HostEvent::PointerMoved { .. } => ListenerKind::PointerMove,
            HostEvent::PointerLeft => ListenerKind::PointerLeave,
            HostEvent::Resized => ListenerKind::Resize,
        }
    }

    /// Translate a winit window event. Returns `None` for events the field
    /// does not care about.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(HostEvent::PointerMoved {
                client: Vec2::new(position.x as f32, position.y as f32),
            }),
            WindowEvent::CursorLeft { .. } => Some(HostEvent::PointerLeft),
            WindowEvent::Resized(_) => Some(HostEvent::Resized),
            _ => None,
        }
    }
}
