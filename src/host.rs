//! The environment a particle layer is mounted into.
//!
//! A [`Host`] provides a drawing context, reports the container size, holds
//! event listener registrations and schedules "run on next display refresh"
//! callbacks. It delivers events and frames on a single thread and never
//! re-entrantly; [`MountedLayer`](crate::MountedLayer) relies on this.

use glam::{UVec2, Vec2};

use crate::surface::DrawContext;

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// The whole host, so overlapping elements cannot swallow events.
    Window,
    /// Only the field's own surface.
    Surface,
}

/// The listeners a mounted layer attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerLeave,
    Resize,
}

impl ListenerKind {
    pub const ALL: [ListenerKind; 3] = [
        ListenerKind::PointerMove,
        ListenerKind::PointerLeave,
        ListenerKind::Resize,
    ];

    pub fn scope(self) -> ListenerScope {
        match self {
            ListenerKind::PointerMove | ListenerKind::Resize => ListenerScope::Window,
            ListenerKind::PointerLeave => ListenerScope::Surface,
        }
    }
}

/// Handle for an attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Handle for a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// An environment that can host a particle layer.
pub trait Host {
    type Context: DrawContext;

    /// Acquire a 2D drawing context, or `None` when the environment cannot
    /// provide one. Called once per mount.
    fn acquire_context(&mut self) -> Option<Self::Context>;

    /// Current container size in pixels.
    fn container_size(&self) -> UVec2;

    /// Position of the surface's top-left corner in client coordinates.
    fn surface_origin(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);

    /// Whether any listener of `kind` is attached. Hosts only deliver events
    /// whose kind is being listened for.
    fn is_listening(&self, kind: ListenerKind) -> bool;

    /// Schedule one frame callback for the next display refresh.
    fn request_frame(&mut self) -> FrameRequest;

    /// Cancel a scheduled frame callback. Cancelling an already serviced or
    /// unknown request is a no-op.
    fn cancel_frame(&mut self, request: FrameRequest);
}
