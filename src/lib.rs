//! # motes
//!
//! A decorative field of rising motes: a fixed pool of tiny discs that drift
//! upward, pulse in opacity, scatter away from the pointer and wrap around
//! the edges of their surface.
//!
//! ## Quick Start
//!
//! ```ignore
//! use motes::prelude::*;
//!
//! let mut field = ParticleField::new(FieldConfig::default(), 800, 600);
//! let mut surface = PixelSurface::new(800, 600);
//!
//! field.set_pointer(Vec2::new(400.0, 300.0));
//! for _ in 0..60 {
//!     field.step();
//! }
//! field.render(&mut surface);
//! surface.save_png("motes.png")?;
//! ```
//!
//! ## Core Concepts
//!
//! ### The field
//!
//! [`ParticleField`] is the whole simulation state. It has three inputs:
//! [`set_pointer`](ParticleField::set_pointer) /
//! [`clear_pointer`](ParticleField::clear_pointer),
//! [`resize`](ParticleField::resize), and [`step`](ParticleField::step).
//! [`render`](ParticleField::render) draws it into any [`DrawContext`].
//!
//! ### Hosts and layers
//!
//! A [`Host`] is an environment the field lives in: it hands out a drawing
//! context, owns event listeners and schedules frame callbacks.
//! [`ParticleLayer::mount`] wires a field into a host and returns a
//! [`MountedLayer`], which the host drives with events and frames until
//! [`MountedLayer::unmount`] releases everything.
//!
//! Two hosts ship with the crate:
//!
//! | Host | Context | Use |
//! |------|---------|-----|
//! | [`HeadlessHost`] | [`PixelSurface`] | stills, tests, benchmarks |
//! | [`window::WindowHost`] | [`PixelSurface`] presented with wgpu | interactive window |
//!
//! If a host cannot provide a drawing context, mounting quietly returns
//! `None`: the field is decoration, and no decoration is an acceptable
//! outcome.
//!
//! ## Timing
//!
//! Every constant in [`FieldConfig`] is per tick. By default one frame is one
//! tick ([`Timing::PerTick`]). [`Timing::Scaled`] instead converts each
//! frame's measured delta into a fractional tick count.

pub mod config;
mod debounce;
pub mod error;
pub mod field;
pub mod gpu;
pub mod headless;
pub mod host;
pub mod input;
pub mod layer;
pub mod particle;
pub mod spawn;
pub mod surface;
pub mod time;
pub mod window;

pub use config::{FieldConfig, Timing};
pub use debounce::Debouncer;
pub use error::{ConfigError, GpuError, SimulationError};
pub use field::ParticleField;
pub use glam::{UVec2, Vec2};
pub use headless::{render_headless, HeadlessHost, HeadlessOptions};
pub use host::{FrameRequest, Host, ListenerId, ListenerKind, ListenerScope};
pub use input::{HostEvent, Pointer};
pub use layer::{MountedLayer, ParticleLayer};
pub use particle::{AlphaDirection, Particle};
pub use spawn::SpawnContext;
pub use surface::{DrawContext, PixelSurface};
pub use time::Time;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use motes::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{FieldConfig, Timing};
    pub use crate::field::ParticleField;
    pub use crate::headless::{render_headless, HeadlessHost, HeadlessOptions};
    pub use crate::host::Host;
    pub use crate::input::{HostEvent, Pointer};
    pub use crate::layer::{MountedLayer, ParticleLayer};
    pub use crate::particle::Particle;
    pub use crate::surface::{DrawContext, PixelSurface};
    pub use crate::{UVec2, Vec2};
}
