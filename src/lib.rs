//! # Stardrift
//!
//! A perspective starfield flythrough: a fixed field of points streams
//! past the observer, projected onto a 2D canvas through a pinhole
//! camera. Simulation and rasterization run on the CPU; the canvas is
//! presented through wgpu.
//!
//! ## Quick Start
//!
//! ```ignore
//! use stardrift::prelude::*;
//!
//! fn main() -> Result<(), stardrift::RunError> {
//!     Starfield::new()
//!         .with_num_points(2_000)
//!         .with_velocity(0.2)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! Each particle has a lateral offset, a depth along the view axis, and a
//! palette color. Depth shrinks every tick; lateral offset and color are
//! fixed between respawns.
//!
//! ### Projection
//!
//! Position and size project through `value * focal_length / depth`.
//! The viewport is the unit square `[-0.5, 0.5]^2`, mapped to the full
//! surface.
//!
//! ### Recycling
//!
//! A particle that leaves the viewport on either axis, or whose projected
//! size goes negative, is respawned at the start distance before it is
//! drawn again. The respawn loop is rejection sampling with a bounded
//! retry count.
//!
//! ### Ticks
//!
//! The simulation advances on a fixed wall-clock interval with a constant
//! simulated time step; there is no delta-time compensation. Visual speed
//! is `velocity * time_step / step_interval`.
//!
//! ### Driving your own surface
//!
//! `.run()` owns the window. To paint somewhere else, `.build()` an
//! [`Effect`] and call [`Effect::step`] with any [`Surface`]
//! implementation on your own schedule.

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
mod gpu;
pub mod project;
pub mod render;
mod simulation;
pub mod spawn;
pub mod store;
pub mod time;

pub use canvas::{Canvas, Surface};
pub use color::{default_palette, Color};
pub use config::Config;
pub use error::{ConfigError, GpuError, RunError};
pub use glam::Vec2;
pub use project::{project, Projection};
pub use simulation::{Effect, Starfield, TickObserver};
pub use spawn::{needs_recycle, Spawner};
pub use store::{Particle, PointStore};
pub use time::{TickStats, TickTimer};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use stardrift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, Surface};
    pub use crate::color::{default_palette, Color};
    pub use crate::config::Config;
    pub use crate::error::{ConfigError, RunError};
    pub use crate::project::{project, Projection};
    pub use crate::simulation::{Effect, Starfield};
    pub use crate::store::{Particle, PointStore};
    pub use crate::time::TickStats;
    pub use crate::Vec2;
}
