//! # Particle Box
//!
//! An interactive particle simulation inside a walled room, viewed through a
//! free-fly first-person camera.
//!
//! Particles burst out of the middle of the room, drift with decaying
//! velocity and bounce off the six walls. Holding the left mouse button
//! pulls every particle within range of the point the camera is looking at
//! toward it; the right button pushes them away.
//!
//! ## Quick Start
//!
//! ```ignore
//! use particle_box::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     particle_box::run(SimConfig::default())
//! }
//! ```
//!
//! ## Headless use
//!
//! Everything except the [`window`] and [`gpu`] modules is plain data and
//! runs without a display, which is how the tests drive it:
//!
//! ```
//! use particle_box::prelude::*;
//!
//! let mut sim = SimulationState::with_seed(SimConfig::default(), 42);
//! sim.handle_event(InputEvent::ButtonDown(MouseButton::Left)); // dismiss instructions
//! sim.handle_event(InputEvent::ButtonDown(MouseButton::Left)); // attract
//!
//! for _ in 0..60 {
//!     sim.tick();
//! }
//! assert!(sim.particles().iter().all(|p| p.velocity >= 0.0));
//! ```
//!
//! ## Controls
//!
//! | Input | Action |
//! |-------|--------|
//! | W / S / A / D | move forward / back / strafe |
//! | mouse | look around |
//! | left / right button | attract / repel |
//! | Space | pause |
//! | R | regenerate |
//! | G | spawn a batch |
//! | N / M | spawn one / despawn nearest |
//! | + / - | influence range |
//! | Up / Down | speed |
//! | Q / Escape | quit |

pub mod camera;
pub mod config;
pub mod error;
pub mod gpu;
pub mod hud;
pub mod input;
pub mod math;
pub mod motion;
pub mod particle;
pub mod particle_set;
pub mod simulation;
pub mod spawn;
pub mod time;
pub mod window;

pub use camera::{Camera, Movement};
pub use config::SimConfig;
pub use error::{ConfigError, GpuError, SimulationError};
pub use math::{Point3, Vector3};
pub use motion::{Bounds, Force};
pub use particle::Particle;
pub use particle_set::{ParticleSet, SpawnCount, Summary};
pub use simulation::SimulationState;
pub use window::run;

/// Convenient re-exports for common usage.
///
/// ```
/// use particle_box::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{Camera, Movement, Projection};
    pub use crate::config::SimConfig;
    pub use crate::error::{ConfigError, GpuError, SimulationError};
    pub use crate::input::{Command, Input, InputEvent, KeyCode, MouseButton};
    pub use crate::math::{Point3, Vector3};
    pub use crate::motion::{Bounds, Force};
    pub use crate::particle::Particle;
    pub use crate::particle_set::{GenerateMode, ParticleSet, SpawnCount, Summary};
    pub use crate::simulation::SimulationState;
    pub use crate::spawn::SpawnContext;
    pub use crate::time::TickClock;
}
