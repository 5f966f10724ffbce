//! Simulation state and the per-tick update.
//!
//! [`SimulationState`] owns everything that changes while the program runs:
//! the camera, the particles, held input and the pause/instructions flags.
//! The window layer feeds it [`InputEvent`]s as they arrive and calls
//! [`SimulationState::tick`] on a fixed schedule; the two never overlap.
//!
//! ```
//! use particle_box::config::SimConfig;
//! use particle_box::input::{InputEvent, KeyCode, MouseButton};
//! use particle_box::simulation::SimulationState;
//!
//! let mut sim = SimulationState::with_seed(SimConfig::default(), 1);
//! assert!(sim.particles().len() >= 2000);
//!
//! // The first click only dismisses the instructions.
//! sim.handle_event(InputEvent::ButtonDown(MouseButton::Left));
//! assert!(!sim.show_instructions());
//!
//! sim.handle_event(InputEvent::KeyDown(KeyCode::W));
//! sim.tick();
//! assert!(sim.camera().position().z() < 7.0);
//! ```

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::camera::Camera;
use crate::config::SimConfig;
use crate::hud::Hud;
use crate::input::{Command, Input, InputEvent};
use crate::math::Point3;
use crate::motion::{self, Bounds};
use crate::particle_set::{GenerateMode, ParticleSet};

/// All mutable simulation state.
pub struct SimulationState {
    config: SimConfig,
    camera: Camera,
    particles: ParticleSet,
    bounds: Bounds,
    input: Input,
    rng: SmallRng,
    hud: Hud,
    paused: bool,
    show_instructions: bool,
    quit_requested: bool,
    tick_count: u64,
}

impl SimulationState {
    /// Build the initial state and run the startup burst.
    ///
    /// Uses `config.seed` when set, fresh entropy otherwise.
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Like [`SimulationState::new`] with an explicit seed.
    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimConfig, rng: SmallRng) -> Self {
        let mut state = Self {
            camera: config.camera.build(),
            hud: Hud::new(config.adjust.message_frames),
            particles: ParticleSet::new(),
            bounds: Bounds::default(),
            input: Input::new(),
            rng,
            paused: false,
            show_instructions: true,
            quit_requested: false,
            tick_count: 0,
            config,
        };
        state.execute(Command::Regenerate);
        state
    }

    // ========== Update ==========

    /// Advance one fixed tick.
    ///
    /// Camera movement, confinement and orientation, then the two motion
    /// passes. All of it is skipped while paused; the HUD countdown is not.
    pub fn tick(&mut self) {
        if !self.paused {
            let (min, max) = self.config.camera.confinement();
            self.camera.apply_movement(&self.input.movement());
            self.camera.confine(min, max);
            self.camera.apply_orientation();

            motion::step(
                self.particles.as_mut_slice(),
                self.camera.look_at_point(),
                self.input.force(),
                &self.bounds,
            );
        }

        self.hud.tick();
        self.tick_count += 1;
    }

    /// Apply one input event. Returns the command it triggered, if any.
    ///
    /// While paused only pause-toggle and quit run, and releases are still
    /// tracked so nothing stays stuck down. The first mouse press while the
    /// instructions are up dismisses them and does nothing else.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::PointerMoved { dx, dy } => {
                if !self.paused {
                    self.camera.rotate(dx, dy);
                }
                None
            }
            InputEvent::KeyDown(key) => {
                if self.paused {
                    let command = Command::from_key(key).filter(|c| c.allowed_while_paused())?;
                    self.execute(command);
                    return Some(command);
                }
                let command = self.input.handle_event(&event)?;
                self.execute(command);
                Some(command)
            }
            InputEvent::KeyUp(_) | InputEvent::ButtonUp(_) => self.input.handle_event(&event),
            InputEvent::ButtonDown(_) => {
                if self.show_instructions {
                    self.show_instructions = false;
                    log::debug!("instructions dismissed");
                } else if !self.paused {
                    self.input.handle_event(&event);
                }
                None
            }
        }
    }

    /// Run a one-shot command.
    pub fn execute(&mut self, command: Command) {
        let focus = self.camera.look_at_point();
        let center = Point3::from(self.config.spawn.center);

        match command {
            Command::TogglePause => {
                self.paused = !self.paused;
                log::info!("animation {}", if self.paused { "paused" } else { "resumed" });
            }
            Command::Quit => self.quit_requested = true,
            Command::Regenerate => {
                let summary = self.particles.generate(
                    GenerateMode::Replace,
                    self.config.spawn.initial,
                    center,
                    &self.bounds,
                    &mut self.rng,
                );
                log::info!("regenerated {} particles", summary.count);
            }
            Command::SpawnBatch => {
                self.particles.generate(
                    GenerateMode::Append,
                    self.config.spawn.batch,
                    center,
                    &self.bounds,
                    &mut self.rng,
                );
            }
            Command::SpawnOne => {
                self.particles.spawn_at(focus, &self.bounds, &mut self.rng);
                log::debug!("spawned particle at {:?}", focus);
            }
            Command::DespawnNearest => match self.particles.despawn_nearest(focus) {
                Some(p) => log::debug!("despawned particle at {:?}", p.position),
                None => log::debug!("despawn requested on empty collection"),
            },
            Command::RangeUp => {
                let summary = self.particles.adjust_range(self.config.adjust.range_step);
                self.hud.show(summary);
            }
            Command::RangeDown => {
                let summary = self.particles.adjust_range(-self.config.adjust.range_step);
                self.hud.show(summary);
            }
            Command::SpeedUp => {
                let summary = self.particles.adjust_speed(self.config.adjust.speed_step);
                self.hud.show(summary);
            }
            Command::SpeedDown => {
                let summary = self.particles.adjust_speed(-self.config.adjust.speed_step);
                self.hud.show(summary);
            }
        }
    }

    // ========== Queries ==========

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSet {
        &mut self.particles
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn show_instructions(&self) -> bool {
        self.show_instructions
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// HUD message for the current tick, with the paused prefix applied.
    pub fn hud_text(&self) -> Option<String> {
        self.hud.text(self.paused)
    }
}
