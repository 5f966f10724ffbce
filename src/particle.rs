//! Particle state and property limits.

use crate::math::{Point3, Vector3};

/// Smallest influence range a particle can be adjusted down to.
pub const MIN_RANGE: f32 = 0.3;
/// Largest influence range a particle can be adjusted up to.
pub const MAX_RANGE: f32 = 6.0;
/// Smallest per-tick speed gain.
pub const MIN_SPEED: f32 = 0.006;
/// Largest per-tick speed gain.
pub const MAX_SPEED: f32 = 0.015;

/// Speed gain given to newly created particles.
pub const DEFAULT_SPEED: f32 = 0.01;
/// Friction coefficient shared by every particle.
pub const FRICTION: f32 = 0.0005;

/// Point sizes at spawn are drawn from `[SIZE_MIN, SIZE_MAX)`.
pub const SIZE_MIN: u32 = 10;
pub const SIZE_MAX: u32 = 20;

/// Influence ranges at spawn are drawn from `[SPAWN_RANGE_MIN, SPAWN_RANGE_MAX)`.
pub const SPAWN_RANGE_MIN: f32 = 1.0;
pub const SPAWN_RANGE_MAX: f32 = 5.0;

/// A single particle.
///
/// `range` and `speed` are private so every write goes through the clamped
/// setters and stays inside `[MIN_RANGE, MAX_RANGE]` / `[MIN_SPEED, MAX_SPEED]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point3,
    /// RGB, each channel in `[0, 1]`.
    pub color: [f32; 3],
    /// Rendered point size in pixels.
    pub size: u32,
    /// Unit direction of travel, or zero while the particle has never moved.
    pub direction: Vector3,
    range: f32,
    speed: f32,
    pub friction: f32,
    /// Current scalar velocity along `direction`. Never negative.
    pub velocity: f32,
    /// Set while the particle is inside its range of the look-at point and
    /// a force button is held. Recomputed every tick.
    pub highlighted: bool,
}

impl Particle {
    /// A resting white particle at `position` with default properties.
    pub fn new(position: Point3) -> Self {
        Self {
            position,
            color: [1.0, 1.0, 1.0],
            size: SIZE_MIN,
            direction: Vector3::ZERO,
            range: SPAWN_RANGE_MIN,
            speed: DEFAULT_SPEED,
            friction: FRICTION,
            velocity: 0.0,
            highlighted: false,
        }
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the influence range, clamped to `[MIN_RANGE, MAX_RANGE]`.
    pub fn with_range(mut self, range: f32) -> Self {
        self.set_range(range);
        self
    }

    /// Set the speed gain, clamped to `[MIN_SPEED, MAX_SPEED]`.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.set_speed(speed);
        self
    }

    /// Set the initial direction and velocity. Negative velocities are
    /// treated as zero.
    pub fn with_motion(mut self, direction: Vector3, velocity: f32) -> Self {
        self.direction = direction;
        self.velocity = velocity.max(0.0);
        self
    }

    #[inline]
    pub fn range(&self) -> f32 {
        self.range
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_range(&mut self, range: f32) {
        self.range = range.clamp(MIN_RANGE, MAX_RANGE);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Shift the influence range by `delta`, clamped.
    pub fn adjust_range(&mut self, delta: f32) {
        self.set_range(self.range + delta);
    }

    /// Shift the speed gain by `delta`, clamped.
    pub fn adjust_speed(&mut self, delta: f32) {
        self.set_speed(self.speed + delta);
    }

    /// Velocity lost to friction each tick. Larger particles slow faster.
    #[inline]
    pub fn friction_loss(&self) -> f32 {
        self.size as f32 * self.friction
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::new(Point3::ORIGIN)
    }
}
