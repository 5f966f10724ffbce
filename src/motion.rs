//! Per-tick particle motion.
//!
//! Every tick runs two passes over the particle collection, in order:
//!
//! 1. [`compute_motion`]: the influence check against the camera's look-at
//!    point followed by friction decay.
//! 2. [`move_particles`]: wall reflection using the position from before the
//!    move, then explicit Euler integration.
//!
//! Each pass is a pure function of one particle's state plus shared
//! read-only inputs, so particles never affect each other. The step is
//! tick-based rather than time-based: a particle travels `velocity` world
//! units per tick.

use crate::math::{Axis, Point3, Vector3};
use crate::particle::Particle;

/// Which way a held mouse button pushes particles in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Force {
    /// Pull toward the look-at point.
    Attract,
    /// Push away from the look-at point.
    Repel,
}

/// The walled box particles live in.
///
/// Reflection triggers once a particle leaves the box shrunk by `margin` on
/// every side, so particles turn around just before touching a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3,
    pub max: Point3,
    pub margin: f32,
}

impl Bounds {
    pub fn new(min: Point3, max: Point3, margin: f32) -> Self {
        Self { min, max, margin }
    }

    /// Lower corner of the reflection box.
    pub fn soft_min(&self) -> Point3 {
        Point3::new(
            self.min.x() + self.margin,
            self.min.y() + self.margin,
            self.min.z() + self.margin,
        )
    }

    /// Upper corner of the reflection box.
    pub fn soft_max(&self) -> Point3 {
        Point3::new(
            self.max.x() - self.margin,
            self.max.y() - self.margin,
            self.max.z() - self.margin,
        )
    }

    /// True when `point` lies outside the reflection box on `axis`.
    #[inline]
    pub fn outside(&self, point: Point3, axis: Axis) -> bool {
        let c = point.coord(axis);
        c < self.min.coord(axis) + self.margin || c > self.max.coord(axis) - self.margin
    }

    /// Center of the box.
    pub fn center(&self) -> Point3 {
        Point3::from((self.min.to_vec3() + self.max.to_vec3()) * 0.5)
    }
}

impl Default for Bounds {
    /// `[-5, 5] x [-5, 5] x [0, 10]` with a 0.1 margin.
    fn default() -> Self {
        Self {
            min: Point3::new(-5.0, -5.0, 0.0),
            max: Point3::new(5.0, 5.0, 10.0),
            margin: 0.1,
        }
    }
}

/// Influence check for one particle.
///
/// Inside its range of `focus` and with a force active, the particle turns
/// toward (attract) or away from (repel) the focus point, gains `speed`
/// velocity and is highlighted. Otherwise the direction is left alone and
/// the highlight cleared.
///
/// A particle sitting exactly on the focus point has no defined direction
/// to or from it and keeps its current direction.
pub fn apply_influence(particle: &mut Particle, focus: Point3, force: Option<Force>) {
    let in_range = particle.position.distance_to(focus) <= particle.range();

    match force {
        Some(force) if in_range => {
            let toward = match force {
                Force::Attract => Vector3::between(particle.position, focus),
                Force::Repel => Vector3::between(focus, particle.position),
            };
            if let Some(direction) = toward.try_normalize() {
                particle.direction = direction;
            }
            particle.velocity += particle.speed();
            particle.highlighted = true;
        }
        _ => particle.highlighted = false,
    }
}

/// Friction decay, floored at zero.
#[inline]
pub fn apply_friction(particle: &mut Particle) {
    particle.velocity = (particle.velocity - particle.friction_loss()).max(0.0);
}

/// Negate the direction component on every axis where the particle is
/// outside the reflection box.
///
/// This is a discrete per-tick check, not swept collision: a particle that
/// overshoots by more than one tick of travel keeps flipping until it drifts
/// back in.
pub fn reflect_at_walls(particle: &mut Particle, bounds: &Bounds) {
    for axis in Axis::ALL {
        if bounds.outside(particle.position, axis) {
            particle.direction = particle.direction.reflect(axis);
        }
    }
}

/// `position += direction * velocity`.
#[inline]
pub fn integrate(particle: &mut Particle) {
    particle.position = particle.position + particle.direction.scale(particle.velocity);
}

/// First pass: influence then friction, for every particle.
pub fn compute_motion(particles: &mut [Particle], focus: Point3, force: Option<Force>) {
    for particle in particles.iter_mut() {
        apply_influence(particle, focus, force);
        apply_friction(particle);
    }
}

/// Second pass: wall reflection then integration, for every particle.
pub fn move_particles(particles: &mut [Particle], bounds: &Bounds) {
    for particle in particles.iter_mut() {
        reflect_at_walls(particle, bounds);
        integrate(particle);
    }
}

/// Both passes in tick order.
pub fn step(particles: &mut [Particle], focus: Point3, force: Option<Force>, bounds: &Bounds) {
    compute_motion(particles, focus, force);
    move_particles(particles, bounds);
}
