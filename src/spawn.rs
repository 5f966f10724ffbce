//! Spawn context for particle creation.
//!
//! Wraps a caller-supplied random source so every randomized property goes
//! through one place. Pass a seeded RNG to get reproducible spawns:
//!
//! ```
//! use particle_box::spawn::SpawnContext;
//! use particle_box::motion::Bounds;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut ctx = SpawnContext::new(&mut rng);
//! let p = ctx.random_particle(&Bounds::default());
//! assert!((10..20).contains(&p.size));
//! ```

use rand::Rng;

use crate::math::{Point3, Vector3};
use crate::motion::Bounds;
use crate::particle::{Particle, SIZE_MAX, SIZE_MIN, SPAWN_RANGE_MAX, SPAWN_RANGE_MIN};

/// Bulk-spawned particles start with a velocity in `[0, MAX_BURST_VELOCITY)`.
pub const MAX_BURST_VELOCITY: f32 = 2.0;

/// Random helpers over an injected RNG.
pub struct SpawnContext<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> SpawnContext<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random i32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_int(&mut self, min: i32, max: i32) -> i32 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random u32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_uint(&mut self, min: u32, max: u32) -> u32 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random usize in `[0, spread)`, zero when `spread` is zero.
    #[inline]
    pub fn random_count(&mut self, spread: usize) -> usize {
        if spread > 0 {
            self.rng.gen_range(0..spread)
        } else {
            0
        }
    }

    // ========== Position helpers ==========

    /// Random point inside the axis-aligned box `[min, max)`.
    pub fn random_in_box(&mut self, min: Point3, max: Point3) -> Point3 {
        Point3::new(
            self.random_range(min.x(), max.x()),
            self.random_range(min.y(), max.y()),
            self.random_range(min.z(), max.z()),
        )
    }

    /// Random point with integer coordinates inside `bounds`, upper walls
    /// excluded.
    pub fn lattice_point(&mut self, bounds: &Bounds) -> Point3 {
        let lo = bounds.min.to_vec3().as_ivec3();
        let hi = bounds.max.to_vec3().as_ivec3();
        Point3::new(
            self.random_int(lo.x, hi.x) as f32,
            self.random_int(lo.y, hi.y) as f32,
            self.random_int(lo.z, hi.z) as f32,
        )
    }

    // ========== Color helpers ==========

    /// Random RGB color (each channel 0-1).
    pub fn random_color(&mut self) -> [f32; 3] {
        [self.rng.gen(), self.rng.gen(), self.rng.gen()]
    }

    // ========== Particles ==========

    /// A resting particle at a random spot inside the reflection box, with
    /// random color, size and influence range.
    pub fn random_particle(&mut self, bounds: &Bounds) -> Particle {
        let position = self.random_in_box(bounds.soft_min(), bounds.soft_max());
        let color = self.random_color();
        let size = self.random_uint(SIZE_MIN, SIZE_MAX);
        let range = self.random_range(SPAWN_RANGE_MIN, SPAWN_RANGE_MAX);

        Particle::new(position)
            .with_color(color)
            .with_size(size)
            .with_range(range)
    }

    /// A random particle launched from `center` toward a random lattice
    /// point of `bounds`, with a random velocity.
    ///
    /// When the lattice point coincides with `center` there is no direction
    /// to normalize and the particle starts without one.
    pub fn burst_particle(&mut self, center: Point3, bounds: &Bounds) -> Particle {
        let mut particle = self.random_particle(bounds);
        particle.position = center;

        let aim = self.lattice_point(bounds);
        let direction = Vector3::between(center, aim)
            .try_normalize()
            .unwrap_or(Vector3::ZERO);
        let velocity = self.random_range(0.0, MAX_BURST_VELOCITY);

        particle.with_motion(direction, velocity)
    }
}
