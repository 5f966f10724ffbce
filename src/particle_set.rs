//! The particle collection and the user commands that grow, shrink and tune it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::math::Point3;
use crate::motion::Bounds;
use crate::particle::Particle;
use crate::spawn::SpawnContext;

/// How many particles a bulk generation produces: `min` plus a uniform
/// random extra in `[0, spread)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnCount {
    pub min: usize,
    pub spread: usize,
}

impl SpawnCount {
    pub const fn new(min: usize, spread: usize) -> Self {
        Self { min, spread }
    }

    /// Exclusive upper bound of the sampled count.
    pub fn max(&self) -> usize {
        self.min + self.spread.max(1)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.min + SpawnContext::new(rng).random_count(self.spread)
    }
}

/// Whether a bulk generation replaces the collection or adds to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateMode {
    Replace,
    Append,
}

/// Aggregate view of the collection, shown briefly after an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub average_range: f32,
    pub average_speed: f32,
    pub count: usize,
}

/// Growable particle collection with no fixed capacity.
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    // ========== Spawning ==========

    /// Launch a burst of particles from `center`.
    ///
    /// Returns the summary of the whole collection after the burst.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        mode: GenerateMode,
        count: SpawnCount,
        center: Point3,
        bounds: &Bounds,
        rng: &mut R,
    ) -> Summary {
        if mode == GenerateMode::Replace {
            self.particles.clear();
        }

        let n = count.sample(rng);
        let mut ctx = SpawnContext::new(rng);
        self.particles.reserve(n);
        self.particles
            .extend((0..n).map(|_| ctx.burst_particle(center, bounds)));

        log::debug!("generated {} particles ({:?}), total {}", n, mode, self.len());
        self.summary()
    }

    /// Add one resting particle with random appearance at `point`.
    pub fn spawn_at<R: Rng + ?Sized>(&mut self, point: Point3, bounds: &Bounds, rng: &mut R) {
        let mut particle = SpawnContext::new(rng).random_particle(bounds);
        particle.position = point;
        self.particles.push(particle);
    }

    /// Remove the particle closest to `point`.
    ///
    /// Ties go to the earliest particle. Returns `None` and leaves the
    /// collection untouched when it is empty.
    pub fn despawn_nearest(&mut self, point: Point3) -> Option<Particle> {
        let index = self.nearest_index(point)?;
        Some(self.particles.remove(index))
    }

    /// Index of the particle with the smallest squared distance to `point`.
    pub fn nearest_index(&self, point: Point3) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, p) in self.particles.iter().enumerate() {
            let d = point.fast_distance_to(p.position);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    // ========== Bulk adjustment ==========

    /// Shift every particle's influence range by `delta`, clamped.
    pub fn adjust_range(&mut self, delta: f32) -> Summary {
        for p in &mut self.particles {
            p.adjust_range(delta);
        }
        self.summary()
    }

    /// Shift every particle's speed gain by `delta`, clamped.
    pub fn adjust_speed(&mut self, delta: f32) -> Summary {
        for p in &mut self.particles {
            p.adjust_speed(delta);
        }
        self.summary()
    }

    // ========== Aggregates ==========

    /// Mean influence range, 0 for an empty collection.
    pub fn average_range(&self) -> f32 {
        self.mean(Particle::range)
    }

    /// Mean speed gain, 0 for an empty collection.
    pub fn average_speed(&self) -> f32 {
        self.mean(Particle::speed)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            average_range: self.average_range(),
            average_speed: self.average_speed(),
            count: self.len(),
        }
    }

    fn mean(&self, field: impl Fn(&Particle) -> f32) -> f32 {
        if self.particles.is_empty() {
            return 0.0;
        }
        let total: f64 = self.particles.iter().map(|p| field(p) as f64).sum();
        (total / self.particles.len() as f64) as f32
    }
}

impl<'a> IntoIterator for &'a ParticleSet {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{MAX_RANGE, MAX_SPEED, MIN_RANGE, MIN_SPEED};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0xB0C5)
    }

    #[test]
    fn test_generate_count_in_range() {
        let mut set = ParticleSet::new();
        let mut rng = rng();
        let count = SpawnCount::new(2000, 1000);

        let summary = set.generate(
            GenerateMode::Replace,
            count,
            Point3::new(0.0, 0.0, 5.0),
            &Bounds::default(),
            &mut rng,
        );

        assert!(set.len() >= 2000 && set.len() < 3000);
        assert_eq!(summary.count, set.len());

        let n = set.len() as f32;
        let mean_range: f32 = set.iter().map(|p| p.range()).sum::<f32>() / n;
        let mean_speed: f32 = set.iter().map(|p| p.speed()).sum::<f32>() / n;
        assert!((summary.average_range - mean_range).abs() < 1e-3);
        assert!((summary.average_speed - mean_speed).abs() < 1e-6);
    }

    #[test]
    fn test_generate_replace_vs_append() {
        let mut set = ParticleSet::new();
        let mut rng = rng();
        let center = Point3::new(0.0, 0.0, 5.0);
        let bounds = Bounds::default();

        set.generate(GenerateMode::Replace, SpawnCount::new(10, 0), center, &bounds, &mut rng);
        assert_eq!(set.len(), 10);
        set.generate(GenerateMode::Append, SpawnCount::new(5, 0), center, &bounds, &mut rng);
        assert_eq!(set.len(), 15);
        set.generate(GenerateMode::Replace, SpawnCount::new(3, 0), center, &bounds, &mut rng);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_spawn_at() {
        let mut set = ParticleSet::new();
        let point = Point3::new(1.0, 2.0, 3.0);
        set.spawn_at(point, &Bounds::default(), &mut rng());
        assert_eq!(set.len(), 1);
        assert_eq!(set.as_slice()[0].position, point);
        assert_eq!(set.as_slice()[0].velocity, 0.0);
    }

    #[test]
    fn test_despawn_nearest_on_empty_is_noop() {
        let mut set = ParticleSet::new();
        assert!(set.despawn_nearest(Point3::ORIGIN).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_despawn_nearest_removes_closest() {
        let mut set = ParticleSet::new();
        set.push(Particle::new(Point3::new(3.0, 0.0, 0.0)));
        set.push(Particle::new(Point3::new(1.0, 0.0, 0.0)));
        set.push(Particle::new(Point3::new(-2.0, 0.0, 0.0)));

        let removed = set.despawn_nearest(Point3::ORIGIN);
        assert_eq!(removed.map(|p| p.position), Some(Point3::new(1.0, 0.0, 0.0)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_despawn_nearest_first_minimum_wins() {
        let mut set = ParticleSet::new();
        set.push(Particle::new(Point3::new(1.0, 0.0, 0.0)).with_size(11));
        set.push(Particle::new(Point3::new(-1.0, 0.0, 0.0)).with_size(12));

        let removed = set.despawn_nearest(Point3::ORIGIN);
        assert_eq!(removed.map(|p| p.size), Some(11));
        assert_eq!(set.as_slice()[0].size, 12);
    }

    #[test]
    fn test_adjust_range_clamps_and_averages() {
        let mut set = ParticleSet::new();
        set.push(Particle::default().with_range(5.95));
        set.push(Particle::default().with_range(1.0));

        let summary = set.adjust_range(0.13);
        assert_eq!(set.as_slice()[0].range(), MAX_RANGE);
        assert!((summary.average_range - (MAX_RANGE + 1.13) / 2.0).abs() < 1e-5);

        for _ in 0..100 {
            set.adjust_range(-0.13);
        }
        assert!(set.iter().all(|p| p.range() == MIN_RANGE));
    }

    #[test]
    fn test_adjust_speed_clamps() {
        let mut set = ParticleSet::new();
        for _ in 0..4 {
            set.push(Particle::default());
        }
        for _ in 0..10 {
            set.adjust_speed(0.002);
        }
        assert!(set.iter().all(|p| p.speed() == MAX_SPEED));
        let summary = set.adjust_speed(-1.0);
        assert_eq!(summary.average_speed, MIN_SPEED);
        assert_eq!(summary.count, 4);
    }

    #[test]
    fn test_empty_averages_are_zero() {
        let mut set = ParticleSet::new();
        assert_eq!(set.average_range(), 0.0);
        assert_eq!(set.average_speed(), 0.0);
        let summary = set.adjust_speed(0.002);
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_spawn_count_bounds() {
        let mut rng = rng();
        let count = SpawnCount::new(20, 30);
        for _ in 0..100 {
            let n = count.sample(&mut rng);
            assert!(n >= 20 && n < count.max());
        }
        assert_eq!(SpawnCount::new(7, 0).sample(&mut rng), 7);
    }
}
