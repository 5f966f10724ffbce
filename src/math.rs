//! Minimal 3D point and vector types.
//!
//! [`Point3`] is a location in world space, [`Vector3`] a direction or
//! displacement. Both wrap [`glam::Vec3`] so the renderer can consume them
//! directly, but keep the two roles apart at the type level: a point plus a
//! vector is a point, and the vector between two points is a vector.

use std::ops::{Add, Mul, Neg};

use glam::Vec3;

/// World axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// A position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3(Vec3);

impl Point3 {
    /// The world origin.
    pub const ORIGIN: Self = Self(Vec3::ZERO);

    /// Create a point from its coordinates.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn z(self) -> f32 {
        self.0.z
    }

    /// Coordinate along the given axis.
    #[inline]
    pub fn coord(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.0.x,
            Axis::Y => self.0.y,
            Axis::Z => self.0.z,
        }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(self, other: Point3) -> f32 {
        self.0.distance(other.0)
    }

    /// Squared distance to `other`.
    ///
    /// Preserves ordering, so nearest-neighbor scans use this and skip the
    /// square root.
    #[inline]
    pub fn fast_distance_to(self, other: Point3) -> f32 {
        self.0.distance_squared(other.0)
    }

    /// Move this point by `offset`.
    #[inline]
    pub fn translate(self, offset: Vector3) -> Point3 {
        Point3(self.0 + offset.0)
    }

    /// Clamp each coordinate into `[min, max]`.
    #[inline]
    pub fn clamp(self, min: Point3, max: Point3) -> Point3 {
        Point3(self.0.clamp(min.0, max.0))
    }

    /// Raw glam vector for GPU upload and matrix math.
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        self.0
    }
}

impl From<[f32; 3]> for Point3 {
    fn from(v: [f32; 3]) -> Self {
        Point3(Vec3::from_array(v))
    }
}

impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Self {
        Point3(v)
    }
}

impl From<Point3> for Vec3 {
    fn from(p: Point3) -> Self {
        p.0
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    fn add(self, rhs: Vector3) -> Point3 {
        self.translate(rhs)
    }
}

/// A direction or displacement in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3(Vec3);

impl Vector3 {
    pub const ZERO: Self = Self(Vec3::ZERO);
    /// Absolute world up.
    pub const UP: Self = Self(Vec3::Y);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// Displacement that carries `from` onto `to`. Not normalized.
    #[inline]
    pub fn between(from: Point3, to: Point3) -> Vector3 {
        Vector3(to.0 - from.0)
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn z(self) -> f32 {
        self.0.z
    }

    /// Component along the given axis.
    #[inline]
    pub fn component(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.0.x,
            Axis::Y => self.0.y,
            Axis::Z => self.0.z,
        }
    }

    /// Copy of this vector with the component on `axis` negated.
    #[inline]
    pub fn reflect(self, axis: Axis) -> Vector3 {
        let mut v = self.0;
        match axis {
            Axis::X => v.x = -v.x,
            Axis::Y => v.y = -v.y,
            Axis::Z => v.z = -v.z,
        }
        Vector3(v)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.0.length()
    }

    /// Unit vector in the same direction.
    ///
    /// The caller must not pass a zero vector; the result is not finite in
    /// that case. Use [`Vector3::try_normalize`] when the input may be
    /// degenerate.
    #[inline]
    pub fn normalize(self) -> Vector3 {
        Vector3(self.0 / self.0.length())
    }

    /// Unit vector in the same direction, or `None` for a zero (or
    /// non-finite) vector.
    #[inline]
    pub fn try_normalize(self) -> Option<Vector3> {
        self.0.try_normalize().map(Vector3)
    }

    #[inline]
    pub fn scale(self, factor: f32) -> Vector3 {
        Vector3(self.0 * factor)
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(self, other: Vector3) -> Vector3 {
        Vector3(self.0.cross(other.0))
    }

    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        self.0
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Vector3(Vec3::from_array(v))
    }
}

impl From<Vec3> for Vector3 {
    fn from(v: Vec3) -> Self {
        Vector3(v)
    }
}

impl From<Vector3> for Vec3 {
    fn from(v: Vector3) -> Self {
        v.0
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Vector3 {
        self.scale(rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: Vector3, b: Vector3) -> bool {
        (a.to_vec3() - b.to_vec3()).length() < EPS
    }

    #[test]
    fn test_distance() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 6.0, 3.0);
        assert!((a.distance_to(b) - 5.0).abs() < EPS);
        assert!((a.fast_distance_to(b) - 25.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_is_unit_length() {
        let samples = [
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-0.001, 0.002, 0.0005),
            Vector3::new(120.0, -7.5, 33.0),
            Vector3::new(0.0, 0.0, -9.0),
        ];
        for v in samples {
            assert!((v.normalize().length() - 1.0).abs() < EPS, "{:?}", v);
        }
    }

    #[test]
    fn test_try_normalize_zero() {
        assert!(Vector3::ZERO.try_normalize().is_none());
        assert!(Vector3::new(0.0, 2.0, 0.0).try_normalize().is_some());
    }

    #[test]
    fn test_cross_is_anticommutative() {
        let pairs = [
            (Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
            (Vector3::new(1.5, -2.0, 0.25), Vector3::new(-3.0, 0.5, 4.0)),
            (Vector3::new(0.0, 0.0, -1.0), Vector3::UP),
        ];
        for (a, b) in pairs {
            assert!(approx(a.cross(b), -b.cross(a)));
        }
    }

    #[test]
    fn test_cross_right_handed() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert!(approx(x.cross(y), Vector3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_translate_between_round_trip() {
        let p = Point3::new(-1.25, 3.0, 9.5);
        let q = Point3::new(4.0, -0.5, 0.125);
        let moved = p.translate(Vector3::between(p, q));
        assert!((moved.to_vec3() - q.to_vec3()).length() < EPS);
    }

    #[test]
    fn test_reflect_single_axis() {
        let v = Vector3::new(1.0, -2.0, 3.0);
        assert_eq!(v.reflect(Axis::X), Vector3::new(-1.0, -2.0, 3.0));
        assert_eq!(v.reflect(Axis::Y), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(v.reflect(Axis::Z), Vector3::new(1.0, -2.0, -3.0));
    }

    #[test]
    fn test_clamp() {
        let p = Point3::new(6.0, -9.0, 0.5);
        let c = p.clamp(Point3::new(-4.7, -4.7, 0.3), Point3::new(4.7, 4.7, 9.7));
        assert_eq!(c, Point3::new(4.7, -4.7, 0.5));
    }
}
