//! Free-fly first-person camera.
//!
//! Orientation is stored as pitch/yaw angles in degrees. Mouse deltas are
//! accumulated into the angles by [`Camera::rotate`] and only turned into a
//! look direction by [`Camera::apply_orientation`], which the driver calls
//! once per tick. Movement is relative to the current look direction.

use glam::{Mat4, Vec3};

use crate::math::{Point3, Vector3};

/// Pitch is kept inside `[-PITCH_LIMIT, PITCH_LIMIT]` degrees so the view
/// never flips over the vertical.
pub const PITCH_LIMIT: f32 = 89.0;

/// Distance travelled per tick per held movement key.
pub const DEFAULT_MOVE_SPEED: f32 = 0.1;

/// Degrees of rotation per pixel of pointer movement.
pub const DEFAULT_SENSITIVITY: f32 = 0.03;

/// Held movement keys for one tick.
///
/// All four flags may be set at once. Diagonal movement is not normalized,
/// so moving forward and sideways together covers more ground.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl Movement {
    /// True when no movement key is held.
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// Symmetric perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width over height. The renderer replaces this with the real window
    /// aspect each frame.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// Same projection with a different aspect ratio.
    pub fn with_aspect(self, aspect: f32) -> Self {
        Self { aspect, ..self }
    }

    /// Right-handed projection matrix with a `[0, 1]` depth range.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 90.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// First-person camera with pitch/yaw orientation.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point3,
    /// Unit look direction, derived from pitch/yaw.
    front: Vector3,
    right: Vector3,
    up: Vector3,
    /// Degrees, clamped on every [`Camera::apply_orientation`].
    pitch: f32,
    /// Degrees, unbounded.
    yaw: f32,
    move_speed: f32,
    sensitivity: f32,
    projection: Projection,
}

impl Camera {
    /// Create a camera at `position` looking at `target`.
    ///
    /// Pitch and yaw are derived from the initial look direction so the
    /// first [`Camera::apply_orientation`] keeps facing the target. A target
    /// equal to the position falls back to looking down -z.
    pub fn new(position: Point3, target: Point3) -> Self {
        let front = Vector3::between(position, target)
            .try_normalize()
            .unwrap_or(Vector3::new(0.0, 0.0, -1.0));

        let pitch = front.y().clamp(-1.0, 1.0).asin().to_degrees();
        let yaw = front.z().atan2(front.x()).to_degrees();

        let mut camera = Self {
            position,
            front,
            right: Vector3::ZERO,
            up: Vector3::UP,
            pitch,
            yaw,
            move_speed: DEFAULT_MOVE_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            projection: Projection::default(),
        };

        if pitch.abs() > PITCH_LIMIT {
            camera.apply_orientation();
        } else {
            camera.update_basis();
        }
        camera
    }

    /// Set the distance moved per tick.
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Set degrees of rotation per unit of pointer delta.
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    // ========== Orientation ==========

    /// Accumulate a pointer delta into yaw and pitch.
    ///
    /// Moving the pointer down looks down. The look direction is not
    /// recomputed until [`Camera::apply_orientation`].
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw += delta_x * self.sensitivity;
        self.pitch -= delta_y * self.sensitivity;
    }

    /// Clamp pitch and recompute the look direction and right/up basis.
    pub fn apply_orientation(&mut self) {
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let (pitch, yaw) = (self.pitch.to_radians(), self.yaw.to_radians());
        self.front = Vector3::new(pitch.cos() * yaw.cos(), pitch.sin(), pitch.cos() * yaw.sin())
            .normalize();
        self.update_basis();
    }

    fn update_basis(&mut self) {
        self.right = self.front.cross(Vector3::UP).normalize();
        self.up = self.right.cross(self.front);
    }

    // ========== Movement ==========

    /// Move along the look direction and strafe along the right vector.
    pub fn apply_movement(&mut self, movement: &Movement) {
        let step = self.front.scale(self.move_speed);
        if movement.forward {
            self.position = self.position + step;
        }
        if movement.backward {
            self.position = self.position + -step;
        }

        if movement.left || movement.right {
            let strafe = self.front.cross(Vector3::UP).normalize().scale(self.move_speed);
            if movement.left {
                self.position = self.position + -strafe;
            }
            if movement.right {
                self.position = self.position + strafe;
            }
        }
    }

    /// Keep the camera inside an axis-aligned box.
    pub fn confine(&mut self, min: Point3, max: Point3) {
        self.position = self.position.clamp(min, max);
    }

    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    // ========== Queries ==========

    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Unit look direction.
    pub fn look_direction(&self) -> Vector3 {
        self.front
    }

    pub fn right(&self) -> Vector3 {
        self.right
    }

    /// Camera-relative up vector.
    pub fn up(&self) -> Vector3 {
        self.up
    }

    /// Absolute world up used for the view transform.
    pub fn world_up(&self) -> Vector3 {
        Vector3::UP
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// The point one unit in front of the camera.
    ///
    /// Particles are attracted to and repelled from this point, and
    /// spawn/despawn commands act around it.
    pub fn look_at_point(&self) -> Point3 {
        self.position + self.front
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            self.position.to_vec3(),
            self.look_at_point().to_vec3(),
            Vec3::from(self.world_up()),
        )
    }

    /// Combined projection * view for the given viewport aspect.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection.with_aspect(aspect).matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, 7.0), Point3::ORIGIN)
    }
}
