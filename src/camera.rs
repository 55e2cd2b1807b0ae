//! # Camera
//!
//! The world only needs two things from whatever is looking at it: where it
//! is and which way it faces. [`CameraView`] is that seam; [`Camera`] is the
//! first-person yaw/pitch camera the game drives.

use cgmath::{InnerSpace, Point3, Rad, Vector3};
use std::f32::consts::FRAC_PI_2;

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Height of the camera above the point it follows, in meters.
pub const EYE_HEIGHT: f32 = 1.5;

/// What the renderer needs to know about a viewpoint.
pub trait CameraView {
    /// Position of the eye in world space, in meters.
    fn position(&self) -> Point3<f32>;

    /// Normalized direction the eye looks along.
    fn view_direction(&self) -> Vector3<f32>;
}

/// Represents a first-person camera in 3D space.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space. Can be any type that converts to `Point3<f32>`.
    /// * `yaw` - Initial yaw (horizontal rotation around Y axis). Zero looks along +X.
    /// * `pitch` - Initial pitch (vertical rotation around X axis), clamped short of straight up or down.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use chicky_engine::camera::{Camera, CameraView};
    ///
    /// let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
    /// assert!((camera.view_direction().x - 1.0).abs() < 1e-6);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        };
        camera.clamp_pitch();
        camera
    }

    /// Turns the camera by the given yaw and pitch deltas.
    pub fn rotate(&mut self, yaw: Rad<f32>, pitch: Rad<f32>) {
        self.yaw += yaw;
        self.pitch += pitch;
        self.clamp_pitch();
    }

    /// Moves the eye to `EYE_HEIGHT` above `target`.
    pub fn follow(&mut self, target: Point3<f32>) {
        self.position = Point3::new(target.x, target.y + EYE_HEIGHT, target.z);
    }

    fn clamp_pitch(&mut self) {
        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }
}

impl CameraView for Camera {
    fn position(&self) -> Point3<f32> {
        self.position
    }

    fn view_direction(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Deg;

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        camera.rotate(Rad(0.0), Rad(10.0));
        assert_eq!(camera.pitch, Rad(SAFE_FRAC_PI_2));
        assert!(camera.view_direction().y > 0.99);
    }

    #[test]
    fn view_direction_follows_yaw() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(90.0), Deg(0.0));
        let direction = camera.view_direction();
        assert_relative_eq!(direction.z, 1.0, epsilon = 1e-6);
        assert_relative_eq!(direction.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn follow_puts_the_eye_above_the_target() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        camera.follow(Point3::new(3.0, 10.0, -2.0));
        assert_eq!(camera.position(), Point3::new(3.0, 11.5, -2.0));
    }
}
