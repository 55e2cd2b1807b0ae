//! # Axis-Aligned Bounding Cube
//!
//! A box described by its center and half extents. Used for both dynamic body
//! hitboxes and static block hitboxes.

use super::{Axis, Vec3};

/// An Axis-Aligned Bounding Cube.
///
/// The box extends `half_size` from `center` along each axis. Half sizes are
/// never negative: `new` takes the absolute value of each component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabc {
    /// Center of the box in world space (meters).
    pub center: Vec3,
    /// Distance from the center to each face, per axis.
    pub half_size: Vec3,
}

impl Aabc {
    /// Creates a box from its center and half extents.
    pub fn new(center: Vec3, half_size: Vec3) -> Self {
        Self {
            center,
            half_size: Vec3::new(half_size.x.abs(), half_size.y.abs(), half_size.z.abs()),
        }
    }

    /// Returns true if the two boxes overlap.
    ///
    /// Boxes overlap if and only if, on every axis, the distance between their
    /// centers is strictly less than the sum of their half sizes. Boxes that
    /// only touch do not collide.
    ///
    /// ```
    /// use chicky_engine::maths::{Aabc, Vec3};
    ///
    /// let a = Aabc::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
    /// let touching = Aabc::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
    /// let inside = Aabc::new(Vec3::new(1.9, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
    /// assert!(!a.collides_with(&touching));
    /// assert!(a.collides_with(&inside));
    /// ```
    pub fn collides_with(&self, other: &Aabc) -> bool {
        Axis::ALL.iter().all(|axis| {
            let i = axis.index();
            (other.center[i] - self.center[i]).abs() < other.half_size[i] + self.half_size[i]
        })
    }

    /// Lowest point of the box on the given axis.
    pub fn min(&self, axis: Axis) -> f32 {
        self.center[axis.index()] - self.half_size[axis.index()]
    }

    /// Highest point of the box on the given axis.
    pub fn max(&self, axis: Axis) -> f32 {
        self.center[axis.index()] + self.half_size[axis.index()]
    }

    /// Returns a copy of the box moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Aabc {
        Aabc {
            center: self.center + offset,
            half_size: self.half_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn cube(x: f32, y: f32, z: f32, half: f32) -> Aabc {
        Aabc::new(Vec3::new(x, y, z), Vec3::new(half, half, half))
    }

    #[test_case(cube(0.0, 0.0, 0.0, 1.0), cube(1.0, 1.0, 1.0, 0.5) ; "overlapping")]
    #[test_case(cube(0.0, 0.0, 0.0, 1.0), cube(5.0, 0.0, 0.0, 1.0) ; "apart on x")]
    #[test_case(cube(0.0, 0.0, 0.0, 1.0), cube(0.0, 0.0, 2.0, 1.0) ; "touching on z")]
    #[test_case(cube(-3.0, 2.0, 0.5, 0.25), cube(-3.1, 2.2, 0.4, 2.0) ; "contained")]
    fn overlap_is_symmetric(a: Aabc, b: Aabc) {
        assert_eq!(a.collides_with(&b), b.collides_with(&a));
    }

    #[test]
    fn touching_boxes_do_not_collide() {
        let a = cube(0.0, 0.0, 0.0, 1.0);
        assert!(!a.collides_with(&cube(2.0, 0.0, 0.0, 1.0)));
        assert!(!a.collides_with(&cube(0.0, -2.0, 0.0, 1.0)));
        assert!(a.collides_with(&cube(1.9, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn overlap_needs_every_axis() {
        let a = cube(0.0, 0.0, 0.0, 1.0);
        assert!(!a.collides_with(&cube(1.0, 1.0, 3.0, 1.0)));
    }

    #[test]
    fn negative_half_sizes_are_normalised() {
        let a = Aabc::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(-1.0, 2.0, -0.5));
        assert_eq!(a.half_size, Vec3::new(1.0, 2.0, 0.5));
        assert_eq!(a.min(Axis::Y), -2.0);
        assert_eq!(a.max(Axis::Z), 0.5);
    }
}
