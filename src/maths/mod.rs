//! # Maths Module
//!
//! Vector aliases and the axis-aligned bounding cube used for collision
//! detection.
//!
//! Vectors are plain `cgmath` types. In-place component-wise addition is `+=`
//! and uniform scaling is `*=`:
//!
//! ```
//! use chicky_engine::maths::Vec3;
//!
//! let mut velocity = Vec3::new(1.0, -2.0, 0.5);
//! velocity += Vec3::new(1.0, 1.0, 1.0);
//! velocity *= 2.0;
//! assert_eq!(velocity, Vec3::new(4.0, -2.0, 3.0));
//! ```

pub mod aabc;

pub use aabc::Aabc;

/// Two-component vector used for 2D gradient fields.
pub type Vec2 = cgmath::Vector2<f32>;

/// Three-component vector used for positions, velocities and accelerations.
pub type Vec3 = cgmath::Vector3<f32>;

/// One of the three world axes.
///
/// The discriminant is the component index into a `Vec3`, so `v[axis as usize]`
/// reads that axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X = 0,
    /// Vertical axis. Gravity acts along negative Y.
    Y = 1,
    /// Horizontal depth axis.
    Z = 2,
}

impl Axis {
    /// All axes in resolution order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis.
    pub fn index(self) -> usize {
        self as usize
    }
}
