//! # Characters
//!
//! Living things in the world. A character owns a `PhysicalObject` for its
//! body and layers health, an inventory and controls on top of it.

mod chicken;

pub use chicken::{Chicken, CHICKEN_HEIGHT, CHICKEN_LIFESPAN, CHICKEN_MASS, CHICKEN_WIDTH};

/// What a character is doing, mostly for picking an animation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CharacterAction {
    /// Standing still.
    #[default]
    Nothing,
    /// Walking.
    Walk,
    /// Running.
    Run,
    /// Squatting.
    Squat,
    /// In the air.
    Fall,
    /// Walking into a wall.
    Push,
    /// Dead.
    Dying,
}

/// A direction a character can be told to move in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards negative X.
    Left,
    /// Towards positive X.
    Right,
    /// Towards negative Z.
    Forward,
    /// Towards positive Z.
    Backward,
}

/// Right or Left, telling which direction a character (or whatever) is facing
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FacingDirection {
    /// Facing negative X.
    Left,
    /// Facing positive X.
    #[default]
    Right,
}
